//! MeetSmart CLI
//!
//! Runs the recommendation engine over a JSON snapshot of one event and its submissions.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::info;

use meetsmart::{
    config::Settings,
    models::{BestTime, CreateEventRequest, Event, Recommendation, SubmissionDraft},
    services::ServiceFactory,
    utils::logging,
};

#[derive(Parser)]
#[command(name = "meetsmart")]
#[command(about = "Recommend meeting times from participant availability")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank meeting windows for a snapshot file.
    Recommend {
        /// Snapshot JSON: {"event": {...}, "submissions": [...]}
        #[arg(short, long)]
        input: PathBuf,
        /// Override the number of candidates returned
        #[arg(short, long)]
        top: Option<usize>,
        /// Configuration file (TOML); environment variables still apply
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the default configuration as TOML.
    InitConfig,
}

#[derive(Debug, Deserialize)]
struct Snapshot {
    event: CreateEventRequest,
    #[serde(default)]
    submissions: Vec<SubmissionDraft>,
}

#[derive(Serialize)]
struct Report<'a> {
    event: &'a Event,
    best_times: Vec<BestTime>,
    #[serde(flatten)]
    recommendation: &'a Recommendation,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend { input, top, config } => run_recommend(input, top, config).await,
        Commands::InitConfig => {
            let rendered = toml::to_string_pretty(&Settings::default())
                .context("Failed to render default settings")?;
            println!("{}", rendered);
            Ok(())
        }
    }
}

async fn run_recommend(input: PathBuf, top: Option<usize>, config: Option<PathBuf>) -> Result<()> {
    let mut settings = Settings::load(config.as_deref()).context("Failed to load configuration")?;
    if let Some(top) = top {
        settings.engine.max_candidates = top;
    }
    settings.validate()?;

    let _guard = logging::init_logging(&settings.logging)?;
    info!("Starting {}", meetsmart::info());

    let raw = tokio::fs::read_to_string(&input)
        .await
        .with_context(|| format!("Failed to read snapshot {}", input.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse snapshot {}", input.display()))?;

    let services = ServiceFactory::new(settings)?;
    let scheduling = &services.scheduling_service;

    let event = scheduling.create_event(snapshot.event).await?;
    for (index, draft) in snapshot.submissions.into_iter().enumerate() {
        if let Err(e) = scheduling.submit_availability(draft.into_request(event.id)).await {
            logging::log_error(&e, &format!("skipping submission {}", index));
        }
    }

    let recommendation = scheduling.recommend(event.id).await?;
    let event = scheduling.get_event(event.id).await?;

    let report = Report {
        event: &event,
        best_times: recommendation.best_times(),
        recommendation: &recommendation,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    info!(
        event_id = event.id,
        candidates = recommendation.candidates.len(),
        "Recommendation written"
    );
    Ok(())
}
