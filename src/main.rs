use anyhow::Context;
use clap::{Parser, Subcommand};
use incentives::IncentivesClient;
use indexer_core::constants::{INCENTIVES_TIMEOUT_ENV, INCENTIVES_TOKEN_ENV, INCENTIVES_URL_ENV};
use indexer_core::{IndexerConfig, PrisonerDocument, RestrictedPatient, TranslationService};
use nomis::BookingRecord;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "indexer-run")]
#[command(about = "Translate booking records into prisoner documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate one booking record and print the document as JSON
    Translate {
        /// Booking record JSON file
        #[arg(long)]
        booking: PathBuf,
        /// Previously indexed document JSON file (optional)
        #[arg(long)]
        existing: Option<PathBuf>,
        /// Restricted-patient JSON file (optional)
        #[arg(long)]
        restricted_patient: Option<PathBuf>,
    },
}

/// Entry point for the indexer runner.
///
/// # Environment Variables
/// - `INCENTIVES_API_URL`: base URL of the incentive service (required)
/// - `INCENTIVES_API_TIMEOUT`: lookup timeout, e.g. `20s` (default: 20s)
/// - `INCENTIVES_API_TOKEN`: bearer token for the incentive service (optional)
/// - `RUST_LOG`: log filter (default adds `indexer=info,incentives=info`)
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("indexer=info".parse()?)
                .add_directive("incentives=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let cfg = IndexerConfig::from_env_values(
        std::env::var(INCENTIVES_URL_ENV).ok(),
        std::env::var(INCENTIVES_TIMEOUT_ENV).ok(),
        std::env::var(INCENTIVES_TOKEN_ENV).ok(),
    )?;

    match cli.command {
        Commands::Translate {
            booking,
            existing,
            restricted_patient,
        } => {
            let record = BookingRecord::parse(&read(&booking)?)
                .with_context(|| format!("invalid booking record in {}", booking.display()))?;
            let existing = existing
                .map(|path| {
                    PrisonerDocument::parse(&read(&path)?)
                        .with_context(|| format!("invalid document in {}", path.display()))
                })
                .transpose()?;
            let restricted_patient = restricted_patient
                .map(|path| {
                    serde_json::from_str::<RestrictedPatient>(&read(&path)?).with_context(|| {
                        format!("invalid restricted-patient data in {}", path.display())
                    })
                })
                .transpose()?;

            tracing::info!(
                "++ Using incentive service at {}",
                cfg.incentives().base_url()
            );
            let service = TranslationService::new(IncentivesClient::new(cfg.incentives().clone())?);
            let document = service
                .build_document(&record, existing.as_ref(), restricted_patient.as_ref())
                .await?;

            println!("{}", document.render()?);
        }
    }

    Ok(())
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
