//! Skywatch Ingest - one-off dataset fetches from the command line

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use skywatch_common::logging::{init_logging, LogConfig};
use skywatch_ingest::{
    apod::ApodPipeline, donki::FlarePipeline, neo::NeoPipeline, NasaClient,
};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "skywatch-ingest")]
#[command(author, version, about = "Skywatch data ingestion tool")]
struct Cli {
    /// Data source to ingest
    #[command(subcommand)]
    source: Source,

    /// Database to ingest into
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// NASA API key; the public demo key is used when omitted
    #[arg(long, env = "NASA_API_KEY")]
    api_key: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Parser, Debug)]
enum Source {
    /// Fetch astronomy pictures of the day
    Apod {
        /// Specific date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Fetch this many days walking backward from today
        #[arg(long, conflicts_with = "date")]
        days: Option<u32>,
    },

    /// Fetch the near-Earth asteroid feed
    Asteroids {
        /// Range start (YYYY-MM-DD); defaults to today
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Range end (YYYY-MM-DD); defaults to start + 7 days
        #[arg(long)]
        end: Option<NaiveDate>,
    },

    /// Fetch solar flare events
    SolarFlares {
        /// Range start (YYYY-MM-DD); defaults to 30 days ago
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Range end (YYYY-MM-DD); defaults to today
        #[arg(long)]
        end: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env()?.with_file_prefix("skywatch-ingest");
    if cli.verbose {
        log_config.level = skywatch_common::logging::LogLevel::Debug;
    }
    init_logging(&log_config)?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&cli.database_url)
        .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    let client = NasaClient::new(cli.api_key);

    match cli.source {
        Source::Apod { date, days } => {
            let pipeline = ApodPipeline::new(pool, client);
            if let Some(days) = days {
                let pictures = pipeline.fetch_recent(days).await;
                info!(requested = days, obtained = pictures.len(), "daily pictures fetched");
            } else {
                let picture = pipeline.fetch_picture(date).await?;
                info!(date = %picture.picture_date, title = %picture.title, "daily picture fetched");
            }
        },
        Source::Asteroids { start, end } => {
            let pipeline = NeoPipeline::new(pool, client);
            let summary = pipeline.fetch_feed(start, end).await?;
            info!(
                asteroids = summary.asteroids_created,
                approaches = summary.approaches_created,
                "asteroid feed fetched"
            );
        },
        Source::SolarFlares { start, end } => {
            let pipeline = FlarePipeline::new(pool, client);
            let created = pipeline.fetch_flares(start, end).await?;
            info!(flares = created, "solar flares fetched");
        },
    }

    info!("Ingestion complete");
    Ok(())
}
