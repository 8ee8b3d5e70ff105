use crate::catalog::{CatalogClient, CatalogQuery};
use crate::config::Config;
use crate::db::{init_db, Database};
use crate::domain::ProductLines;
use crate::errors::{PipelineError, Sink};
use crate::mailer::BrevoMailer;
use crate::pipeline::{Pipeline, RunSettings};
use clap::Parser;
use log::error;

mod aggregator;
mod catalog;
mod config;
mod db;
mod domain;
mod errors;
mod mailer;
mod pipeline;
mod scheduler;
mod snapshot;
mod templates;

#[cfg(test)]
mod tests;

#[derive(Parser, Debug)]
#[command(name = "inventory_aggregator")]
#[command(about = "Daily report of the cheapest used vehicles in the catalog", long_about = None)]
struct Cli {
    /// Run the pipeline once and exit instead of waiting for the daily schedule.
    #[arg(long)]
    once: bool,

    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    if let Err(e) = start(&cli) {
        error!("❌ Startup failed: {e}");
        std::process::exit(1);
    }
}

fn start(cli: &Cli) -> Result<(), PipelineError> {
    let cfg = Config::from_env()?;

    let db = Database::new(cfg.database_path.clone());
    init_db(&db)?;

    let catalog = CatalogClient::new(cfg.catalog_url.clone(), CatalogQuery::default())
        .map_err(|e| PipelineError::InvalidConfig("CATALOG_URL".to_string(), e.to_string()))?;
    let mailer = BrevoMailer::new(cfg.brevo_api_key.clone(), cfg.sender_name.clone()).map_err(
        |e| PipelineError::SinkUnavailable {
            sink: Sink::Email,
            reason: e.to_string(),
        },
    )?;
    let lines = ProductLines::default();

    let pipeline = Pipeline::new(&catalog, &db, &mailer, &lines, RunSettings::from(&cfg));

    if cli.once {
        pipeline.run();
        return Ok(());
    }

    scheduler::run_daily(cfg.run_hour_utc, || {
        pipeline.run();
    })
}
