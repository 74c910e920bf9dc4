use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use roost_service::{ConciergeService, SyncCoordinator};

pub mod triggers;

#[derive(Debug, Parser)]
#[command(
	version = roost_cli::VERSION,
	rename_all = "kebab",
	styles = roost_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: std::path::PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = roost_config::load(&args.config)?;
	let filter = EnvFilter::new(config.service.log_level.clone());

	tracing_subscriber::fmt().with_env_filter(filter).init();

	let db = roost_storage::db::Db::connect(&config.storage.postgres).await?;

	db.ensure_schema().await?;

	let qdrant = roost_storage::qdrant::QdrantStore::new(&config.storage.qdrant)?;
	let service = Arc::new(ConciergeService::new(config, &db, qdrant));

	service.ensure_knowledge_collection().await?;

	let coordinator = SyncCoordinator::new(service.clone());

	triggers::run_until_shutdown(&coordinator, &service).await?;

	// Drain the audit writer before exiting so no record is abandoned.
	service.audit.shutdown().await;

	Ok(())
}
