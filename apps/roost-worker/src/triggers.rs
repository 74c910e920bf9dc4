use std::{
	path::{Path, PathBuf},
	time::{Duration, SystemTime},
};

use tokio::{signal, sync::mpsc, time as tokio_time};

use roost_service::{ConciergeService, SyncCoordinator};

const RULES_POLL_INTERVAL_MS: u64 = 500;

/// Serves both sync triggers until ctrl-c: the fixed interval after a
/// startup delay, and the debounced rules-file change signal. Overlap is
/// handled inside the coordinator, so firing both here is safe.
pub async fn run_until_shutdown(
	coordinator: &SyncCoordinator,
	service: &ConciergeService,
) -> color_eyre::Result<()> {
	let knowledge = &service.cfg.knowledge;
	let interval_period = Duration::from_secs(knowledge.sync_interval_secs);
	let debounce = Duration::from_millis(knowledge.rules_debounce_ms);
	let (rules_tx, mut rules_rx) = mpsc::unbounded_channel();
	let watcher = knowledge
		.rules_path
		.clone()
		.map(|path| tokio::spawn(watch_rules(path, debounce, rules_tx)));

	tokio_time::sleep(Duration::from_secs(knowledge.startup_delay_secs)).await;
	coordinator.sync().await;

	let mut ticker =
		tokio_time::interval_at(tokio_time::Instant::now() + interval_period, interval_period);

	loop {
		tokio::select! {
			_ = ticker.tick() => {
				coordinator.sync().await;
			},
			Some(()) = rules_rx.recv() => {
				tracing::info!("Rules file changed. Triggering knowledge sync.");
				coordinator.sync().await;
			},
			result = signal::ctrl_c() => {
				result?;
				tracing::info!("Shutdown signal received.");

				break;
			},
		}
	}

	if let Some(watcher) = watcher {
		watcher.abort();

		let _ = watcher.await;
	}

	Ok(())
}

/// Polls the rules file's mtime and emits one signal per quiet period;
/// rapid successive writes coalesce into a single trigger.
async fn watch_rules(path: PathBuf, debounce: Duration, tx: mpsc::UnboundedSender<()>) {
	let mut seen = modified_at(&path).await;
	let mut ticker = tokio_time::interval(Duration::from_millis(RULES_POLL_INTERVAL_MS));

	loop {
		ticker.tick().await;

		let current = modified_at(&path).await;

		if current == seen {
			continue;
		}

		seen = current;

		// Quiet period: keep extending while writes continue.
		loop {
			tokio_time::sleep(debounce).await;

			let next = modified_at(&path).await;

			if next == seen {
				break;
			}

			seen = next;
		}

		if tx.send(()).is_err() {
			return;
		}
	}
}

async fn modified_at(path: &Path) -> Option<SystemTime> {
	match tokio::fs::metadata(path).await {
		Ok(metadata) => metadata.modified().ok(),
		Err(_) => None,
	}
}
