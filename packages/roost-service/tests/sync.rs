use std::{
	env, fs,
	sync::{
		Arc,
		atomic::{AtomicU64, Ordering},
	},
	time::{Duration, SystemTime, UNIX_EPOCH},
};

use roost_service::{SyncCoordinator, SyncOutcome};
use roost_testkit::{Harness, catalog_listing, test_config};

static FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

fn write_temp_rules(contents: &str) -> std::path::PathBuf {
	let stamp = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System clock is before the epoch.")
		.as_nanos();
	let counter = FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
	let path = env::temp_dir().join(format!("roost_rules_{stamp}_{counter}.json"));

	fs::write(&path, contents).expect("Failed to write temp rules file.");

	path
}

#[tokio::test]
async fn concurrent_triggers_run_exactly_one_pass() {
	let harness = Harness::new();

	harness.market.set_catalog(vec![catalog_listing(1, "Sea cottage")]);
	// Keep the first pass in flight long enough for the second trigger.
	harness.index.set_upsert_delay(Duration::from_millis(50));

	let coordinator = SyncCoordinator::new(Arc::new(harness.service()));
	let (first, second) = tokio::join!(coordinator.sync(), coordinator.sync());

	assert_eq!(first, SyncOutcome::Indexed { documents: 1 });
	assert_eq!(second, SyncOutcome::Skipped);
	assert_eq!(harness.index.upsert_count(), 1);
}

#[tokio::test]
async fn sequential_triggers_each_run_a_pass() {
	let harness = Harness::new();

	harness.market.set_catalog(vec![catalog_listing(1, "Sea cottage")]);

	let coordinator = SyncCoordinator::new(Arc::new(harness.service()));

	assert_eq!(coordinator.sync().await, SyncOutcome::Indexed { documents: 1 });
	assert_eq!(coordinator.sync().await, SyncOutcome::Indexed { documents: 1 });
	assert_eq!(harness.index.upsert_count(), 2);
}

#[tokio::test]
async fn the_catalog_is_streamed_across_pages() {
	let harness = Harness::new();

	// Five listings against the test page size of two.
	harness.market.set_catalog(
		(1..=5).map(|id| catalog_listing(id, &format!("Listing {id}"))).collect(),
	);

	let coordinator = SyncCoordinator::new(Arc::new(harness.service()));

	assert_eq!(coordinator.sync().await, SyncOutcome::Indexed { documents: 5 });
	assert_eq!(harness.index.upsert_count(), 1);
	assert_eq!(harness.index.upserted_point_count(), 5);
}

#[tokio::test]
async fn rules_and_catalog_merge_into_one_document_set() {
	let harness = Harness::new();
	let rules = r#"[
		{"id": "r-1", "question": "Pets?", "answer": "Cats are welcome."},
		{"id": "r-2", "question": "Check-in?", "answer": "From 15:00."}
	]"#;
	let path = write_temp_rules(rules);
	let mut cfg = test_config();

	cfg.knowledge.rules_path = Some(path.clone());
	harness.market.set_catalog(vec![catalog_listing(1, "Sea cottage")]);

	let coordinator = SyncCoordinator::new(Arc::new(harness.service_with_config(cfg)));

	assert_eq!(coordinator.sync().await, SyncOutcome::Indexed { documents: 3 });

	let contents = harness.index.upserted_contents();

	assert!(contents.iter().any(|content| content.contains("Cats are welcome.")));
	assert!(contents.iter().any(|content| content.contains("Sea cottage")));

	let _ = fs::remove_file(path);
}

#[tokio::test]
async fn an_absent_rules_file_is_not_an_error() {
	let harness = Harness::new();
	let mut cfg = test_config();

	cfg.knowledge.rules_path = Some(env::temp_dir().join("roost_rules_does_not_exist.json"));
	harness.market.set_catalog(vec![catalog_listing(1, "Sea cottage")]);

	let coordinator = SyncCoordinator::new(Arc::new(harness.service_with_config(cfg)));

	assert_eq!(coordinator.sync().await, SyncOutcome::Indexed { documents: 1 });
}

#[tokio::test]
async fn an_unreadable_rules_file_fails_the_pass_without_writes() {
	let harness = Harness::new();
	let path = write_temp_rules("this is not json");
	let mut cfg = test_config();

	cfg.knowledge.rules_path = Some(path.clone());
	harness.market.set_catalog(vec![catalog_listing(1, "Sea cottage")]);

	let coordinator = SyncCoordinator::new(Arc::new(harness.service_with_config(cfg)));

	assert_eq!(coordinator.sync().await, SyncOutcome::Failed);
	assert_eq!(harness.index.upsert_count(), 0);

	let _ = fs::remove_file(path);
}

#[tokio::test]
async fn a_failed_catalog_read_fails_the_pass_without_writes() {
	let harness = Harness::new();

	harness.market.set_catalog_failing();

	let coordinator = SyncCoordinator::new(Arc::new(harness.service()));

	assert_eq!(coordinator.sync().await, SyncOutcome::Failed);
	assert_eq!(harness.index.upsert_count(), 0);
}

#[tokio::test]
async fn empty_sources_complete_without_store_writes() {
	let harness = Harness::new();
	let coordinator = SyncCoordinator::new(Arc::new(harness.service()));

	assert_eq!(coordinator.sync().await, SyncOutcome::Indexed { documents: 0 });
	assert_eq!(harness.embedding.calls(), 0);
	assert_eq!(harness.index.upsert_count(), 0);
}
