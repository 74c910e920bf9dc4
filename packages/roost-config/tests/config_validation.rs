use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use roost_config::{Config, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

static FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

fn sample_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.")
}

fn sample_with<F>(mutate: F) -> String
where
	F: FnOnce(&mut toml::value::Table),
{
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let root = value.as_table_mut().expect("Template config must be a table.");

	mutate(root);

	toml::to_string(&value).expect("Failed to render template config.")
}

fn table<'a>(root: &'a mut toml::value::Table, path: &[&str]) -> &'a mut toml::value::Table {
	match path {
		[] => root,
		[key, rest @ ..] => {
			let next = root
				.get_mut(*key)
				.and_then(Value::as_table_mut)
				.unwrap_or_else(|| panic!("Template config must include [{key}]."));

			table(next, rest)
		},
	}
}

fn write_temp_config(contents: &str) -> PathBuf {
	let stamp = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System clock is before the epoch.")
		.as_nanos();
	let counter = FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
	let path = env::temp_dir().join(format!("roost_config_{stamp}_{counter}.toml"));

	fs::write(&path, contents).expect("Failed to write temp config.");

	path
}

fn validation_message(result: roost_config::Result<()>) -> String {
	match result {
		Err(Error::Validation { message }) => message,
		other => panic!("Expected a validation error, got {other:?}."),
	}
}

#[test]
fn accepts_sample_config() {
	let cfg = sample_config();

	roost_config::validate(&cfg).expect("Sample config must validate.");
}

#[test]
fn loads_sample_config_from_disk() {
	let path = write_temp_config(SAMPLE_CONFIG_TEMPLATE_TOML);
	let cfg = roost_config::load(&path).expect("Sample config must load.");

	assert_eq!(cfg.storage.qdrant.vector_dim, 1_536);
	assert_eq!(cfg.agent.copy_variants, 3);

	let _ = fs::remove_file(path);
}

#[test]
fn normalizes_empty_rules_path() {
	let raw = sample_with(|root| {
		table(root, &["knowledge"])
			.insert("rules_path".to_string(), Value::String(String::new()));
	});
	let path = write_temp_config(&raw);
	let cfg = roost_config::load(&path).expect("Config with empty rules_path must load.");

	assert!(cfg.knowledge.rules_path.is_none());

	let _ = fs::remove_file(path);
}

#[test]
fn rejects_mismatched_embedding_dimensions() {
	let raw = sample_with(|root| {
		table(root, &["providers", "embedding"])
			.insert("dimensions".to_string(), Value::Integer(768));
	});
	let cfg: Config = toml::from_str(&raw).expect("Mutated config must parse.");
	let message = validation_message(roost_config::validate(&cfg));

	assert!(message.contains("dimensions"));
}

#[test]
fn rejects_empty_provider_api_key() {
	let raw = sample_with(|root| {
		table(root, &["providers", "chat"]).insert("api_key".to_string(), Value::String(String::new()));
	});
	let cfg: Config = toml::from_str(&raw).expect("Mutated config must parse.");
	let message = validation_message(roost_config::validate(&cfg));

	assert!(message.contains("chat"));
	assert!(message.contains("api_key"));
}

#[test]
fn rejects_zero_sync_interval() {
	let raw = sample_with(|root| {
		table(root, &["knowledge"]).insert("sync_interval_secs".to_string(), Value::Integer(0));
	});
	let cfg: Config = toml::from_str(&raw).expect("Mutated config must parse.");
	let message = validation_message(roost_config::validate(&cfg));

	assert!(message.contains("sync_interval_secs"));
}

#[test]
fn rejects_out_of_range_score_threshold() {
	let raw = sample_with(|root| {
		table(root, &["knowledge"]).insert("score_threshold".to_string(), Value::Float(1.5));
	});
	let cfg: Config = toml::from_str(&raw).expect("Mutated config must parse.");
	let message = validation_message(roost_config::validate(&cfg));

	assert!(message.contains("score_threshold"));
}

#[test]
fn rejects_invalid_from_address() {
	let raw = sample_with(|root| {
		table(root, &["providers", "email"])
			.insert("from_address".to_string(), Value::String("not-an-address".to_string()));
	});
	let cfg: Config = toml::from_str(&raw).expect("Mutated config must parse.");
	let message = validation_message(roost_config::validate(&cfg));

	assert!(message.contains("from_address"));
}

#[test]
fn rejects_excessive_copy_variants() {
	let raw = sample_with(|root| {
		table(root, &["agent"]).insert("copy_variants".to_string(), Value::Integer(9));
	});
	let cfg: Config = toml::from_str(&raw).expect("Mutated config must parse.");
	let message = validation_message(roost_config::validate(&cfg));

	assert!(message.contains("copy_variants"));
}
