mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Agent, ChatProviderConfig, Config, EmailProviderConfig, EmbeddingProviderConfig,
	HotelProviderConfig, Knowledge, Postgres, Providers, Qdrant, Service, Storage,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation { message: "service.log_level must be non-empty.".to_string() });
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.qdrant.collection.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.qdrant.collection must be non-empty.".to_string(),
		});
	}
	if cfg.storage.qdrant.vector_dim == 0 {
		return Err(Error::Validation {
			message: "storage.qdrant.vector_dim must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions != cfg.storage.qdrant.vector_dim {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must match storage.qdrant.vector_dim."
				.to_string(),
		});
	}

	for (label, model) in [
		("providers.embedding.model", &cfg.providers.embedding.model),
		("providers.chat.deliberate_model", &cfg.providers.chat.deliberate_model),
		("providers.chat.reactive_model", &cfg.providers.chat.reactive_model),
	] {
		if model.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	for (label, key) in [
		("embedding", &cfg.providers.embedding.api_key),
		("chat", &cfg.providers.chat.api_key),
		("email", &cfg.providers.email.api_key),
		("hotels", &cfg.providers.hotels.api_key),
	] {
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
	}

	for (label, timeout_ms) in [
		("embedding", cfg.providers.embedding.timeout_ms),
		("chat", cfg.providers.chat.timeout_ms),
		("email", cfg.providers.email.timeout_ms),
		("hotels", cfg.providers.hotels.timeout_ms),
	] {
		if timeout_ms == 0 {
			return Err(Error::Validation {
				message: format!("Provider {label} timeout_ms must be greater than zero."),
			});
		}
	}

	if !cfg.providers.chat.temperature.is_finite()
		|| !(0.0..=2.0).contains(&cfg.providers.chat.temperature)
	{
		return Err(Error::Validation {
			message: "providers.chat.temperature must be a finite number in the range 0.0-2.0."
				.to_string(),
		});
	}
	if !cfg.providers.email.from_address.contains('@') {
		return Err(Error::Validation {
			message: "providers.email.from_address must be an email address.".to_string(),
		});
	}

	if cfg.knowledge.sync_interval_secs == 0 {
		return Err(Error::Validation {
			message: "knowledge.sync_interval_secs must be greater than zero.".to_string(),
		});
	}
	if cfg.knowledge.rules_debounce_ms == 0 {
		return Err(Error::Validation {
			message: "knowledge.rules_debounce_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.knowledge.catalog_page_size <= 0 {
		return Err(Error::Validation {
			message: "knowledge.catalog_page_size must be greater than zero.".to_string(),
		});
	}
	if cfg.knowledge.search_limit == 0 {
		return Err(Error::Validation {
			message: "knowledge.search_limit must be greater than zero.".to_string(),
		});
	}
	if !cfg.knowledge.score_threshold.is_finite()
		|| !(0.0..=1.0).contains(&cfg.knowledge.score_threshold)
	{
		return Err(Error::Validation {
			message: "knowledge.score_threshold must be a finite number in the range 0.0-1.0."
				.to_string(),
		});
	}

	if !(1..=5).contains(&cfg.agent.copy_variants) {
		return Err(Error::Validation {
			message: "agent.copy_variants must be in the range 1-5.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg
		.knowledge
		.rules_path
		.as_deref()
		.map(|path| path.as_os_str().is_empty())
		.unwrap_or(false)
	{
		cfg.knowledge.rules_path = None;
	}
}
