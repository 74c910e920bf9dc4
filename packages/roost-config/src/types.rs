use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	pub knowledge: Knowledge,
	#[serde(default)]
	pub agent: Agent,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
	pub qdrant: Qdrant,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Qdrant {
	pub url: String,
	pub collection: String,
	pub vector_dim: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub chat: ChatProviderConfig,
	pub email: EmailProviderConfig,
	pub hotels: HotelProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct ChatProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	/// Slower, higher-quality profile used for generation-heavy tools.
	pub deliberate_model: String,
	/// Faster profile used for conversational turns.
	pub reactive_model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct EmailProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub from_address: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct HotelProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Knowledge {
	/// Optional curated rules file. Absence is not an error.
	pub rules_path: Option<PathBuf>,
	pub sync_interval_secs: u64,
	#[serde(default = "default_startup_delay_secs")]
	pub startup_delay_secs: u64,
	#[serde(default = "default_rules_debounce_ms")]
	pub rules_debounce_ms: u64,
	pub catalog_page_size: i64,
	pub search_limit: u64,
	pub score_threshold: f32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Agent {
	pub copy_variants: u32,
}
impl Default for Agent {
	fn default() -> Self {
		Self { copy_variants: 3 }
	}
}

fn default_startup_delay_secs() -> u64 {
	30
}

fn default_rules_debounce_ms() -> u64 {
	2_000
}
