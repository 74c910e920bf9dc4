use serde_json::Value;

use crate::{Error, Result};

/// Which configured chat model a call should run against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelProfile {
	/// Higher-quality, slower model for generation-heavy tools.
	Deliberate,
	/// Faster model for conversational turns.
	Reactive,
}
impl ModelProfile {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Deliberate => "deliberate",
			Self::Reactive => "reactive",
		}
	}
}

/// Calls an OpenAI-compatible chat-completions endpoint and returns the
/// first choice's message content. The content is returned untrimmed;
/// callers own any post-processing since model instruction-following is
/// not trusted.
pub async fn complete(
	cfg: &roost_config::ChatProviderConfig,
	profile: ModelProfile,
	system: &str,
	user: &str,
) -> Result<String> {
	let client = crate::http_client(cfg.timeout_ms)?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let model = match profile {
		ModelProfile::Deliberate => cfg.deliberate_model.as_str(),
		ModelProfile::Reactive => cfg.reactive_model.as_str(),
	};
	let body = serde_json::json!({
		"model": model,
		"temperature": cfg.temperature,
		"messages": [
			{ "role": "system", "content": system },
			{ "role": "user", "content": user },
		],
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_completion(json)
}

fn parse_completion(json: Value) -> Result<String> {
	json.get("choices")
		.and_then(Value::as_array)
		.and_then(|choices| choices.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|message| message.get("content"))
		.and_then(Value::as_str)
		.map(str::to_string)
		.ok_or_else(|| Error::InvalidResponse {
			message: "Chat response is missing message content.".to_string(),
		})
}
