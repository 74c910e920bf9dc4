use crate::{Error, Result};

/// Sends one HTML email through the configured JSON gateway.
pub async fn send(
	cfg: &roost_config::EmailProviderConfig,
	to: &str,
	subject: &str,
	html_body: &str,
) -> Result<()> {
	if to.trim().is_empty() {
		return Err(Error::InvalidConfig {
			message: "Email recipient address must be non-empty.".to_string(),
		});
	}

	let client = crate::http_client(cfg.timeout_ms)?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"from": cfg.from_address,
		"to": [to],
		"subject": subject,
		"html": html_body,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;

	res.error_for_status()?;

	Ok(())
}
