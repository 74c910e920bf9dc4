use serde_json::Value;

use crate::{Error, Result};

/// Calls an OpenAI-compatible embeddings endpoint. One vector per input
/// text, returned in input order.
pub async fn embed(
	cfg: &roost_config::EmbeddingProviderConfig,
	texts: &[String],
) -> Result<Vec<Vec<f32>>> {
	let client = crate::http_client(cfg.timeout_ms)?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"input": texts,
		"dimensions": cfg.dimensions,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_embedding_response(json, texts.len())
}

fn parse_embedding_response(json: Value, expected: usize) -> Result<Vec<Vec<f32>>> {
	let data = json.get("data").and_then(Value::as_array).ok_or_else(|| Error::InvalidResponse {
		message: "Embedding response is missing the data array.".to_string(),
	})?;
	let mut slots: Vec<Option<Vec<f32>>> = vec![None; expected];

	for (position, item) in data.iter().enumerate() {
		let index = item
			.get("index")
			.and_then(Value::as_u64)
			.map(|index| index as usize)
			.unwrap_or(position);
		let raw = item.get("embedding").and_then(Value::as_array).ok_or_else(|| {
			Error::InvalidResponse {
				message: format!("Embedding item {index} is missing its vector."),
			}
		})?;
		let mut vector = Vec::with_capacity(raw.len());

		for value in raw {
			let number = value.as_f64().ok_or_else(|| Error::InvalidResponse {
				message: format!("Embedding item {index} contains a non-numeric value."),
			})?;

			vector.push(number as f32);
		}

		let Some(slot) = slots.get_mut(index) else {
			return Err(Error::InvalidResponse {
				message: format!("Embedding item index {index} is out of range."),
			});
		};

		*slot = Some(vector);
	}

	slots
		.into_iter()
		.enumerate()
		.map(|(index, slot)| {
			slot.ok_or_else(|| Error::InvalidResponse {
				message: format!("Embedding response is missing a vector for input {index}."),
			})
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn orders_vectors_by_response_index() {
		let json = serde_json::json!({
			"data": [
				{ "index": 1, "embedding": [2.0, 3.0] },
				{ "index": 0, "embedding": [0.5, 1.5] }
			]
		});
		let parsed = parse_embedding_response(json, 2).expect("parse failed");

		assert_eq!(parsed, vec![vec![0.5, 1.5], vec![2.0, 3.0]]);
	}

	#[test]
	fn rejects_responses_with_missing_vectors() {
		let json = serde_json::json!({
			"data": [
				{ "index": 0, "embedding": [0.5, 1.5] }
			]
		});

		assert!(parse_embedding_response(json, 2).is_err());
	}
}
