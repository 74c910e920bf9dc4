use serde_json::Value;
use time::Date;

use roost_domain::trip::HotelOffer;

use crate::{Error, Result};

/// Searches the external hotel-offer API. A malformed offer in the
/// response is skipped rather than failing the whole result set.
pub async fn search(
	cfg: &roost_config::HotelProviderConfig,
	destination: &str,
	check_in: Date,
	check_out: Date,
	guests: u32,
) -> Result<Vec<HotelOffer>> {
	let client = crate::http_client(cfg.timeout_ms)?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"destination": destination,
		"check_in": check_in.to_string(),
		"check_out": check_out.to_string(),
		"guests": guests,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_offer_response(json)
}

fn parse_offer_response(json: Value) -> Result<Vec<HotelOffer>> {
	let items = json
		.get("offers")
		.or_else(|| json.get("results"))
		.and_then(Value::as_array)
		.ok_or_else(|| Error::InvalidResponse {
			message: "Hotel response is missing the offers array.".to_string(),
		})?;
	let mut offers = Vec::with_capacity(items.len());

	for item in items {
		match serde_json::from_value::<HotelOffer>(item.clone()) {
			Ok(offer) if !offer.name.trim().is_empty() => offers.push(offer),
			Ok(_) | Err(_) => {},
		}
	}

	Ok(offers)
}
