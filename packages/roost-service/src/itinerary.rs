use serde_json::Value;

use roost_domain::trip::{HotelOffer, TripDay, TripPlan, TripRequest};
use roost_providers::chat::ModelProfile;

use crate::{ConciergeService, Result, postprocess};

impl ConciergeService {
	/// Plans a trip by fanning out to content generation and hotel search
	/// concurrently and merging whatever arrives. Latency is bounded by
	/// the slowest fetch, and the response is usable even when one side
	/// fails: content degrades to fallback copy, hotels to an empty list.
	pub async fn plan_trip(&self, req: &TripRequest) -> Result<TripPlan> {
		let nights = req.nights();
		let content = self.generate_trip_content(req, nights);
		let hotels = self.fetch_hotel_offers(req);
		let (content, hotels) = tokio::join!(content, hotels);
		let parsed = match content {
			Ok(raw) => parse_trip_content(&raw),
			Err(err) => {
				tracing::warn!(
					error = %err,
					destination = %req.destination,
					"Trip content generation failed. Using fallback copy."
				);

				None
			},
		};
		let (title, summary, days) = parsed.unwrap_or_else(|| fallback_content(req, nights));

		Ok(TripPlan { title, summary, nights, days, hotels })
	}

	/// Raw model output for the trip narrative; `plan_trip` parses it
	/// defensively.
	pub async fn generate_trip_content(&self, req: &TripRequest, nights: i64) -> Result<String> {
		let arguments = serde_json::json!({
			"destination": req.destination,
			"nights": nights,
			"travelers": req.travelers,
			"budget": req.budget.as_str(),
		});

		self.observed("generate_trip_content", None, arguments, async {
			let system = "You plan trips for Roost guests. Respond with raw JSON only - no \
				markdown fences, no commentary - shaped as {\"title\": string, \"summary\": \
				string, \"days\": [{\"day\": number, \"theme\": string, \"activities\": \
				[string]}]}.";
			let user = format!(
				"Destination: {}\nDates: {} to {} ({} nights)\nTravelers: {}\nInterests: \
				 {}\nBudget tier: {}",
				req.destination,
				req.start_date,
				req.end_date,
				nights,
				req.travelers,
				if req.interests.is_empty() {
					"(none given)".to_string()
				} else {
					req.interests.join(", ")
				},
				req.budget.as_str(),
			);
			let raw = self
				.providers
				.chat
				.complete(&self.cfg.providers.chat, ModelProfile::Deliberate, system, &user)
				.await?;

			Ok(raw)
		})
		.await
	}

	async fn fetch_hotel_offers(&self, req: &TripRequest) -> Vec<HotelOffer> {
		match self
			.providers
			.hotels
			.search(
				&self.cfg.providers.hotels,
				&req.destination,
				req.start_date,
				req.end_date,
				req.travelers,
			)
			.await
		{
			Ok(offers) => offers,
			Err(err) => {
				tracing::warn!(
					error = %err,
					destination = %req.destination,
					"Hotel search failed. Continuing without offers."
				);

				Vec::new()
			},
		}
	}
}

/// Case-insensitive field extraction over whatever JSON the model
/// produced. Returns None when no usable title is present, which sends
/// the whole plan to fallback copy.
fn parse_trip_content(raw: &str) -> Option<(String, String, Vec<TripDay>)> {
	let cleaned = postprocess::strip_code_fences(raw);
	let json: Value = serde_json::from_str(&cleaned).ok()?;
	let title = text_field(&json, "title")?;
	let summary = text_field(&json, "summary").unwrap_or_default();
	let days = field(&json, "days")
		.and_then(Value::as_array)
		.map(|items| items.iter().filter_map(parse_day).collect())
		.unwrap_or_default();

	Some((title, summary, days))
}

fn parse_day(item: &Value) -> Option<TripDay> {
	let day = field(item, "day").and_then(Value::as_u64)? as u32;
	let theme = text_field(item, "theme")?;
	let activities = field(item, "activities")
		.and_then(Value::as_array)
		.map(|values| {
			values
				.iter()
				.filter_map(Value::as_str)
				.map(str::trim)
				.filter(|activity| !activity.is_empty())
				.map(str::to_string)
				.collect()
		})
		.unwrap_or_default();

	Some(TripDay { day, theme, activities })
}

fn field<'a>(object: &'a Value, name: &str) -> Option<&'a Value> {
	object
		.as_object()?
		.iter()
		.find(|(key, _)| key.eq_ignore_ascii_case(name))
		.map(|(_, value)| value)
}

fn text_field(object: &Value, name: &str) -> Option<String> {
	field(object, name)
		.and_then(Value::as_str)
		.map(str::trim)
		.filter(|value| !value.is_empty())
		.map(str::to_string)
}

fn fallback_content(req: &TripRequest, nights: i64) -> (String, String, Vec<TripDay>) {
	(
		format!("Your {} getaway", req.destination),
		format!("A {nights}-night stay in {} for {} travelers.", req.destination, req.travelers),
		Vec::new(),
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_fields_case_insensitively() {
		let raw = r#"{"Title": "Porto on foot", "SUMMARY": "Walkable days.", "Days": [
			{"Day": 1, "Theme": "Ribeira", "Activities": ["Walk the quay", " Port tasting "]}
		]}"#;
		let (title, summary, days) = parse_trip_content(raw).expect("parse failed");

		assert_eq!(title, "Porto on foot");
		assert_eq!(summary, "Walkable days.");
		assert_eq!(days.len(), 1);
		assert_eq!(days[0].activities, vec!["Walk the quay".to_string(), "Port tasting".to_string()]);
	}

	#[test]
	fn rejects_output_without_a_title() {
		assert!(parse_trip_content(r#"{"summary": "no title here"}"#).is_none());
		assert!(parse_trip_content("not json at all").is_none());
	}

	#[test]
	fn skips_malformed_days() {
		let raw = r#"{"title": "T", "days": [{"day": "one"}, {"day": 2, "theme": "Food"}]}"#;
		let (_, _, days) = parse_trip_content(raw).expect("parse failed");

		assert_eq!(days.len(), 1);
		assert_eq!(days[0].day, 2);
	}
}
