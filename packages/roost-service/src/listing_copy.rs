use roost_providers::chat::ModelProfile;

use crate::{ConciergeService, Result, postprocess};

/// Declared output contract between the prompt and the post-processing.
pub const VARIANT_DELIMITER: &str = "|||";

impl ConciergeService {
	/// Drafts marketing copy variants for a listing. The model is asked
	/// for delimiter-separated variants; the split is defensive since its
	/// instruction-following is not trusted.
	pub async fn draft_listing_copy(
		&self,
		title: &str,
		city: &str,
		amenities: &[String],
	) -> Result<Vec<String>> {
		let arguments = serde_json::json!({
			"title": title,
			"city": city,
			"amenities": amenities,
		});

		self.observed("draft_listing_copy", None, arguments, async {
			let variants = self.cfg.agent.copy_variants;
			let system = format!(
				"You write short, warm, factual marketing copy for vacation listings. Return \
				 exactly {variants} variants separated by the delimiter \"{VARIANT_DELIMITER}\", \
				 and nothing else. Do not invent amenities."
			);
			let user = format!(
				"Listing: {title}\nCity: {city}\nAmenities: {}",
				if amenities.is_empty() { "(none listed)".to_string() } else { amenities.join(", ") },
			);
			let raw = self
				.providers
				.chat
				.complete(&self.cfg.providers.chat, ModelProfile::Deliberate, &system, &user)
				.await?;

			Ok(split_variants(&raw))
		})
		.await
	}
}

/// A missing delimiter degrades to one variant holding the whole trimmed
/// text; this never fails.
fn split_variants(raw: &str) -> Vec<String> {
	let cleaned = postprocess::strip_code_fences(raw);
	let variants = cleaned
		.split(VARIANT_DELIMITER)
		.map(str::trim)
		.filter(|variant| !variant.is_empty())
		.map(str::to_string)
		.collect::<Vec<_>>();

	if variants.is_empty() { vec![cleaned.trim().to_string()] } else { variants }
}
