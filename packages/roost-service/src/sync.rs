use std::{io, sync::Arc};

use tokio::sync::Semaphore;

use roost_domain::knowledge::{KnowledgeDocument, RuleRecord};
use roost_storage::models::CatalogListing;

use crate::{ConciergeService, Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
	Indexed { documents: usize },
	Skipped,
	Failed,
}

/// Merges the curated rules file and the live catalog into the knowledge
/// collection. Both the interval timer and the rules-file watcher funnel
/// into `sync()`; the single-permit slot guarantees at most one pass in
/// flight per coordinator.
pub struct SyncCoordinator {
	service: Arc<ConciergeService>,
	slot: Semaphore,
}
impl SyncCoordinator {
	pub fn new(service: Arc<ConciergeService>) -> Self {
		Self { service, slot: Semaphore::new(1) }
	}

	/// Skip-if-busy, never queue: a missed pass is cheap (the next trigger
	/// retries), a pile-up of passes is not. Source-read and index errors
	/// are logged here and end the pass.
	pub async fn sync(&self) -> SyncOutcome {
		let Ok(_permit) = self.slot.try_acquire() else {
			tracing::info!("Knowledge sync already in flight. Trigger skipped.");

			return SyncOutcome::Skipped;
		};

		match self.run_pass().await {
			Ok(documents) => {
				tracing::info!(documents, "Knowledge sync completed.");

				SyncOutcome::Indexed { documents }
			},
			Err(err) => {
				tracing::error!(error = %err, "Knowledge sync failed.");

				SyncOutcome::Failed
			},
		}
	}

	async fn run_pass(&self) -> Result<usize> {
		let mut documents = Vec::new();

		documents.extend(self.policy_documents().await?);
		documents.extend(self.catalog_documents().await?);

		self.service.index_documents(&documents).await
	}

	async fn policy_documents(&self) -> Result<Vec<KnowledgeDocument>> {
		let Some(path) = self.service.cfg.knowledge.rules_path.as_ref() else {
			return Ok(Vec::new());
		};
		let raw = match tokio::fs::read_to_string(path).await {
			Ok(raw) => raw,
			Err(err) if err.kind() == io::ErrorKind::NotFound => {
				tracing::info!(path = %path.display(), "Rules file absent. Skipping policy source.");

				return Ok(Vec::new());
			},
			Err(err) => return Err(Error::ReadRules { path: path.clone(), source: err }),
		};
		let records: Vec<RuleRecord> =
			serde_json::from_str(&raw).map_err(|err| Error::InvalidRequest {
				message: format!("Rules file is not valid JSON: {err}."),
			})?;

		Ok(records.iter().map(|record| KnowledgeDocument::policy(record.render())).collect())
	}

	async fn catalog_documents(&self) -> Result<Vec<KnowledgeDocument>> {
		let page_size = self.service.cfg.knowledge.catalog_page_size;
		let mut documents = Vec::new();
		let mut after_id = 0_i64;

		loop {
			let page = self.service.market.catalog_page(after_id, page_size).await?;
			let Some(last) = page.last() else {
				break;
			};

			after_id = last.listing_id;

			let full_page = page.len() as i64 == page_size;

			documents.extend(
				page.into_iter()
					.map(|listing| KnowledgeDocument::catalog(listing_document(&listing))),
			);

			if !full_page {
				break;
			}
		}

		Ok(documents)
	}
}

/// Catalog text as embedded for retrieval.
fn listing_document(listing: &CatalogListing) -> String {
	let mut text = format!(
		"Listing: {} in {} - {:.0} per night.",
		listing.title, listing.city, listing.nightly_rate,
	);

	if let Some(description) =
		listing.description.as_deref().map(str::trim).filter(|description| !description.is_empty())
	{
		text.push(' ');
		text.push_str(description);
	}
	if let Some(amenities) = listing.amenities.as_ref().filter(|amenities| !amenities.is_empty()) {
		text.push_str(" Amenities: ");
		text.push_str(&amenities.join(", "));
		text.push('.');
	}

	text
}

#[cfg(test)]
mod tests {
	use super::*;

	fn listing() -> CatalogListing {
		CatalogListing {
			listing_id: 7,
			title: "Sea cottage".to_string(),
			city: "Nazare".to_string(),
			description: Some("  Two bedrooms over the cliff.  ".to_string()),
			nightly_rate: 140.0,
			amenities: Some(vec!["wifi".to_string(), "parking".to_string()]),
		}
	}

	#[test]
	fn renders_a_full_listing_document() {
		assert_eq!(
			listing_document(&listing()),
			"Listing: Sea cottage in Nazare - 140 per night. Two bedrooms over the cliff. \
			 Amenities: wifi, parking.",
		);
	}

	#[test]
	fn omits_empty_description_and_amenities() {
		let mut listing = listing();

		listing.description = Some("   ".to_string());
		listing.amenities = None;

		assert_eq!(listing_document(&listing), "Listing: Sea cottage in Nazare - 140 per night.");
	}
}
