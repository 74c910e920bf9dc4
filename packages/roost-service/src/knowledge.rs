use uuid::Uuid;

use roost_domain::knowledge::KnowledgeDocument;
use roost_storage::qdrant::KnowledgePoint;

use crate::{ConciergeService, Result};

impl ConciergeService {
	pub async fn ensure_knowledge_collection(&self) -> Result<()> {
		self.index.ensure_collection().await?;

		Ok(())
	}

	/// Embeds and upserts the documents. Each document is embedded
	/// independently: a failed or mis-sized embedding is logged and that
	/// document skipped, never aborting the batch. Returns the number of
	/// documents actually written.
	pub async fn index_documents(&self, documents: &[KnowledgeDocument]) -> Result<usize> {
		if documents.is_empty() {
			return Ok(0);
		}

		let expected_dim = self.cfg.storage.qdrant.vector_dim as usize;
		let mut points = Vec::with_capacity(documents.len());

		for document in documents {
			let texts = [document.text.clone()];
			let vector = match self
				.providers
				.embedding
				.embed(&self.cfg.providers.embedding, &texts)
				.await
			{
				Ok(mut vectors) if !vectors.is_empty() => vectors.swap_remove(0),
				Ok(_) => {
					tracing::warn!(
						source = document.source.as_str(),
						"Embedding provider returned no vector. Document skipped."
					);

					continue;
				},
				Err(err) => {
					tracing::warn!(
						error = %err,
						source = document.source.as_str(),
						"Embedding failed. Document skipped."
					);

					continue;
				},
			};

			if vector.len() != expected_dim {
				tracing::warn!(
					source = document.source.as_str(),
					got = vector.len(),
					expected = expected_dim,
					"Embedding dimension mismatch. Document skipped."
				);

				continue;
			}

			points.push(KnowledgePoint {
				id: point_id(&document.text),
				vector,
				content: document.text.clone(),
				source: document.source,
			});
		}

		if points.is_empty() {
			return Ok(0);
		}

		let count = points.len();

		self.index.upsert(points).await?;

		Ok(count)
	}

	/// Similarity hits for the query. Returns an empty vec - never an
	/// error - when embedding or the vector query fails, so callers can
	/// always fall back.
	pub async fn search_knowledge(
		&self,
		query: &str,
		limit: u64,
		score_threshold: f32,
	) -> Vec<String> {
		let texts = [query.to_string()];
		let vector = match self
			.providers
			.embedding
			.embed(&self.cfg.providers.embedding, &texts)
			.await
		{
			Ok(mut vectors) if !vectors.is_empty() => vectors.swap_remove(0),
			Ok(_) => {
				tracing::warn!("Embedding provider returned no query vector. Search skipped.");

				return Vec::new();
			},
			Err(err) => {
				tracing::warn!(error = %err, "Query embedding failed. Search skipped.");

				return Vec::new();
			},
		};

		match self.index.search(vector, limit, score_threshold).await {
			Ok(hits) => hits,
			Err(err) => {
				tracing::warn!(error = %err, "Knowledge search failed. Returning no context.");

				Vec::new()
			},
		}
	}
}

/// Content-derived point id: unchanged text maps to the same point, so a
/// re-sync overwrites instead of accumulating duplicates.
fn point_id(text: &str) -> Uuid {
	Uuid::new_v5(&Uuid::NAMESPACE_OID, text.as_bytes())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn point_ids_are_stable_per_content() {
		assert_eq!(point_id("Q: Pets?\nA: Yes."), point_id("Q: Pets?\nA: Yes."));
		assert_ne!(point_id("Q: Pets?\nA: Yes."), point_id("Q: Pets?\nA: No."));
	}
}
