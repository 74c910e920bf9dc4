pub const CONTENT_PAYLOAD_KEY: &str = "content";
pub const SOURCE_PAYLOAD_KEY: &str = "source";

use std::collections::HashMap;

use qdrant_client::{
	client::Payload,
	qdrant::{
		CreateCollectionBuilder, Distance, PointStruct, Query, QueryPointsBuilder,
		UpsertPointsBuilder, Value, VectorParamsBuilder, value::Kind,
	},
};
use uuid::Uuid;

use roost_domain::knowledge::KnowledgeSource;

use crate::Result;

/// One embedded document headed for the collection. The id is derived
/// from the document text upstream, so re-upserting unchanged text
/// overwrites its point instead of appending a duplicate.
pub struct KnowledgePoint {
	pub id: Uuid,
	pub vector: Vec<f32>,
	pub content: String,
	pub source: KnowledgeSource,
}

pub struct QdrantStore {
	pub client: qdrant_client::Qdrant,
	pub collection: String,
	pub vector_dim: u32,
}
impl QdrantStore {
	pub fn new(cfg: &roost_config::Qdrant) -> Result<Self> {
		let client = qdrant_client::Qdrant::from_url(&cfg.url).build()?;

		Ok(Self { client, collection: cfg.collection.clone(), vector_dim: cfg.vector_dim })
	}

	/// Idempotent creation: checks existence first and tolerates losing a
	/// concurrent first-time initialization race.
	pub async fn ensure_collection(&self) -> Result<()> {
		if self.client.collection_exists(self.collection.as_str()).await? {
			return Ok(());
		}

		let builder = CreateCollectionBuilder::new(self.collection.clone())
			.vectors_config(VectorParamsBuilder::new(self.vector_dim as u64, Distance::Cosine));

		if let Err(err) = self.client.create_collection(builder).await {
			if self.client.collection_exists(self.collection.as_str()).await? {
				return Ok(());
			}

			return Err(err.into());
		}

		Ok(())
	}

	pub async fn upsert(&self, points: Vec<KnowledgePoint>) -> Result<()> {
		let points = points
			.into_iter()
			.map(|point| {
				let mut payload = HashMap::new();

				payload.insert(CONTENT_PAYLOAD_KEY.to_string(), Value::from(point.content));
				payload.insert(
					SOURCE_PAYLOAD_KEY.to_string(),
					Value::from(point.source.as_str().to_string()),
				);

				PointStruct::new(point.id.to_string(), point.vector, Payload::from(payload))
			})
			.collect::<Vec<_>>();
		let upsert = UpsertPointsBuilder::new(self.collection.clone(), points).wait(true);

		self.client.upsert_points(upsert).await?;

		Ok(())
	}

	/// Nearest-neighbour lookup returning each hit's content payload.
	pub async fn search(
		&self,
		vector: Vec<f32>,
		limit: u64,
		score_threshold: f32,
	) -> Result<Vec<String>> {
		let query = QueryPointsBuilder::new(self.collection.clone())
			.query(Query::new_nearest(vector))
			.with_payload(true)
			.limit(limit)
			.score_threshold(score_threshold);
		let response = self.client.query(query).await?;
		let mut hits = Vec::with_capacity(response.result.len());

		for point in response.result {
			let Some(value) = point.payload.get(CONTENT_PAYLOAD_KEY) else {
				continue;
			};

			if let Some(Kind::StringValue(content)) = &value.kind {
				hits.push(content.clone());
			}
		}

		Ok(hits)
	}
}
