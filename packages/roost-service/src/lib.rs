pub mod answers;
pub mod audit;
pub mod cancellation;
pub mod itinerary;
pub mod knowledge;
pub mod listing_copy;
pub mod lookup;
pub mod outreach;
pub mod sync;

mod error;
mod postprocess;

pub use error::{Error, Result};

pub use audit::AuditPipeline;
pub use sync::{SyncCoordinator, SyncOutcome};

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;
use sqlx::PgPool;
use time::{Date, OffsetDateTime};

use roost_config::{
	ChatProviderConfig, Config, EmailProviderConfig, EmbeddingProviderConfig, HotelProviderConfig,
};
use roost_domain::{audit::ToolInvocationRecord, trip::HotelOffer};
use roost_providers::chat::ModelProfile;
use roost_storage::{
	db::Db,
	market,
	models::CatalogListing,
	qdrant::{KnowledgePoint, QdrantStore},
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, roost_providers::Result<Vec<Vec<f32>>>>;
}

pub trait ChatProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a ChatProviderConfig,
		profile: ModelProfile,
		system: &'a str,
		user: &'a str,
	) -> BoxFuture<'a, roost_providers::Result<String>>;
}

pub trait EmailProvider
where
	Self: Send + Sync,
{
	fn send<'a>(
		&'a self,
		cfg: &'a EmailProviderConfig,
		to: &'a str,
		subject: &'a str,
		html_body: &'a str,
	) -> BoxFuture<'a, roost_providers::Result<()>>;
}

pub trait HotelProvider
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		cfg: &'a HotelProviderConfig,
		destination: &'a str,
		check_in: Date,
		check_out: Date,
		guests: u32,
	) -> BoxFuture<'a, roost_providers::Result<Vec<HotelOffer>>>;
}

pub trait VectorIndex
where
	Self: Send + Sync,
{
	fn ensure_collection<'a>(&'a self) -> BoxFuture<'a, roost_storage::Result<()>>;
	fn upsert<'a>(&'a self, points: Vec<KnowledgePoint>) -> BoxFuture<'a, roost_storage::Result<()>>;
	fn search<'a>(
		&'a self,
		vector: Vec<f32>,
		limit: u64,
		score_threshold: f32,
	) -> BoxFuture<'a, roost_storage::Result<Vec<String>>>;
}

pub trait MarketStore
where
	Self: Send + Sync,
{
	fn catalog_page<'a>(
		&'a self,
		after_id: i64,
		limit: i64,
	) -> BoxFuture<'a, roost_storage::Result<Vec<CatalogListing>>>;
	fn booking_snapshot<'a>(
		&'a self,
		booking_id: i64,
		guest_id: &'a str,
	) -> BoxFuture<'a, roost_storage::Result<Option<Value>>>;
	fn cancel_booking<'a>(
		&'a self,
		booking_id: i64,
		guest_id: &'a str,
		reason: &'a str,
		now: OffsetDateTime,
	) -> BoxFuture<'a, roost_storage::Result<u64>>;
	fn select_rows<'a>(&'a self, query: &'a str) -> BoxFuture<'a, roost_storage::Result<Value>>;
}

pub trait AuditSink
where
	Self: Send + Sync,
{
	fn save<'a>(
		&'a self,
		record: &'a ToolInvocationRecord,
	) -> BoxFuture<'a, roost_storage::Result<()>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub chat: Arc<dyn ChatProvider>,
	pub email: Arc<dyn EmailProvider>,
	pub hotels: Arc<dyn HotelProvider>,
}

/// The agentic concierge runtime: the vector knowledge store, the agent
/// tools, the audit pipeline, and the trip planner, over pluggable
/// collaborators.
pub struct ConciergeService {
	pub cfg: Config,
	pub providers: Providers,
	pub index: Arc<dyn VectorIndex>,
	pub market: Arc<dyn MarketStore>,
	pub audit: AuditPipeline,
}

struct DefaultProviders;

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, roost_providers::Result<Vec<Vec<f32>>>> {
		Box::pin(roost_providers::embedding::embed(cfg, texts))
	}
}

impl ChatProvider for DefaultProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a ChatProviderConfig,
		profile: ModelProfile,
		system: &'a str,
		user: &'a str,
	) -> BoxFuture<'a, roost_providers::Result<String>> {
		Box::pin(roost_providers::chat::complete(cfg, profile, system, user))
	}
}

impl EmailProvider for DefaultProviders {
	fn send<'a>(
		&'a self,
		cfg: &'a EmailProviderConfig,
		to: &'a str,
		subject: &'a str,
		html_body: &'a str,
	) -> BoxFuture<'a, roost_providers::Result<()>> {
		Box::pin(roost_providers::email::send(cfg, to, subject, html_body))
	}
}

impl HotelProvider for DefaultProviders {
	fn search<'a>(
		&'a self,
		cfg: &'a HotelProviderConfig,
		destination: &'a str,
		check_in: Date,
		check_out: Date,
		guests: u32,
	) -> BoxFuture<'a, roost_providers::Result<Vec<HotelOffer>>> {
		Box::pin(roost_providers::hotels::search(cfg, destination, check_in, check_out, guests))
	}
}

/// The Qdrant-backed vector index used outside tests.
pub struct QdrantVectorIndex {
	store: QdrantStore,
}
impl QdrantVectorIndex {
	pub fn new(store: QdrantStore) -> Self {
		Self { store }
	}
}
impl VectorIndex for QdrantVectorIndex {
	fn ensure_collection<'a>(&'a self) -> BoxFuture<'a, roost_storage::Result<()>> {
		Box::pin(self.store.ensure_collection())
	}

	fn upsert<'a>(&'a self, points: Vec<KnowledgePoint>) -> BoxFuture<'a, roost_storage::Result<()>> {
		Box::pin(self.store.upsert(points))
	}

	fn search<'a>(
		&'a self,
		vector: Vec<f32>,
		limit: u64,
		score_threshold: f32,
	) -> BoxFuture<'a, roost_storage::Result<Vec<String>>> {
		Box::pin(self.store.search(vector, limit, score_threshold))
	}
}

/// The Postgres-backed market store and audit sink used outside tests.
pub struct PgMarket {
	pool: PgPool,
}
impl PgMarket {
	pub fn new(pool: PgPool) -> Self {
		Self { pool }
	}
}
impl MarketStore for PgMarket {
	fn catalog_page<'a>(
		&'a self,
		after_id: i64,
		limit: i64,
	) -> BoxFuture<'a, roost_storage::Result<Vec<CatalogListing>>> {
		Box::pin(market::catalog_page(&self.pool, after_id, limit))
	}

	fn booking_snapshot<'a>(
		&'a self,
		booking_id: i64,
		guest_id: &'a str,
	) -> BoxFuture<'a, roost_storage::Result<Option<Value>>> {
		Box::pin(market::booking_snapshot(&self.pool, booking_id, guest_id))
	}

	fn cancel_booking<'a>(
		&'a self,
		booking_id: i64,
		guest_id: &'a str,
		reason: &'a str,
		now: OffsetDateTime,
	) -> BoxFuture<'a, roost_storage::Result<u64>> {
		Box::pin(market::cancel_booking(&self.pool, booking_id, guest_id, reason, now))
	}

	fn select_rows<'a>(&'a self, query: &'a str) -> BoxFuture<'a, roost_storage::Result<Value>> {
		Box::pin(market::select_rows(&self.pool, query))
	}
}
impl AuditSink for PgMarket {
	fn save<'a>(
		&'a self,
		record: &'a ToolInvocationRecord,
	) -> BoxFuture<'a, roost_storage::Result<()>> {
		Box::pin(market::insert_invocation(&self.pool, record))
	}
}

impl Providers {
	pub fn new(
		embedding: Arc<dyn EmbeddingProvider>,
		chat: Arc<dyn ChatProvider>,
		email: Arc<dyn EmailProvider>,
		hotels: Arc<dyn HotelProvider>,
	) -> Self {
		Self { embedding, chat, email, hotels }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self {
			embedding: provider.clone(),
			chat: provider.clone(),
			email: provider.clone(),
			hotels: provider,
		}
	}
}

impl ConciergeService {
	/// Wires the default Postgres and Qdrant collaborators. Must run inside
	/// a tokio runtime (the audit writer is spawned at construction).
	pub fn new(cfg: Config, db: &Db, qdrant: QdrantStore) -> Self {
		let market = Arc::new(PgMarket::new(db.pool.clone()));

		Self {
			providers: Providers::default(),
			index: Arc::new(QdrantVectorIndex::new(qdrant)),
			audit: AuditPipeline::new(market.clone()),
			market,
			cfg,
		}
	}

	pub fn with_collaborators(
		cfg: Config,
		providers: Providers,
		index: Arc<dyn VectorIndex>,
		market: Arc<dyn MarketStore>,
		audit_sink: Arc<dyn AuditSink>,
	) -> Self {
		Self { cfg, providers, index, market, audit: AuditPipeline::new(audit_sink) }
	}
}
