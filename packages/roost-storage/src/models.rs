use sqlx::FromRow;

/// One public catalog row, as indexed into the knowledge base.
#[derive(Clone, Debug, FromRow)]
pub struct CatalogListing {
	pub listing_id: i64,
	pub title: String,
	pub city: String,
	pub description: Option<String>,
	pub nightly_rate: f64,
	pub amenities: Option<Vec<String>>,
}
