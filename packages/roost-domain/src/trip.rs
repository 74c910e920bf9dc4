use serde::{Deserialize, Serialize};
use time::Date;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BudgetTier {
	Economy,
	Standard,
	Premium,
}
impl BudgetTier {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Economy => "economy",
			Self::Standard => "standard",
			Self::Premium => "premium",
		}
	}
}

#[derive(Clone, Debug)]
pub struct TripRequest {
	pub destination: String,
	pub start_date: Date,
	pub end_date: Date,
	pub travelers: u32,
	pub interests: Vec<String>,
	pub budget: BudgetTier,
}
impl TripRequest {
	/// Whole nights between the dates, floored at one so a same-day or
	/// inverted range still produces a plannable trip.
	pub fn nights(&self) -> i64 {
		(self.end_date - self.start_date).whole_days().max(1)
	}
}

#[derive(Clone, Debug, Serialize)]
pub struct TripDay {
	pub day: u32,
	pub theme: String,
	pub activities: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HotelOffer {
	pub name: String,
	pub address: Option<String>,
	pub nightly_rate: Option<f64>,
	pub rating: Option<f64>,
	pub url: Option<String>,
}

/// The enrichment workflow's response. Always well-formed: a failed
/// content generation degrades to a fallback title and summary, a failed
/// hotel fetch degrades to an empty offer list.
#[derive(Clone, Debug, Serialize)]
pub struct TripPlan {
	pub title: String,
	pub summary: String,
	pub nights: i64,
	pub days: Vec<TripDay>,
	pub hotels: Vec<HotelOffer>,
}
