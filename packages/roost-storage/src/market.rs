use serde_json::Value;
use sqlx::PgPool;
use time::OffsetDateTime;

use roost_domain::audit::ToolInvocationRecord;

use crate::{Error, Result, models::CatalogListing};

/// Keyset-paginated slice of the active public catalog, ordered by id.
pub async fn catalog_page(pool: &PgPool, after_id: i64, limit: i64) -> Result<Vec<CatalogListing>> {
	let listings = sqlx::query_as::<_, CatalogListing>(
		"\
SELECT
	listing_id,
	title,
	city,
	description,
	nightly_rate::float8 AS nightly_rate,
	amenities
FROM listings
WHERE is_active AND listing_id > $1
ORDER BY listing_id
LIMIT $2",
	)
	.bind(after_id)
	.bind(limit)
	.fetch_all(pool)
	.await?;

	Ok(listings)
}

/// Booking joined to its guest and listing, scoped to `(booking_id,
/// guest_id)`. Cancelled bookings are excluded so a repeated cancellation
/// reads nothing.
pub async fn booking_snapshot(
	pool: &PgPool,
	booking_id: i64,
	guest_id: &str,
) -> Result<Option<Value>> {
	let snapshot = sqlx::query_scalar::<_, Value>(
		"\
SELECT row_to_json(t)
FROM (
	SELECT
		b.booking_id,
		b.status,
		b.check_in::text AS check_in,
		b.check_out::text AS check_out,
		u.email AS guest_email,
		u.display_name AS guest_name,
		l.title AS listing_title,
		l.city AS listing_city
	FROM bookings b
	JOIN users u ON u.user_id = b.guest_id
	JOIN listings l ON l.listing_id = b.listing_id
	WHERE b.booking_id = $1
		AND b.guest_id = $2
		AND b.status <> 'cancelled'
) t",
	)
	.bind(booking_id)
	.bind(guest_id)
	.fetch_optional(pool)
	.await?;

	Ok(snapshot)
}

/// Scoped cancellation. The WHERE clause re-verifies ownership and status
/// so a stale snapshot cannot cancel another guest's booking twice.
pub async fn cancel_booking(
	pool: &PgPool,
	booking_id: i64,
	guest_id: &str,
	reason: &str,
	now: OffsetDateTime,
) -> Result<u64> {
	let result = sqlx::query(
		"\
UPDATE bookings
SET status = 'cancelled',
	cancelled_at = $3,
	cancellation_reason = $4
WHERE booking_id = $1
	AND guest_id = $2
	AND status <> 'cancelled'",
	)
	.bind(booking_id)
	.bind(guest_id)
	.bind(now)
	.bind(reason)
	.execute(pool)
	.await?;

	Ok(result.rows_affected())
}

/// Runs an approved read-only query and returns its rows as one JSON
/// array. The json_agg wrapper serializes rows uniformly and pins the
/// statement to a single SELECT shape.
pub async fn select_rows(pool: &PgPool, query: &str) -> Result<Value> {
	let wrapped = wrap_rows_query(query)?;
	let rows = sqlx::query_scalar::<_, Value>(&wrapped).fetch_one(pool).await?;

	Ok(rows)
}

pub async fn insert_invocation(pool: &PgPool, record: &ToolInvocationRecord) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO tool_invocations (
	invocation_id,
	actor_id,
	tool_name,
	function_name,
	arguments,
	result,
	is_error,
	error_message,
	duration_ms,
	created_at
)
VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10)",
	)
	.bind(record.invocation_id)
	.bind(record.actor_id.as_deref())
	.bind(record.tool_name.as_str())
	.bind(record.function_name.as_str())
	.bind(&record.arguments)
	.bind(record.result.as_ref())
	.bind(record.is_error)
	.bind(record.error_message.as_deref())
	.bind(record.duration_ms)
	.bind(record.created_at)
	.execute(pool)
	.await?;

	Ok(())
}

fn wrap_rows_query(query: &str) -> Result<String> {
	let trimmed = query.trim().trim_end_matches(';').trim();

	if trimmed.is_empty() {
		return Err(Error::InvalidArgument("Query must be non-empty.".to_string()));
	}
	if trimmed.contains(';') {
		return Err(Error::InvalidArgument(
			"Only a single SELECT statement may be executed.".to_string(),
		));
	}

	Ok(format!("SELECT coalesce(json_agg(t), '[]'::json) FROM ({trimmed}) t"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn wraps_queries_in_a_json_agg_select() {
		let wrapped = wrap_rows_query("SELECT title FROM listings;").expect("wrap failed");

		assert_eq!(
			wrapped,
			"SELECT coalesce(json_agg(t), '[]'::json) FROM (SELECT title FROM listings) t"
		);
	}

	#[test]
	fn rejects_statement_batches() {
		assert!(wrap_rows_query("SELECT 1; DROP TABLE listings").is_err());
		assert!(wrap_rows_query("   ").is_err());
	}
}
