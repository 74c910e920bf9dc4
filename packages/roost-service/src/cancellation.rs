use serde_json::Value;
use time::OffsetDateTime;

use crate::{ConciergeService, Error, Result};

struct BookingDetails {
	guest_email: String,
	guest_name: String,
	listing_title: String,
	check_in: String,
}

impl ConciergeService {
	/// Cancels a booking on the guest's behalf: scoped read, defensive
	/// parse, ownership-re-verifying write, then a best-effort
	/// notification email that cannot roll the cancellation back. The
	/// summary string is written for the calling model, not for machines.
	pub async fn cancel_booking(
		&self,
		booking_id: i64,
		actor_id: &str,
		reason: &str,
	) -> Result<String> {
		let arguments = serde_json::json!({
			"booking_id": booking_id,
			"actor_id": actor_id,
			"reason": reason,
		});

		self.observed("cancel_booking", Some(actor_id), arguments, async {
			let Some(snapshot) = self.market.booking_snapshot(booking_id, actor_id).await? else {
				return Ok(format!(
					"Booking #{booking_id} was not found for this guest, or is already \
					 cancelled. Nothing was changed."
				));
			};
			let details = parse_details(&snapshot)?;
			let updated = self
				.market
				.cancel_booking(booking_id, actor_id, reason, OffsetDateTime::now_utc())
				.await?;

			if updated == 0 {
				// The row changed between the read and the write.
				return Ok(format!(
					"Booking #{booking_id} was not found in a cancellable state any more. \
					 Nothing was changed."
				));
			}

			let subject = format!("Your booking for {} is cancelled", details.listing_title);
			let html_body = cancellation_email(&details, booking_id, reason);
			let email_note = match self
				.providers
				.email
				.send(&self.cfg.providers.email, &details.guest_email, &subject, &html_body)
				.await
			{
				Ok(()) => format!("A confirmation email was sent to {}.", details.guest_email),
				Err(err) => {
					tracing::warn!(error = %err, booking_id, "Cancellation email failed.");

					"The confirmation email could not be sent.".to_string()
				},
			};

			Ok(format!(
				"Booking #{booking_id} ({} for {}, check-in {}) has been cancelled. {email_note}",
				details.listing_title, details.guest_name, details.check_in,
			))
		})
		.await
	}
}

fn parse_details(snapshot: &Value) -> Result<BookingDetails> {
	Ok(BookingDetails {
		guest_email: text_field(snapshot, "guest_email")?,
		guest_name: text_field(snapshot, "guest_name")?,
		listing_title: text_field(snapshot, "listing_title")?,
		check_in: text_field(snapshot, "check_in")?,
	})
}

fn text_field(snapshot: &Value, name: &str) -> Result<String> {
	snapshot
		.get(name)
		.and_then(Value::as_str)
		.filter(|value| !value.trim().is_empty())
		.map(str::to_string)
		.ok_or_else(|| Error::MalformedRecord {
			message: format!("Booking record is missing the {name} field."),
		})
}

fn cancellation_email(details: &BookingDetails, booking_id: i64, reason: &str) -> String {
	format!(
		"<p>Hi {},</p>\
		 <p>Your booking #{booking_id} for <strong>{}</strong> (check-in {}) has been \
		 cancelled.</p>\
		 <p>Reason: {}</p>\
		 <p>The Roost team</p>",
		details.guest_name, details.listing_title, details.check_in, reason,
	)
}
