use crate::{ConciergeService, Result};

impl ConciergeService {
	/// Direct pass-through to the email capability so the agent has a
	/// callable outbound side effect. No business logic lives here.
	pub async fn send_guest_email(
		&self,
		to: &str,
		subject: &str,
		html_body: &str,
	) -> Result<String> {
		// The body is not captured in the audit row.
		let arguments = serde_json::json!({ "to": to, "subject": subject });

		self.observed("send_guest_email", None, arguments, async {
			self.providers.email.send(&self.cfg.providers.email, to, subject, html_body).await?;

			Ok(format!("Email sent to {to}."))
		})
		.await
	}
}
