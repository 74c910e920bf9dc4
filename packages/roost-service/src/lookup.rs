use roost_domain::datagate::{self, Decision};

use crate::{ConciergeService, Result};

impl ConciergeService {
	/// Read-only record lookup available to the agent. A policy denial is
	/// returned as tool output - not an error - so the model can correct
	/// the query and retry.
	pub async fn lookup_records(&self, query: &str, actor_id: Option<&str>) -> Result<String> {
		let arguments = serde_json::json!({ "query": query, "actor_id": actor_id });

		self.observed("lookup_records", actor_id, arguments, async {
			match datagate::evaluate_query(query, actor_id) {
				Decision::Deny { reason } => Ok(format!("Query rejected: {reason}")),
				Decision::Allow => {
					let rows = self.market.select_rows(query).await?;

					Ok(rows.to_string())
				},
			}
		})
		.await
	}
}
