//! Data-access gate for agent-issued queries.
//!
//! This is a textual policy, not a SQL parser: a sensitive resource is
//! detected by case-insensitive substring match, and caller scoping by the
//! literal actor id appearing in the query text. Callers must treat a
//! denial as feedback to correct the query, and anything stronger than a
//! heuristic belongs behind this same function signature.

/// Resources that may only be read scoped to the calling guest.
pub const SENSITIVE_RESOURCES: [&str; 5] = ["bookings", "users", "guests", "messages", "payments"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
	Allow,
	Deny { reason: String },
}
impl Decision {
	pub fn is_allowed(&self) -> bool {
		matches!(self, Self::Allow)
	}
}

pub fn evaluate_query(query: &str, actor_id: Option<&str>) -> Decision {
	let lowered = query.to_lowercase();
	let Some(resource) =
		SENSITIVE_RESOURCES.iter().find(|resource| lowered.contains(*resource)).copied()
	else {
		return Decision::Allow;
	};
	let actor = actor_id.map(str::trim).unwrap_or_default();

	if actor.is_empty() {
		return Decision::Deny {
			reason: format!(
				"The query touches the protected resource \"{resource}\" and no caller identity \
				 was provided. Anonymous callers may only read public data."
			),
		};
	}
	if !query.contains(actor) {
		return Decision::Deny {
			reason: format!(
				"The query touches the protected resource \"{resource}\" but is not scoped to the \
				 caller. Filter on the caller id \"{actor}\" and retry."
			),
		};
	}

	Decision::Allow
}
