use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

/// One row per tool invocation, written after the call completes.
///
/// Immutable once built. Persistence is best-effort and asynchronous; a
/// failed write must never surface to the invoking caller.
#[derive(Clone, Debug)]
pub struct ToolInvocationRecord {
	pub invocation_id: Uuid,
	pub actor_id: Option<String>,
	pub tool_name: String,
	pub function_name: String,
	pub arguments: Value,
	pub result: Option<Value>,
	pub is_error: bool,
	pub error_message: Option<String>,
	pub duration_ms: i64,
	pub created_at: OffsetDateTime,
}
