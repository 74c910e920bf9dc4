/// Tool-invocation audit rows are the only relation this subsystem owns.
/// The marketplace tables (bookings, listings, users) belong to the host
/// application and are read through `market`.
pub const SCHEMA_SQL: &str = "\
CREATE TABLE IF NOT EXISTS tool_invocations (
	invocation_id UUID PRIMARY KEY,
	actor_id TEXT,
	tool_name TEXT NOT NULL,
	function_name TEXT NOT NULL,
	arguments JSONB NOT NULL,
	result JSONB,
	is_error BOOLEAN NOT NULL,
	error_message TEXT,
	duration_ms BIGINT NOT NULL,
	created_at TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS tool_invocations_created_at_idx
	ON tool_invocations (created_at);
CREATE INDEX IF NOT EXISTS tool_invocations_function_name_idx
	ON tool_invocations (function_name)";
