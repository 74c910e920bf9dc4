use std::{
	sync::{Arc, Mutex},
	time::Instant,
};

use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;
use tokio::{sync::mpsc, task::JoinHandle};
use uuid::Uuid;

use roost_domain::audit::ToolInvocationRecord;

use crate::{AuditSink, ConciergeService, Result};

pub const TOOL_NAME: &str = "concierge";

/// Decouples audit persistence from the invoking call: completed records
/// flow through a channel to one writer task whose failures are logged,
/// never propagated. The writer handle is owned here and joined on
/// shutdown so records are not abandoned at process exit.
pub struct AuditPipeline {
	tx: Mutex<Option<mpsc::UnboundedSender<ToolInvocationRecord>>>,
	writer: tokio::sync::Mutex<Option<JoinHandle<()>>>,
}
impl AuditPipeline {
	/// Must run inside a tokio runtime.
	pub fn new(sink: Arc<dyn AuditSink>) -> Self {
		let (tx, mut rx) = mpsc::unbounded_channel::<ToolInvocationRecord>();
		let writer = tokio::spawn(async move {
			while let Some(record) = rx.recv().await {
				if let Err(err) = sink.save(&record).await {
					tracing::warn!(
						error = %err,
						function = %record.function_name,
						"Audit record write failed."
					);
				}
			}
		});

		Self { tx: Mutex::new(Some(tx)), writer: tokio::sync::Mutex::new(Some(writer)) }
	}

	pub(crate) fn submit(&self, record: ToolInvocationRecord) {
		let guard = self.tx.lock().unwrap_or_else(|err| err.into_inner());
		let Some(tx) = guard.as_ref() else {
			tracing::warn!("Audit pipeline is shut down. Record dropped.");

			return;
		};

		if tx.send(record).is_err() {
			tracing::warn!("Audit writer is gone. Record dropped.");
		}
	}

	/// Closes the channel and waits for the writer to drain. Submissions
	/// after shutdown are dropped with a warning.
	pub async fn shutdown(&self) {
		let tx = self.tx.lock().unwrap_or_else(|err| err.into_inner()).take();

		drop(tx);

		let handle = self.writer.lock().await.take();

		if let Some(handle) = handle
			&& handle.await.is_err()
		{
			tracing::warn!("Audit writer task panicked before shutdown.");
		}
	}
}

impl ConciergeService {
	/// Wraps one tool invocation: the body runs under a timer and exactly
	/// one completed record is submitted in both outcomes. The original
	/// error is re-raised unchanged; observation never suppresses.
	pub(crate) async fn observed<T, F>(
		&self,
		function: &'static str,
		actor_id: Option<&str>,
		arguments: Value,
		run: F,
	) -> Result<T>
	where
		T: Serialize,
		F: Future<Output = Result<T>>,
	{
		let started = Instant::now();
		let outcome = run.await;
		let duration_ms = i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX);
		let record = ToolInvocationRecord {
			invocation_id: Uuid::new_v4(),
			actor_id: actor_id.map(str::to_string),
			tool_name: TOOL_NAME.to_string(),
			function_name: function.to_string(),
			arguments,
			result: outcome.as_ref().ok().and_then(|value| serde_json::to_value(value).ok()),
			is_error: outcome.is_err(),
			error_message: outcome.as_ref().err().map(|err| err.to_string()),
			duration_ms,
			created_at: OffsetDateTime::now_utc(),
		};

		self.audit.submit(record);

		outcome
	}
}
