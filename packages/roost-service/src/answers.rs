use roost_providers::chat::ModelProfile;

use crate::{ConciergeService, Result};

impl ConciergeService {
	/// Knowledge-grounded Q&A over the synced policy and catalog
	/// documents. Runs on the reactive profile; an empty context still
	/// produces an answer (the model is told to admit ignorance).
	pub async fn answer_guest_question(&self, question: &str) -> Result<String> {
		let arguments = serde_json::json!({ "question": question });

		self.observed("answer_guest_question", None, arguments, async {
			let context = self
				.search_knowledge(
					question,
					self.cfg.knowledge.search_limit,
					self.cfg.knowledge.score_threshold,
				)
				.await;
			let system = "You answer guest questions about Roost stays using only the provided \
				context. If the context does not contain the answer, say you do not know and \
				suggest contacting support.";
			let user = if context.is_empty() {
				format!("Context: (none)\n\nQuestion: {question}")
			} else {
				format!("Context:\n{}\n\nQuestion: {question}", context.join("\n---\n"))
			};
			let raw = self
				.providers
				.chat
				.complete(&self.cfg.providers.chat, ModelProfile::Reactive, system, &user)
				.await?;

			Ok(raw.trim().to_string())
		})
		.await
	}
}
