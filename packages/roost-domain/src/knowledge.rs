use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KnowledgeSource {
	/// The curated house-rules file.
	Policy,
	/// Live marketplace catalog rows.
	Catalog,
}
impl KnowledgeSource {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Policy => "policy",
			Self::Catalog => "catalog",
		}
	}
}

/// A text fragment eligible for embedding and similarity search.
///
/// Regenerated on every sync pass; only the vector store retains it.
#[derive(Clone, Debug)]
pub struct KnowledgeDocument {
	pub source: KnowledgeSource,
	pub text: String,
}
impl KnowledgeDocument {
	pub fn policy(text: impl Into<String>) -> Self {
		Self { source: KnowledgeSource::Policy, text: text.into() }
	}

	pub fn catalog(text: impl Into<String>) -> Self {
		Self { source: KnowledgeSource::Catalog, text: text.into() }
	}
}

/// One entry of the curated rules file.
#[derive(Clone, Debug, Deserialize)]
pub struct RuleRecord {
	pub id: String,
	pub question: String,
	pub answer: String,
}
impl RuleRecord {
	pub fn render(&self) -> String {
		format!("Q: {}\nA: {}", self.question.trim(), self.answer.trim())
	}
}
