use time::macros::date;

use roost_domain::{
	knowledge::{KnowledgeDocument, KnowledgeSource, RuleRecord},
	trip::{BudgetTier, TripRequest},
};

fn request(start: time::Date, end: time::Date) -> TripRequest {
	TripRequest {
		destination: "Porto".to_string(),
		start_date: start,
		end_date: end,
		travelers: 2,
		interests: vec!["food".to_string(), "architecture".to_string()],
		budget: BudgetTier::Standard,
	}
}

#[test]
fn trip_nights_counts_whole_days() {
	let req = request(date!(2025 - 06 - 10), date!(2025 - 06 - 14));

	assert_eq!(req.nights(), 4);
}

#[test]
fn trip_nights_floors_at_one() {
	assert_eq!(request(date!(2025 - 06 - 10), date!(2025 - 06 - 10)).nights(), 1);
	assert_eq!(request(date!(2025 - 06 - 14), date!(2025 - 06 - 10)).nights(), 1);
}

#[test]
fn rule_records_render_as_question_answer_pairs() {
	let record = RuleRecord {
		id: "r-check-in".to_string(),
		question: "  When is check-in?  ".to_string(),
		answer: "Check-in opens at 15:00.\n".to_string(),
	};

	assert_eq!(record.render(), "Q: When is check-in?\nA: Check-in opens at 15:00.");
}

#[test]
fn rule_records_deserialize_from_the_rules_file_shape() {
	let raw = r#"[{"id": "r-1", "question": "Pets?", "answer": "Cats are welcome."}]"#;
	let records: Vec<RuleRecord> = serde_json::from_str(raw).expect("Rules file shape must parse.");

	assert_eq!(records.len(), 1);
	assert_eq!(records[0].id, "r-1");
}

#[test]
fn knowledge_documents_carry_their_source_tag() {
	let policy = KnowledgeDocument::policy("Q: Pets?\nA: Yes.");
	let catalog = KnowledgeDocument::catalog("Listing: Sea cottage");

	assert_eq!(policy.source, KnowledgeSource::Policy);
	assert_eq!(catalog.source, KnowledgeSource::Catalog);
	assert_eq!(policy.source.as_str(), "policy");
	assert_eq!(catalog.source.as_str(), "catalog");
}
