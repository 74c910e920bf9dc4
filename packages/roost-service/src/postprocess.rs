/// Removes a wrapping markdown code fence, including the info string on
/// the opening line. Model output frequently arrives fenced despite
/// raw-output instructions.
pub(crate) fn strip_code_fences(raw: &str) -> String {
	let trimmed = raw.trim();
	let Some(rest) = trimmed.strip_prefix("```") else {
		return trimmed.to_string();
	};
	let rest = match rest.find('\n') {
		Some(index) => &rest[index + 1..],
		None => rest,
	};
	let rest = rest.strip_suffix("```").unwrap_or(rest);

	rest.trim().to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn strips_fences_and_info_strings() {
		assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
		assert_eq!(strip_code_fences("```\ntext\n```"), "text");
	}

	#[test]
	fn leaves_unfenced_text_alone() {
		assert_eq!(strip_code_fences("  plain text  "), "plain text");
	}

	#[test]
	fn tolerates_a_missing_closing_fence() {
		assert_eq!(strip_code_fences("```json\n{\"a\": 1}"), "{\"a\": 1}");
	}
}
