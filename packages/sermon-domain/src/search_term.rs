/// Trimmed search term, or `None` when nothing is left to search for.
pub fn normalize_term(raw: &str) -> Option<&str> {
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		return None;
	}

	Some(trimmed)
}

/// Builds a substring `ILIKE` pattern for `term`, escaping `\`, `%` and `_` so they match
/// literally. Use with `ESCAPE '\'`.
pub fn like_pattern(term: &str) -> String {
	let mut out = String::with_capacity(term.len() + 2);

	out.push('%');

	for ch in term.chars() {
		if matches!(ch, '\\' | '%' | '_') {
			out.push('\\');
		}

		out.push(ch);
	}

	out.push('%');

	out
}
