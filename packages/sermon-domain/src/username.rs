use regex::Regex;

const USERNAME_PATTERN: &str = r"^[A-Za-z0-9_.]{3,30}$";

/// Trimmed username when it is 3 to 30 letters, digits, `_` or `.`.
pub fn normalize_username(raw: &str) -> Option<&str> {
	let trimmed = raw.trim().trim_start_matches('@');
	let valid = Regex::new(USERNAME_PATTERN).map(|re| re.is_match(trimmed)).unwrap_or(false);

	valid.then_some(trimmed)
}
