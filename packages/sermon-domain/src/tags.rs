use std::collections::HashSet;

use regex::Regex;

const TAG_PATTERN: &str = r"^[a-z0-9][a-z0-9 _-]*$";
const MAX_TAG_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagReject {
	Invalid { tag: String },
	TooMany { max: usize },
}

pub fn normalize_tag(raw: &str) -> String {
	let stripped = raw.trim().trim_start_matches('#');

	stripped.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Normalizes, validates, and de-duplicates tag names, keeping first-seen order.
pub fn normalize_tags(raw: &[String], max: usize) -> Result<Vec<String>, TagReject> {
	let mut seen = HashSet::new();
	let mut out = Vec::new();

	for tag in raw {
		let tag = normalize_tag(tag);

		if tag.is_empty() {
			continue;
		}
		if tag.chars().count() > MAX_TAG_CHARS || !is_valid_tag(&tag) {
			return Err(TagReject::Invalid { tag });
		}
		if seen.insert(tag.clone()) {
			out.push(tag);
		}
	}

	if out.len() > max {
		return Err(TagReject::TooMany { max });
	}

	Ok(out)
}

fn is_valid_tag(tag: &str) -> bool {
	Regex::new(TAG_PATTERN).map(|re| re.is_match(tag)).unwrap_or(false)
}
