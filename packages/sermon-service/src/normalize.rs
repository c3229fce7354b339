//! Maps per-category rows into the uniform search result shape and decodes the structured
//! content columns, logging whenever a row had to fall back to plain text.

use serde_json::Value;
use uuid::Uuid;

use sermon_domain::content::{self, ChurchDetails, Decoded, SermonContent};
use sermon_storage::models::{ChurchMatch, NoteMatch, ProfileMatch};

use crate::search::{ResultKind, SearchResult};

pub fn person(row: ProfileMatch) -> SearchResult {
	let title = row
		.full_name
		.as_deref()
		.map(str::trim)
		.filter(|name| !name.is_empty())
		.map(str::to_string)
		.unwrap_or_else(|| row.username.clone());

	SearchResult {
		kind: ResultKind::Person,
		id: row.id,
		title,
		subtitle: format!("@{}", row.username),
		avatar_url: row.avatar_url,
		details: None,
	}
}

pub fn church(row: ChurchMatch) -> SearchResult {
	let details = church_details(row.id, row.description.as_deref(), row.location.as_ref()).value;

	SearchResult {
		kind: ResultKind::Church,
		id: row.id,
		title: row.name,
		subtitle: details.subtitle(),
		avatar_url: row.image_url,
		details: Some(details),
	}
}

pub fn note(row: NoteMatch) -> SearchResult {
	SearchResult {
		kind: ResultKind::Note,
		id: row.id,
		title: row.title,
		subtitle: format!("by @{}", row.author_username),
		avatar_url: None,
		details: None,
	}
}

pub fn church_details(
	church_id: Uuid,
	description: Option<&str>,
	location: Option<&Value>,
) -> Decoded<ChurchDetails> {
	let decoded = ChurchDetails::resolve(description, location);

	if decoded.is_fallback() {
		report_fallback("church", church_id, description.unwrap_or_default());
	}

	decoded
}

pub fn sermon_content(note_id: Uuid, raw: &str, sermon: Option<&Value>) -> Decoded<SermonContent> {
	let decoded = SermonContent::resolve(raw, sermon);

	if decoded.is_fallback() {
		report_fallback("note", note_id, raw);
	}

	decoded
}

fn report_fallback(entity: &str, id: Uuid, raw: &str) {
	if content::looks_like_blob(raw) {
		tracing::warn!(entity, %id, "Structured content failed to decode. Using plain text.");
	} else {
		tracing::debug!(entity, %id, "Content is plain text.");
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn person_title_prefers_full_name() {
		let row = ProfileMatch {
			id: Uuid::new_v4(),
			username: "grace99".to_string(),
			full_name: Some("Grace Hopper".to_string()),
			avatar_url: None,
		};
		let result = person(row.clone());

		assert_eq!(result.title, "Grace Hopper");
		assert_eq!(result.subtitle, "@grace99");

		let blank = person(ProfileMatch { full_name: Some("  ".to_string()), ..row });

		assert_eq!(blank.title, "grace99");
	}

	#[test]
	fn church_subtitle_comes_from_legacy_blob() {
		let row = ChurchMatch {
			id: Uuid::new_v4(),
			name: "Hope Chapel".to_string(),
			description: Some(
				r#"{"description":"A friendly congregation","location":{"city":"Austin","state":"TX","zipCode":"78701"}}"#
					.to_string(),
			),
			location: None,
			image_url: Some("https://img.example/hope.png".to_string()),
		};
		let result = church(row);

		assert_eq!(result.kind, ResultKind::Church);
		assert_eq!(result.subtitle, "Austin, TX");
		assert_eq!(result.avatar_url.as_deref(), Some("https://img.example/hope.png"));
		assert_eq!(
			result.details.map(|details| details.description),
			Some("A friendly congregation".to_string())
		);
	}

	#[test]
	fn note_subtitle_names_the_author() {
		let result = note(NoteMatch {
			id: Uuid::new_v4(),
			title: "Amazing Grace".to_string(),
			author_username: "pastor_lee".to_string(),
		});

		assert_eq!(result.subtitle, "by @pastor_lee");
		assert!(result.avatar_url.is_none());
	}
}
