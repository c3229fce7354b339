use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use sermon_domain::{
	content::{Origin, SermonContent},
	cursor::FeedCursor,
	visibility::Visibility,
};
use sermon_storage::{
	models::NoteWithAuthor,
	notes::{self, FeedFilter, FeedQuery},
	tags,
};

use crate::{Error, Result, SermonService, normalize, viewer::Viewer};

/// Which notes a feed draws from. Exactly one scope applies per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum FeedScope {
	Public,
	ByAuthor(Uuid),
	ByChurch(Uuid),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedRequest {
	pub scope: FeedScope,
	#[serde(default)]
	pub cursor: Option<String>,
	#[serde(default)]
	pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorSummary {
	pub id: Uuid,
	pub username: String,
	pub full_name: Option<String>,
	pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NoteItem {
	pub id: Uuid,
	pub title: String,
	pub author: AuthorSummary,
	pub sermon: SermonContent,
	pub content_origin: Origin,
	pub privacy: Visibility,
	pub church_id: Option<Uuid>,
	pub tags: Vec<String>,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedPage {
	pub items: Vec<NoteItem>,
	pub next_cursor: Option<String>,
}

impl SermonService {
	pub async fn feed(&self, viewer: &Viewer, req: FeedRequest) -> Result<FeedPage> {
		let page_size = self.page_size(req.page_size)?;
		let after = match req.cursor.as_deref() {
			Some(raw) => {
				let cursor = FeedCursor::decode(raw)
					.ok_or_else(|| Error::invalid("Feed cursor is malformed."))?;

				Some((cursor.created_at, cursor.id))
			},
			None => None,
		};
		let audience = self.audience(viewer).await?;
		let filter = match req.scope {
			FeedScope::Public => FeedFilter::Public,
			FeedScope::ByAuthor(author_id) => FeedFilter::Author(author_id),
			FeedScope::ByChurch(church_id) => FeedFilter::Church(church_id),
		};
		let query = FeedQuery {
			filter,
			viewer_id: audience.profile_id,
			viewer_church_id: audience.church_id,
			after,
			// One extra row tells whether another page exists.
			limit: i64::from(page_size) + 1,
		};
		let mut rows = notes::feed_page(&self.db.pool, &query).await?;
		let has_more = rows.len() > page_size as usize;

		rows.truncate(page_size as usize);

		let next_cursor = if has_more {
			rows.last().map(|row| FeedCursor::new(row.created_at, row.id).encode())
		} else {
			None
		};
		let items = self.note_items(rows).await?;

		tracing::debug!(scope = ?req.scope, items = items.len(), has_more, "Composed feed page.");

		Ok(FeedPage { items, next_cursor })
	}

	/// Attaches tags to a batch of note rows with a single lookup.
	pub(crate) async fn note_items(&self, rows: Vec<NoteWithAuthor>) -> Result<Vec<NoteItem>> {
		let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
		let mut tags_by_note: HashMap<Uuid, Vec<String>> = HashMap::new();

		for tag in tags::tags_for_notes(&self.db.pool, &ids).await? {
			tags_by_note.entry(tag.sermon_id).or_default().push(tag.name);
		}

		Ok(rows
			.into_iter()
			.map(|row| {
				let tags = tags_by_note.remove(&row.id).unwrap_or_default();

				note_item(row, tags)
			})
			.collect())
	}

	fn page_size(&self, requested: Option<u32>) -> Result<u32> {
		let Some(size) = requested else {
			return Ok(self.cfg.feed.default_page_size);
		};

		if size == 0 {
			return Err(Error::invalid("page_size must be greater than zero."));
		}

		Ok(size.min(self.cfg.feed.max_page_size))
	}
}

pub(crate) fn note_item(row: NoteWithAuthor, tags: Vec<String>) -> NoteItem {
	let decoded = normalize::sermon_content(row.id, &row.content, row.sermon.as_ref());
	let privacy = parse_privacy(row.id, &row.privacy);

	NoteItem {
		id: row.id,
		title: row.title,
		author: AuthorSummary {
			id: row.user_id,
			username: row.author_username,
			full_name: row.author_full_name,
			avatar_url: row.author_avatar_url,
		},
		sermon: decoded.value,
		content_origin: decoded.origin,
		privacy,
		church_id: row.church_id,
		tags,
		created_at: row.created_at,
	}
}

pub(crate) fn parse_privacy(note_id: Uuid, raw: &str) -> Visibility {
	Visibility::parse(raw).unwrap_or_else(|| {
		tracing::warn!(%note_id, privacy = raw, "Unknown note privacy. Treating it as private.");

		Visibility::Private
	})
}
