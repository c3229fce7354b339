use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use sermon_domain::{
	content::SermonContent,
	role::{self, Role},
	tags::{self as tag_rules, TagReject},
	visibility::{self, NoteAccess, Visibility},
};
use sermon_storage::{
	models::{NewSermonNote, NoteWithAuthor},
	notes, reactions, tags,
};

use crate::{
	Error, Result, SermonService,
	feed::{self, NoteItem},
	viewer::Viewer,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNoteRequest {
	pub title: String,
	pub content: String,
	#[serde(default)]
	pub pastor_name: String,
	#[serde(default)]
	pub church_name: String,
	#[serde(default)]
	pub bible_verses: Vec<String>,
	pub privacy: Visibility,
	#[serde(default)]
	pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateNoteResponse {
	pub note_id: Uuid,
	pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NoteDetail {
	pub note: NoteItem,
	pub praise_count: i64,
	pub praised_by_viewer: bool,
}

impl SermonService {
	pub async fn create_note(
		&self,
		viewer: &Viewer,
		req: CreateNoteRequest,
	) -> Result<CreateNoteResponse> {
		let author = self.viewer_profile(viewer).await?;
		let title = req.title.trim();
		let max_title = self.cfg.notes.max_title_chars as usize;

		if title.is_empty() {
			return Err(Error::invalid("title is required."));
		}
		if title.chars().count() > max_title {
			return Err(Error::invalid(format!("title must be at most {max_title} characters.")));
		}
		if req.content.trim().is_empty() {
			return Err(Error::invalid("content is required."));
		}
		if req.privacy == Visibility::Church && author.church_id.is_none() {
			return Err(Error::invalid("Church-only notes require a church affiliation."));
		}

		let tag_names = tag_rules::normalize_tags(&req.tags, self.cfg.notes.max_tags as usize)
			.map_err(|reject| match reject {
				TagReject::Invalid { tag } =>
					Error::invalid(format!("Tag {tag:?} is not allowed.")),
				TagReject::TooMany { max } =>
					Error::invalid(format!("A note may carry at most {max} tags.")),
			})?;
		let content = SermonContent {
			pastor_name: req.pastor_name.trim().to_string(),
			church_name: req.church_name.trim().to_string(),
			content: req.content,
			bible_verses: req
				.bible_verses
				.iter()
				.map(|verse| verse.trim())
				.filter(|verse| !verse.is_empty())
				.map(str::to_string)
				.collect(),
		};
		let (body, meta) = content.split();
		let note = NewSermonNote {
			id: Uuid::new_v4(),
			user_id: author.id,
			title: title.to_string(),
			content: body,
			sermon: meta.to_value(),
			privacy: req.privacy.as_str().to_string(),
			church_id: author.church_id,
			created_at: OffsetDateTime::now_utc(),
		};
		let mut tx = self.db.pool.begin().await?;

		notes::insert_note(&mut *tx, &note).await?;

		let tag_rows = tags::ensure_tags(&mut *tx, &tag_names).await?;
		let tag_ids: Vec<Uuid> = tag_rows.iter().map(|tag| tag.id).collect();

		tags::attach_tags(&mut *tx, note.id, &tag_ids).await?;

		tx.commit().await?;

		tracing::info!(
			note_id = %note.id,
			author_id = %author.id,
			tags = tag_names.len(),
			"Created note."
		);

		Ok(CreateNoteResponse { note_id: note.id, tags: tag_names })
	}

	pub async fn get_note(&self, viewer: &Viewer, note_id: Uuid) -> Result<NoteDetail> {
		let row = self.visible_note(viewer, note_id).await?;
		let praise_count = reactions::count_praises(&self.db.pool, note_id).await?;
		let praised_by_viewer = match viewer.profile_id {
			Some(profile_id) => reactions::has_praised(&self.db.pool, note_id, profile_id).await?,
			None => false,
		};
		let mut items = self.note_items(vec![row]).await?;
		let note = items.pop().ok_or_else(|| Error::not_found("Note not found."))?;

		Ok(NoteDetail { note, praise_count, praised_by_viewer })
	}

	pub async fn delete_note(&self, viewer: &Viewer, note_id: Uuid) -> Result<()> {
		let author_id = viewer.require()?;

		if !notes::delete_note_by_author(&self.db.pool, note_id, author_id).await? {
			return Err(Error::not_found("Note not found."));
		}

		tracing::info!(%note_id, %author_id, "Deleted note.");

		Ok(())
	}

	/// Removes a note from the church the viewer administers.
	pub async fn moderate_remove_note(&self, viewer: &Viewer, note_id: Uuid) -> Result<()> {
		let moderator = self.viewer_profile(viewer).await?;
		let note = notes::get_note_with_author(&self.db.pool, note_id)
			.await?
			.ok_or_else(|| Error::not_found("Note not found."))?;
		let role = Role::parse(&moderator.role).unwrap_or_default();

		if !role::can_moderate(role, moderator.church_id, note.church_id) {
			return Err(Error::Forbidden {
				message: "Only the admin of the note's church can remove it.".to_string(),
			});
		}

		let Some(church_id) = note.church_id else {
			return Err(Error::not_found("Note not found."));
		};

		if !notes::delete_note_in_church(&self.db.pool, note_id, church_id).await? {
			return Err(Error::not_found("Note not found."));
		}

		tracing::info!(
			%note_id,
			moderator_id = %moderator.id,
			%church_id,
			"Removed note by moderation."
		);

		Ok(())
	}

	/// Loads a note the viewer may see. Invisible notes are reported as missing.
	pub(crate) async fn visible_note(
		&self,
		viewer: &Viewer,
		note_id: Uuid,
	) -> Result<NoteWithAuthor> {
		let audience = self.audience(viewer).await?;
		let row = notes::get_note_with_author(&self.db.pool, note_id)
			.await?
			.ok_or_else(|| Error::not_found("Note not found."))?;
		let access = NoteAccess {
			visibility: feed::parse_privacy(row.id, &row.privacy),
			author_id: row.user_id,
			church_id: row.church_id,
		};

		if !visibility::note_visible(&access, &audience) {
			return Err(Error::not_found("Note not found."));
		}

		Ok(row)
	}
}
