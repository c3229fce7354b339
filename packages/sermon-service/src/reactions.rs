use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use sermon_storage::{models::NoteWithAuthor, notifications, reactions};

use crate::{Error, Result, SermonService, viewer::Viewer};

#[derive(Debug, Clone, Serialize)]
pub struct PraiseResponse {
	pub praised: bool,
	pub praise_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCommentRequest {
	pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
	pub id: Uuid,
	pub note_id: Uuid,
	pub author_id: Uuid,
	pub author_username: String,
	pub author_avatar_url: Option<String>,
	pub content: String,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
}

impl SermonService {
	/// Praises the note, or withdraws the viewer's praise when it already exists.
	pub async fn toggle_praise(&self, viewer: &Viewer, note_id: Uuid) -> Result<PraiseResponse> {
		let actor = self.viewer_profile(viewer).await?;
		let note = self.visible_note(viewer, note_id).await?;
		let mut tx = self.db.pool.begin().await?;
		let praised = if reactions::delete_praise(&mut *tx, note_id, actor.id).await? {
			false
		} else {
			reactions::insert_praise(&mut *tx, note_id, actor.id).await?
		};

		if praised {
			notify_author(
				&mut tx,
				&note,
				actor.id,
				"praise",
				format!("@{} praised your note \"{}\".", actor.username, note.title),
			)
			.await?;
		}

		let praise_count = reactions::count_praises(&mut *tx, note_id).await?;

		tx.commit().await?;

		Ok(PraiseResponse { praised, praise_count })
	}

	pub async fn add_comment(
		&self,
		viewer: &Viewer,
		note_id: Uuid,
		req: AddCommentRequest,
	) -> Result<CommentView> {
		let actor = self.viewer_profile(viewer).await?;
		let content = req.content.trim();
		let max_chars = self.cfg.notes.max_comment_chars as usize;

		if content.is_empty() {
			return Err(Error::invalid("Comment must not be empty."));
		}
		if content.chars().count() > max_chars {
			return Err(Error::invalid(format!("Comment must be at most {max_chars} characters.")));
		}

		let note = self.visible_note(viewer, note_id).await?;
		let comment_id = Uuid::new_v4();
		let created_at = OffsetDateTime::now_utc();
		let mut tx = self.db.pool.begin().await?;

		reactions::insert_comment(&mut *tx, comment_id, note_id, actor.id, content, created_at)
			.await?;
		notify_author(
			&mut tx,
			&note,
			actor.id,
			"comment",
			format!("@{} commented on your note \"{}\".", actor.username, note.title),
		)
		.await?;

		tx.commit().await?;

		Ok(CommentView {
			id: comment_id,
			note_id,
			author_id: actor.id,
			author_username: actor.username,
			author_avatar_url: actor.avatar_url,
			content: content.to_string(),
			created_at,
		})
	}

	/// Newest comments first.
	pub async fn list_comments(&self, viewer: &Viewer, note_id: Uuid) -> Result<Vec<CommentView>> {
		self.visible_note(viewer, note_id).await?;

		let rows = reactions::list_comments(&self.db.pool, note_id).await?;

		Ok(rows
			.into_iter()
			.map(|row| CommentView {
				id: row.id,
				note_id: row.sermon_id,
				author_id: row.user_id,
				author_username: row.username,
				author_avatar_url: row.avatar_url,
				content: row.content,
				created_at: row.created_at,
			})
			.collect())
	}
}

async fn notify_author(
	tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
	note: &NoteWithAuthor,
	actor_id: Uuid,
	kind: &str,
	content: String,
) -> Result<()> {
	if note.user_id == actor_id {
		return Ok(());
	}

	notifications::insert_notification(
		&mut **tx,
		note.user_id,
		kind,
		&content,
		OffsetDateTime::now_utc(),
	)
	.await?;

	Ok(())
}
