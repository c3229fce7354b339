use sqlx::{PgExecutor, Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
	Result,
	models::{NewSermonNote, NoteWithAuthor},
};

const NOTE_WITH_AUTHOR_COLUMNS: &str = "\
SELECT
\tn.id,
\tn.user_id,
\tn.title,
\tn.content,
\tn.sermon,
\tn.privacy,
\tn.church_id,
\tn.created_at,
\tn.updated_at,
\tp.username AS author_username,
\tp.full_name AS author_full_name,
\tp.avatar_url AS author_avatar_url
FROM sermon_notes n
JOIN profiles p ON p.id = n.user_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFilter {
	Public,
	Author(Uuid),
	Church(Uuid),
}

#[derive(Debug, Clone)]
pub struct FeedQuery {
	pub filter: FeedFilter,
	pub viewer_id: Option<Uuid>,
	pub viewer_church_id: Option<Uuid>,
	/// Exclusive `(created_at, id)` position of the previous page's last row.
	pub after: Option<(OffsetDateTime, Uuid)>,
	pub limit: i64,
}

pub async fn insert_note<'e, E>(executor: E, note: &NewSermonNote) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query(
		"\
INSERT INTO sermon_notes (
\tid,
\tuser_id,
\ttitle,
\tcontent,
\tsermon,
\tprivacy,
\tchurch_id,
\tcreated_at,
\tupdated_at
)
VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$8)",
	)
	.bind(note.id)
	.bind(note.user_id)
	.bind(note.title.as_str())
	.bind(note.content.as_str())
	.bind(&note.sermon)
	.bind(note.privacy.as_str())
	.bind(note.church_id)
	.bind(note.created_at)
	.execute(executor)
	.await?;

	Ok(())
}

pub async fn get_note_with_author<'e, E>(
	executor: E,
	note_id: Uuid,
) -> Result<Option<NoteWithAuthor>>
where
	E: PgExecutor<'e>,
{
	let sql = format!("{NOTE_WITH_AUTHOR_COLUMNS}\nWHERE n.id = $1\nLIMIT 1");
	let row = sqlx::query_as::<_, NoteWithAuthor>(&sql)
		.bind(note_id)
		.fetch_optional(executor)
		.await?;

	Ok(row)
}

/// Deletes a note only when `author_id` wrote it. Returns whether a row was removed.
pub async fn delete_note_by_author<'e, E>(
	executor: E,
	note_id: Uuid,
	author_id: Uuid,
) -> Result<bool>
where
	E: PgExecutor<'e>,
{
	let result = sqlx::query("DELETE FROM sermon_notes WHERE id = $1 AND user_id = $2")
		.bind(note_id)
		.bind(author_id)
		.execute(executor)
		.await?;

	Ok(result.rows_affected() > 0)
}

pub async fn delete_note_in_church<'e, E>(
	executor: E,
	note_id: Uuid,
	church_id: Uuid,
) -> Result<bool>
where
	E: PgExecutor<'e>,
{
	let result = sqlx::query("DELETE FROM sermon_notes WHERE id = $1 AND church_id = $2")
		.bind(note_id)
		.bind(church_id)
		.execute(executor)
		.await?;

	Ok(result.rows_affected() > 0)
}

/// One feed page, newest first. Visibility is applied in the query: a note is returned when it is
/// public, written by the viewer, or church-scoped to the viewer's church.
pub async fn feed_page<'e, E>(executor: E, query: &FeedQuery) -> Result<Vec<NoteWithAuthor>>
where
	E: PgExecutor<'e>,
{
	let mut builder = QueryBuilder::<Postgres>::new(NOTE_WITH_AUTHOR_COLUMNS);

	builder.push("\nWHERE ");

	match query.filter {
		FeedFilter::Public => {
			builder.push("n.privacy = 'public'");
		},
		FeedFilter::Author(author_id) => {
			builder.push("n.user_id = ");
			builder.push_bind(author_id);
			push_visibility(&mut builder, query);
		},
		FeedFilter::Church(church_id) => {
			builder.push("n.church_id = ");
			builder.push_bind(church_id);
			push_visibility(&mut builder, query);
		},
	}

	if let Some((created_at, id)) = query.after {
		builder.push(" AND (n.created_at, n.id) < (");
		builder.push_bind(created_at);
		builder.push(", ");
		builder.push_bind(id);
		builder.push(")");
	}

	builder.push("\nORDER BY n.created_at DESC, n.id DESC\nLIMIT ");
	builder.push_bind(query.limit);

	let rows = builder.build_query_as::<NoteWithAuthor>().fetch_all(executor).await?;

	Ok(rows)
}

pub async fn count_public_notes_by_author<'e, E>(executor: E, author_id: Uuid) -> Result<i64>
where
	E: PgExecutor<'e>,
{
	let count: i64 = sqlx::query_scalar(
		"SELECT count(*) FROM sermon_notes WHERE user_id = $1 AND privacy = 'public'",
	)
	.bind(author_id)
	.fetch_one(executor)
	.await?;

	Ok(count)
}

fn push_visibility(builder: &mut QueryBuilder<'_, Postgres>, query: &FeedQuery) {
	builder.push(" AND (n.privacy = 'public'");

	if let Some(viewer_id) = query.viewer_id {
		builder.push(" OR n.user_id = ");
		builder.push_bind(viewer_id);
	}
	if let Some(church_id) = query.viewer_church_id {
		builder.push(" OR (n.privacy = 'church' AND n.church_id = ");
		builder.push_bind(church_id);
		builder.push(")");
	}

	builder.push(")");
}
