use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

use crate::{
	Result,
	models::{NoteTag, Tag},
};

/// Returns a tag row for every name, creating the ones that do not exist yet.
pub async fn ensure_tags(conn: &mut PgConnection, names: &[String]) -> Result<Vec<Tag>> {
	if names.is_empty() {
		return Ok(Vec::new());
	}

	let ids: Vec<Uuid> = names.iter().map(|_| Uuid::new_v4()).collect();

	sqlx::query(
		"\
INSERT INTO tags (id, name)
SELECT * FROM UNNEST($1::uuid[], $2::text[])
ON CONFLICT (name) DO NOTHING",
	)
	.bind(&ids)
	.bind(names)
	.execute(&mut *conn)
	.await?;

	let rows = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags WHERE name = ANY($1)")
		.bind(names)
		.fetch_all(&mut *conn)
		.await?;

	Ok(rows)
}

pub async fn attach_tags<'e, E>(executor: E, note_id: Uuid, tag_ids: &[Uuid]) -> Result<()>
where
	E: PgExecutor<'e>,
{
	if tag_ids.is_empty() {
		return Ok(());
	}

	sqlx::query(
		"\
INSERT INTO sermon_tags (sermon_id, tag_id)
SELECT $1, tag_id FROM UNNEST($2::uuid[]) AS t(tag_id)
ON CONFLICT DO NOTHING",
	)
	.bind(note_id)
	.bind(tag_ids)
	.execute(executor)
	.await?;

	Ok(())
}

/// Tag names for a page of notes in a single round trip.
pub async fn tags_for_notes<'e, E>(executor: E, note_ids: &[Uuid]) -> Result<Vec<NoteTag>>
where
	E: PgExecutor<'e>,
{
	if note_ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows = sqlx::query_as::<_, NoteTag>(
		"\
SELECT st.sermon_id, t.name
FROM sermon_tags st
JOIN tags t ON t.id = st.tag_id
WHERE st.sermon_id = ANY($1)
ORDER BY st.sermon_id, t.name",
	)
	.bind(note_ids)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}
