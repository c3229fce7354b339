//! Rows still holding the single-column structured blob, and the writes that split them.

use serde_json::Value;
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
	Result,
	models::{LegacyChurch, LegacyNote},
};

pub async fn legacy_churches<'e, E>(executor: E, limit: i64) -> Result<Vec<LegacyChurch>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, LegacyChurch>(
		"\
SELECT id, description
FROM churches
WHERE location IS NULL
ORDER BY id
LIMIT $1
FOR UPDATE SKIP LOCKED",
	)
	.bind(limit)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

pub async fn split_church<'e, E>(
	executor: E,
	church_id: Uuid,
	description: &str,
	location: &Value,
) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query(
		"\
UPDATE churches
SET description = $2, location = $3, updated_at = now()
WHERE id = $1 AND location IS NULL",
	)
	.bind(church_id)
	.bind(description)
	.bind(location)
	.execute(executor)
	.await?;

	Ok(())
}

pub async fn legacy_notes<'e, E>(executor: E, limit: i64) -> Result<Vec<LegacyNote>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, LegacyNote>(
		"\
SELECT id, content
FROM sermon_notes
WHERE sermon IS NULL
ORDER BY id
LIMIT $1
FOR UPDATE SKIP LOCKED",
	)
	.bind(limit)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

pub async fn split_note<'e, E>(
	executor: E,
	note_id: Uuid,
	content: &str,
	sermon: &Value,
) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query(
		"\
UPDATE sermon_notes
SET content = $2, sermon = $3, updated_at = now()
WHERE id = $1 AND sermon IS NULL",
	)
	.bind(note_id)
	.bind(content)
	.bind(sermon)
	.execute(executor)
	.await?;

	Ok(())
}
