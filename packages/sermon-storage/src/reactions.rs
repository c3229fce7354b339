use sqlx::PgExecutor;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Result, models::Comment};

pub async fn insert_praise<'e, E>(executor: E, note_id: Uuid, user_id: Uuid) -> Result<bool>
where
	E: PgExecutor<'e>,
{
	let result = sqlx::query(
		"\
INSERT INTO sermon_praises (sermon_id, user_id)
VALUES ($1, $2)
ON CONFLICT DO NOTHING",
	)
	.bind(note_id)
	.bind(user_id)
	.execute(executor)
	.await?;

	Ok(result.rows_affected() > 0)
}

pub async fn delete_praise<'e, E>(executor: E, note_id: Uuid, user_id: Uuid) -> Result<bool>
where
	E: PgExecutor<'e>,
{
	let result = sqlx::query("DELETE FROM sermon_praises WHERE sermon_id = $1 AND user_id = $2")
		.bind(note_id)
		.bind(user_id)
		.execute(executor)
		.await?;

	Ok(result.rows_affected() > 0)
}

pub async fn count_praises<'e, E>(executor: E, note_id: Uuid) -> Result<i64>
where
	E: PgExecutor<'e>,
{
	let count: i64 = sqlx::query_scalar("SELECT count(*) FROM sermon_praises WHERE sermon_id = $1")
		.bind(note_id)
		.fetch_one(executor)
		.await?;

	Ok(count)
}

pub async fn has_praised<'e, E>(executor: E, note_id: Uuid, user_id: Uuid) -> Result<bool>
where
	E: PgExecutor<'e>,
{
	let exists: bool = sqlx::query_scalar(
		"SELECT EXISTS (SELECT 1 FROM sermon_praises WHERE sermon_id = $1 AND user_id = $2)",
	)
	.bind(note_id)
	.bind(user_id)
	.fetch_one(executor)
	.await?;

	Ok(exists)
}

pub async fn insert_comment<'e, E>(
	executor: E,
	comment_id: Uuid,
	note_id: Uuid,
	user_id: Uuid,
	content: &str,
	created_at: OffsetDateTime,
) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query(
		"\
INSERT INTO sermon_comments (id, sermon_id, user_id, content, created_at)
VALUES ($1, $2, $3, $4, $5)",
	)
	.bind(comment_id)
	.bind(note_id)
	.bind(user_id)
	.bind(content)
	.bind(created_at)
	.execute(executor)
	.await?;

	Ok(())
}

pub async fn list_comments<'e, E>(executor: E, note_id: Uuid) -> Result<Vec<Comment>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, Comment>(
		"\
SELECT c.id, c.sermon_id, c.user_id, c.content, c.created_at, p.username, p.avatar_url
FROM sermon_comments c
JOIN profiles p ON p.id = c.user_id
WHERE c.sermon_id = $1
ORDER BY c.created_at DESC, c.id DESC",
	)
	.bind(note_id)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}
