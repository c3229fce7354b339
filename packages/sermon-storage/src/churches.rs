use serde_json::Value;
use sqlx::PgExecutor;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Result, models::Church};

#[derive(Debug, Clone)]
pub struct NewChurch {
	pub id: Uuid,
	pub name: String,
	pub description: String,
	pub location: Value,
	pub image_url: Option<String>,
	pub created_at: OffsetDateTime,
}

pub async fn insert_church<'e, E>(executor: E, church: &NewChurch) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query(
		"\
INSERT INTO churches (id, name, description, location, image_url, created_at, updated_at)
VALUES ($1,$2,$3,$4,$5,$6,$6)",
	)
	.bind(church.id)
	.bind(church.name.as_str())
	.bind(church.description.as_str())
	.bind(&church.location)
	.bind(church.image_url.as_deref())
	.bind(church.created_at)
	.execute(executor)
	.await?;

	Ok(())
}

pub async fn get_church<'e, E>(executor: E, church_id: Uuid) -> Result<Option<Church>>
where
	E: PgExecutor<'e>,
{
	let row = sqlx::query_as::<_, Church>(
		"\
SELECT id, name, description, location, image_url, created_at, updated_at
FROM churches
WHERE id = $1",
	)
	.bind(church_id)
	.fetch_optional(executor)
	.await?;

	Ok(row)
}

pub async fn count_members<'e, E>(executor: E, church_id: Uuid) -> Result<i64>
where
	E: PgExecutor<'e>,
{
	let count: i64 = sqlx::query_scalar("SELECT count(*) FROM profiles WHERE church_id = $1")
		.bind(church_id)
		.fetch_one(executor)
		.await?;

	Ok(count)
}

/// Notes tied to the church, optionally only those created at or after `since`.
pub async fn count_notes<'e, E>(
	executor: E,
	church_id: Uuid,
	since: Option<OffsetDateTime>,
) -> Result<i64>
where
	E: PgExecutor<'e>,
{
	let count: i64 = sqlx::query_scalar(
		"\
SELECT count(*)
FROM sermon_notes
WHERE church_id = $1
\tAND ($2::timestamptz IS NULL OR created_at >= $2)",
	)
	.bind(church_id)
	.bind(since)
	.fetch_one(executor)
	.await?;

	Ok(count)
}
