use sqlx::PgExecutor;
use uuid::Uuid;

use crate::Result;

/// Returns `true` when a new edge was created.
pub async fn insert_follow<'e, E>(
	executor: E,
	follower_id: Uuid,
	following_id: Uuid,
) -> Result<bool>
where
	E: PgExecutor<'e>,
{
	let result = sqlx::query(
		"\
INSERT INTO follows (follower_id, following_id)
VALUES ($1, $2)
ON CONFLICT DO NOTHING",
	)
	.bind(follower_id)
	.bind(following_id)
	.execute(executor)
	.await?;

	Ok(result.rows_affected() > 0)
}

pub async fn delete_follow<'e, E>(
	executor: E,
	follower_id: Uuid,
	following_id: Uuid,
) -> Result<bool>
where
	E: PgExecutor<'e>,
{
	let result = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
		.bind(follower_id)
		.bind(following_id)
		.execute(executor)
		.await?;

	Ok(result.rows_affected() > 0)
}

pub async fn is_following<'e, E>(executor: E, follower_id: Uuid, following_id: Uuid) -> Result<bool>
where
	E: PgExecutor<'e>,
{
	let exists: bool = sqlx::query_scalar(
		"SELECT EXISTS (SELECT 1 FROM follows WHERE follower_id = $1 AND following_id = $2)",
	)
	.bind(follower_id)
	.bind(following_id)
	.fetch_one(executor)
	.await?;

	Ok(exists)
}

/// `(followers, following)` counts for a profile.
pub async fn follow_counts<'e, E>(executor: E, profile_id: Uuid) -> Result<(i64, i64)>
where
	E: PgExecutor<'e>,
{
	let counts: (i64, i64) = sqlx::query_as(
		"\
SELECT
\t(SELECT count(*) FROM follows WHERE following_id = $1),
\t(SELECT count(*) FROM follows WHERE follower_id = $1)",
	)
	.bind(profile_id)
	.fetch_one(executor)
	.await?;

	Ok(counts)
}
