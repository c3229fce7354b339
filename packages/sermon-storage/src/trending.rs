use sqlx::PgExecutor;

use crate::{Result, models::TrendingTag};

/// Calls the `get_trending_tags()` procedure; its ranking is owned by the database.
pub async fn trending_tags<'e, E>(executor: E, limit: i64) -> Result<Vec<TrendingTag>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, TrendingTag>(
		"SELECT id, name, note_count FROM get_trending_tags() LIMIT $1",
	)
	.bind(limit)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}
