//! Per-category substring lookups. Every pattern is expected to come from
//! `sermon_domain::search_term::like_pattern`, so `\` is the escape character.

use sqlx::PgExecutor;

use crate::{
	Result,
	models::{ChurchMatch, NoteMatch, ProfileMatch},
};

pub async fn search_profiles<'e, E>(
	executor: E,
	pattern: &str,
	limit: i64,
) -> Result<Vec<ProfileMatch>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, ProfileMatch>(
		"\
SELECT id, username, full_name, avatar_url
FROM profiles
WHERE username ILIKE $1 ESCAPE '\\'
\tOR full_name ILIKE $1 ESCAPE '\\'
ORDER BY username ASC, id ASC
LIMIT $2",
	)
	.bind(pattern)
	.bind(limit)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

pub async fn search_churches<'e, E>(
	executor: E,
	pattern: &str,
	limit: i64,
) -> Result<Vec<ChurchMatch>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, ChurchMatch>(
		"\
SELECT id, name, description, location, image_url
FROM churches
WHERE name ILIKE $1 ESCAPE '\\'
ORDER BY name ASC, id ASC
LIMIT $2",
	)
	.bind(pattern)
	.bind(limit)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

/// Public notes only. Notes whose author row is missing drop out of the inner join.
pub async fn search_notes<'e, E>(executor: E, pattern: &str, limit: i64) -> Result<Vec<NoteMatch>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, NoteMatch>(
		"\
SELECT n.id, n.title, p.username AS author_username
FROM sermon_notes n
JOIN profiles p ON p.id = n.user_id
WHERE n.privacy = 'public'
\tAND (n.title ILIKE $1 ESCAPE '\\' OR n.content ILIKE $1 ESCAPE '\\')
ORDER BY n.created_at DESC, n.id DESC
LIMIT $2",
	)
	.bind(pattern)
	.bind(limit)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}
