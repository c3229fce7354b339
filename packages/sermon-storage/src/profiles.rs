use sqlx::PgExecutor;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Result, models::Profile};

const PROFILE_COLUMNS: &str = "\
SELECT id, username, full_name, bio, avatar_url, church_id, role, created_at, updated_at
FROM profiles";

#[derive(Debug, Clone)]
pub struct NewProfile {
	pub id: Uuid,
	pub username: String,
	pub full_name: Option<String>,
	pub avatar_url: Option<String>,
	pub church_id: Option<Uuid>,
	pub role: String,
	pub created_at: OffsetDateTime,
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
	pub username: Option<String>,
	pub full_name: Option<String>,
	pub bio: Option<String>,
	pub avatar_url: Option<String>,
}

pub async fn insert_profile<'e, E>(executor: E, profile: &NewProfile) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query(
		"\
INSERT INTO profiles (
\tid,
\tusername,
\tfull_name,
\tavatar_url,
\tchurch_id,
\trole,
\tcreated_at,
\tupdated_at
)
VALUES ($1,$2,$3,$4,$5,$6,$7,$7)",
	)
	.bind(profile.id)
	.bind(profile.username.as_str())
	.bind(profile.full_name.as_deref())
	.bind(profile.avatar_url.as_deref())
	.bind(profile.church_id)
	.bind(profile.role.as_str())
	.bind(profile.created_at)
	.execute(executor)
	.await?;

	Ok(())
}

pub async fn get_profile<'e, E>(executor: E, profile_id: Uuid) -> Result<Option<Profile>>
where
	E: PgExecutor<'e>,
{
	let sql = format!("{PROFILE_COLUMNS}\nWHERE id = $1");
	let row = sqlx::query_as::<_, Profile>(&sql).bind(profile_id).fetch_optional(executor).await?;

	Ok(row)
}

pub async fn find_by_username<'e, E>(executor: E, username: &str) -> Result<Option<Profile>>
where
	E: PgExecutor<'e>,
{
	let sql = format!("{PROFILE_COLUMNS}\nWHERE lower(username) = lower($1)\nLIMIT 1");
	let row = sqlx::query_as::<_, Profile>(&sql).bind(username).fetch_optional(executor).await?;

	Ok(row)
}

pub async fn update_profile<'e, E>(
	executor: E,
	profile_id: Uuid,
	patch: &ProfilePatch,
	now: OffsetDateTime,
) -> Result<Option<Profile>>
where
	E: PgExecutor<'e>,
{
	let row = sqlx::query_as::<_, Profile>(
		"\
UPDATE profiles
SET
\tusername = COALESCE($2, username),
\tfull_name = COALESCE($3, full_name),
\tbio = COALESCE($4, bio),
\tavatar_url = COALESCE($5, avatar_url),
\tupdated_at = $6
WHERE id = $1
RETURNING id, username, full_name, bio, avatar_url, church_id, role, created_at, updated_at",
	)
	.bind(profile_id)
	.bind(patch.username.as_deref())
	.bind(patch.full_name.as_deref())
	.bind(patch.bio.as_deref())
	.bind(patch.avatar_url.as_deref())
	.bind(now)
	.fetch_optional(executor)
	.await?;

	Ok(row)
}

/// Sets or clears the profile's church. Leaving a church also drops any admin role.
pub async fn set_church<'e, E>(
	executor: E,
	profile_id: Uuid,
	church_id: Option<Uuid>,
	now: OffsetDateTime,
) -> Result<bool>
where
	E: PgExecutor<'e>,
{
	let result = sqlx::query(
		"\
UPDATE profiles
SET
\tchurch_id = $2,
\trole = CASE WHEN church_id IS NOT DISTINCT FROM $2 THEN role ELSE 'member' END,
\tupdated_at = $3
WHERE id = $1",
	)
	.bind(profile_id)
	.bind(church_id)
	.bind(now)
	.execute(executor)
	.await?;

	Ok(result.rows_affected() > 0)
}
