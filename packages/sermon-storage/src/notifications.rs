use sqlx::PgExecutor;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Result, models::Notification};

pub async fn insert_notification<'e, E>(
	executor: E,
	user_id: Uuid,
	kind: &str,
	content: &str,
	created_at: OffsetDateTime,
) -> Result<Uuid>
where
	E: PgExecutor<'e>,
{
	let id = Uuid::new_v4();

	sqlx::query(
		"\
INSERT INTO notifications (id, user_id, type, content, read, created_at)
VALUES ($1, $2, $3, $4, false, $5)",
	)
	.bind(id)
	.bind(user_id)
	.bind(kind)
	.bind(content)
	.bind(created_at)
	.execute(executor)
	.await?;

	Ok(id)
}

pub async fn list_unread<'e, E>(executor: E, user_id: Uuid, limit: i64) -> Result<Vec<Notification>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, Notification>(
		"\
SELECT id, user_id, type AS kind, content, read, created_at
FROM notifications
WHERE user_id = $1 AND read = false
ORDER BY created_at DESC, id DESC
LIMIT $2",
	)
	.bind(user_id)
	.bind(limit)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

/// Marks a notification read when it belongs to `user_id`.
pub async fn mark_read<'e, E>(executor: E, notification_id: Uuid, user_id: Uuid) -> Result<bool>
where
	E: PgExecutor<'e>,
{
	let result = sqlx::query("UPDATE notifications SET read = true WHERE id = $1 AND user_id = $2")
		.bind(notification_id)
		.bind(user_id)
		.execute(executor)
		.await?;

	Ok(result.rows_affected() > 0)
}
