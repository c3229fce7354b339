use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use sermon_storage::notifications;

use crate::{Error, Result, SermonService, viewer::Viewer};

#[derive(Debug, Clone, Serialize)]
pub struct NotificationView {
	pub id: Uuid,
	pub kind: String,
	pub content: String,
	pub read: bool,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
}

impl SermonService {
	/// Newest unread notifications for the viewer.
	pub async fn unread_notifications(&self, viewer: &Viewer) -> Result<Vec<NotificationView>> {
		let user_id = viewer.require()?;
		let limit = i64::from(self.cfg.notifications.unread_limit);
		let rows = notifications::list_unread(&self.db.pool, user_id, limit).await?;

		Ok(rows
			.into_iter()
			.map(|row| NotificationView {
				id: row.id,
				kind: row.kind,
				content: row.content,
				read: row.read,
				created_at: row.created_at,
			})
			.collect())
	}

	pub async fn mark_notification_read(
		&self,
		viewer: &Viewer,
		notification_id: Uuid,
	) -> Result<()> {
		let user_id = viewer.require()?;

		if !notifications::mark_read(&self.db.pool, notification_id, user_id).await? {
			return Err(Error::not_found("Notification not found."));
		}

		Ok(())
	}
}
