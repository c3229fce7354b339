use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use sermon_storage::{follows, notes, notifications, profiles};

use crate::{Error, Result, SermonService, profiles::ProfileView, viewer::Viewer};

#[derive(Debug, Clone, Serialize)]
pub struct FollowResponse {
	pub following: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileOverview {
	pub profile: ProfileView,
	pub public_note_count: i64,
	pub follower_count: i64,
	pub following_count: i64,
	pub viewer_follows: bool,
}

impl SermonService {
	/// Follows `profile_id`. Following twice is a no-op and sends no second notification.
	pub async fn follow(&self, viewer: &Viewer, profile_id: Uuid) -> Result<FollowResponse> {
		let follower = self.viewer_profile(viewer).await?;

		if follower.id == profile_id {
			return Err(Error::invalid("You cannot follow yourself."));
		}

		profiles::get_profile(&self.db.pool, profile_id)
			.await?
			.ok_or_else(|| Error::not_found("Profile not found."))?;

		let mut tx = self.db.pool.begin().await?;

		if follows::insert_follow(&mut *tx, follower.id, profile_id).await? {
			notifications::insert_notification(
				&mut *tx,
				profile_id,
				"follow",
				&format!("@{} started following you.", follower.username),
				OffsetDateTime::now_utc(),
			)
			.await?;
		}

		tx.commit().await?;

		Ok(FollowResponse { following: true })
	}

	pub async fn unfollow(&self, viewer: &Viewer, profile_id: Uuid) -> Result<FollowResponse> {
		let follower_id = viewer.require()?;

		if follower_id == profile_id {
			return Err(Error::invalid("You cannot follow yourself."));
		}

		follows::delete_follow(&self.db.pool, follower_id, profile_id).await?;

		Ok(FollowResponse { following: false })
	}

	pub async fn profile_overview(
		&self,
		viewer: &Viewer,
		profile_id: Uuid,
	) -> Result<ProfileOverview> {
		let profile = profiles::get_profile(&self.db.pool, profile_id)
			.await?
			.ok_or_else(|| Error::not_found("Profile not found."))?;
		let public_note_count =
			notes::count_public_notes_by_author(&self.db.pool, profile_id).await?;
		let (follower_count, following_count) =
			follows::follow_counts(&self.db.pool, profile_id).await?;
		let viewer_follows = match viewer.profile_id {
			Some(viewer_id) if viewer_id != profile_id =>
				follows::is_following(&self.db.pool, viewer_id, profile_id).await?,
			_ => false,
		};

		Ok(ProfileOverview {
			profile: profile.into(),
			public_note_count,
			follower_count,
			following_count,
			viewer_follows,
		})
	}
}
