use serde::Serialize;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use sermon_domain::{
	content::{ChurchDetails, Origin},
	role::Role,
};
use sermon_storage::{churches, models::Church, profiles};

use crate::{Error, Result, SermonService, normalize, viewer::Viewer};

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Serialize)]
pub struct ChurchView {
	pub id: Uuid,
	pub name: String,
	pub subtitle: String,
	pub image_url: Option<String>,
	pub details: ChurchDetails,
	pub details_origin: Origin,
}
impl From<Church> for ChurchView {
	fn from(church: Church) -> Self {
		let decoded = normalize::church_details(
			church.id,
			church.description.as_deref(),
			church.location.as_ref(),
		);

		Self {
			id: church.id,
			name: church.name,
			subtitle: decoded.value.subtitle(),
			image_url: church.image_url,
			details: decoded.value,
			details_origin: decoded.origin,
		}
	}
}

#[derive(Debug, Clone, Serialize)]
pub struct ChurchProfile {
	pub church: ChurchView,
	pub member_count: i64,
	pub sermon_count: i64,
	pub viewer_is_member: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChurchDashboard {
	pub church: ChurchView,
	pub member_count: i64,
	pub recent_note_count: i64,
	pub recent_activity_days: i64,
}

impl SermonService {
	pub async fn church_profile(&self, viewer: &Viewer, church_id: Uuid) -> Result<ChurchProfile> {
		let church = self.load_church(church_id).await?;
		let member_count = churches::count_members(&self.db.pool, church_id).await?;
		let sermon_count = churches::count_notes(&self.db.pool, church_id, None).await?;
		let audience = self.audience(viewer).await?;

		Ok(ChurchProfile {
			church: church.into(),
			member_count,
			sermon_count,
			viewer_is_member: audience.church_id == Some(church_id),
		})
	}

	/// Overview for the admin of the viewer's church.
	pub async fn church_dashboard(&self, viewer: &Viewer) -> Result<ChurchDashboard> {
		let admin = self.viewer_profile(viewer).await?;
		let church_id = match (Role::parse(&admin.role), admin.church_id) {
			(Some(Role::ChurchAdmin), Some(church_id)) => church_id,
			_ =>
				return Err(Error::Forbidden {
					message: "Only church admins have a dashboard.".to_string(),
				}),
		};
		let church = self.load_church(church_id).await?;
		let days = self.cfg.churches.recent_activity_days;
		let since = activity_window_start(OffsetDateTime::now_utc(), days)?;
		let member_count = churches::count_members(&self.db.pool, church_id).await?;
		let recent_note_count = churches::count_notes(&self.db.pool, church_id, Some(since)).await?;

		Ok(ChurchDashboard {
			church: church.into(),
			member_count,
			recent_note_count,
			recent_activity_days: days,
		})
	}

	pub async fn join_church(&self, viewer: &Viewer, church_id: Uuid) -> Result<()> {
		let profile_id = viewer.require()?;

		self.load_church(church_id).await?;

		let now = OffsetDateTime::now_utc();

		if !profiles::set_church(&self.db.pool, profile_id, Some(church_id), now).await? {
			return Err(Error::not_found("Viewer profile not found."));
		}

		tracing::info!(%profile_id, %church_id, "Joined church.");

		Ok(())
	}

	pub async fn leave_church(&self, viewer: &Viewer) -> Result<()> {
		let profile_id = viewer.require()?;

		let now = OffsetDateTime::now_utc();

		if !profiles::set_church(&self.db.pool, profile_id, None, now).await? {
			return Err(Error::not_found("Viewer profile not found."));
		}

		tracing::info!(%profile_id, "Left church.");

		Ok(())
	}

	async fn load_church(&self, church_id: Uuid) -> Result<Church> {
		churches::get_church(&self.db.pool, church_id)
			.await?
			.ok_or_else(|| Error::not_found("Church not found."))
	}
}

/// Start of the trailing `days` window ending at `now`.
fn activity_window_start(now: OffsetDateTime, days: i64) -> Result<OffsetDateTime> {
	days
		.checked_mul(SECONDS_PER_DAY)
		.map(Duration::seconds)
		.and_then(|window| now.checked_sub(window))
		.ok_or_else(|| Error::invalid(format!("Activity window of {days} days is out of range.")))
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;

	#[test]
	fn activity_window_counts_back_from_now() {
		let now = datetime!(2024-03-10 12:00 UTC);

		assert_eq!(activity_window_start(now, 7).ok(), Some(datetime!(2024-03-03 12:00 UTC)));
	}

	#[test]
	fn oversized_activity_window_is_rejected_without_panicking() {
		let now = datetime!(2024-03-10 12:00 UTC);

		assert!(matches!(
			activity_window_start(now, 100_000_000),
			Err(Error::InvalidRequest { .. })
		));
		assert!(matches!(
			activity_window_start(now, i64::MAX),
			Err(Error::InvalidRequest { .. })
		));
	}
}
