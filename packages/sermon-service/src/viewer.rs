use uuid::Uuid;

use sermon_domain::visibility::Audience;
use sermon_storage::{models::Profile, profiles};

use crate::{Error, Result, SermonService};

/// The actor behind a request, as reported by the identity provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewer {
	pub profile_id: Option<Uuid>,
}
impl Viewer {
	pub fn anonymous() -> Self {
		Self { profile_id: None }
	}

	pub fn signed_in(profile_id: Uuid) -> Self {
		Self { profile_id: Some(profile_id) }
	}

	pub fn require(&self) -> Result<Uuid> {
		self.profile_id.ok_or(Error::Unauthenticated)
	}
}

impl SermonService {
	pub(crate) async fn viewer_profile(&self, viewer: &Viewer) -> Result<Profile> {
		let profile_id = viewer.require()?;

		profiles::get_profile(&self.db.pool, profile_id)
			.await?
			.ok_or_else(|| Error::not_found("Viewer profile not found."))
	}

	/// Visibility context for `viewer`. A signed-in viewer without a profile sees only what an
	/// author sees of their own notes.
	pub(crate) async fn audience(&self, viewer: &Viewer) -> Result<Audience> {
		let Some(profile_id) = viewer.profile_id else {
			return Ok(Audience::default());
		};
		let church_id = profiles::get_profile(&self.db.pool, profile_id)
			.await?
			.and_then(|profile| profile.church_id);

		Ok(Audience { profile_id: Some(profile_id), church_id })
	}
}
