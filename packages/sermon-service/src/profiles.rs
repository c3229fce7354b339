use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use sermon_domain::{content::Location, role::Role, username};
use sermon_storage::{
	churches::{self, NewChurch},
	models::Profile,
	profiles::{self, NewProfile, ProfilePatch},
};

use crate::{Error, Result, SermonService, viewer::Viewer};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewChurchRequest {
	pub name: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub location: Location,
	#[serde(default)]
	pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterProfileRequest {
	/// Identifier issued by the identity provider.
	pub id: Uuid,
	pub username: String,
	#[serde(default)]
	pub full_name: Option<String>,
	#[serde(default)]
	pub avatar_url: Option<String>,
	/// Registers a church alongside the profile; the new profile becomes its admin.
	#[serde(default)]
	pub church: Option<NewChurchRequest>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
	#[serde(default)]
	pub username: Option<String>,
	#[serde(default)]
	pub full_name: Option<String>,
	#[serde(default)]
	pub bio: Option<String>,
	#[serde(default)]
	pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
	pub id: Uuid,
	pub username: String,
	pub full_name: Option<String>,
	pub bio: Option<String>,
	pub avatar_url: Option<String>,
	pub church_id: Option<Uuid>,
	pub role: Role,
}
impl From<Profile> for ProfileView {
	fn from(profile: Profile) -> Self {
		Self {
			id: profile.id,
			role: Role::parse(&profile.role).unwrap_or_default(),
			username: profile.username,
			full_name: profile.full_name,
			bio: profile.bio,
			avatar_url: profile.avatar_url,
			church_id: profile.church_id,
		}
	}
}

impl SermonService {
	pub async fn register_profile(&self, req: RegisterProfileRequest) -> Result<ProfileView> {
		let username = username::normalize_username(&req.username).ok_or_else(|| {
			Error::invalid("username must be 3 to 30 letters, digits, '_' or '.'.")
		})?;
		let now = OffsetDateTime::now_utc();
		let mut tx = self.db.pool.begin().await?;
		let mut church_id = None;

		if let Some(church) = req.church.as_ref() {
			let name = church.name.trim();

			if name.is_empty() {
				return Err(Error::invalid("church.name is required."));
			}

			let new_church = NewChurch {
				id: Uuid::new_v4(),
				name: name.to_string(),
				description: church.description.trim().to_string(),
				location: church.location.to_value(),
				image_url: church.image_url.clone(),
				created_at: now,
			};

			churches::insert_church(&mut *tx, &new_church).await?;

			church_id = Some(new_church.id);
		}

		let role = if church_id.is_some() { Role::ChurchAdmin } else { Role::Member };
		let profile = NewProfile {
			id: req.id,
			username: username.to_string(),
			full_name: non_blank(req.full_name),
			avatar_url: non_blank(req.avatar_url),
			church_id,
			role: role.as_str().to_string(),
			created_at: now,
		};

		profiles::insert_profile(&mut *tx, &profile).await?;

		tx.commit().await?;

		tracing::info!(profile_id = %profile.id, ?church_id, "Registered profile.");

		let stored = profiles::get_profile(&self.db.pool, profile.id)
			.await?
			.ok_or_else(|| Error::not_found("Profile not found."))?;

		Ok(stored.into())
	}

	pub async fn update_profile(
		&self,
		viewer: &Viewer,
		req: UpdateProfileRequest,
	) -> Result<ProfileView> {
		let profile_id = viewer.require()?;
		let username = match req.username.as_deref() {
			Some(raw) => Some(
				username::normalize_username(raw)
					.ok_or_else(|| {
						Error::invalid("username must be 3 to 30 letters, digits, '_' or '.'.")
					})?
					.to_string(),
			),
			None => None,
		};
		let patch = ProfilePatch {
			username,
			full_name: req.full_name.map(|value| value.trim().to_string()),
			bio: req.bio.map(|value| value.trim().to_string()),
			avatar_url: req.avatar_url.map(|value| value.trim().to_string()),
		};
		let updated =
			profiles::update_profile(&self.db.pool, profile_id, &patch, OffsetDateTime::now_utc())
				.await?
				.ok_or_else(|| Error::not_found("Profile not found."))?;

		Ok(updated.into())
	}

	/// Maps a username to its profile id, ignoring case.
	pub async fn resolve_username(&self, raw: &str) -> Result<Uuid> {
		let username = raw.trim().trim_start_matches('@');

		if username.is_empty() {
			return Err(Error::invalid("username is required."));
		}

		profiles::find_by_username(&self.db.pool, username)
			.await?
			.map(|profile| profile.id)
			.ok_or_else(|| Error::not_found("Profile not found."))
	}
}

fn non_blank(value: Option<String>) -> Option<String> {
	value.map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}
