use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	#[default]
	Member,
	ChurchAdmin,
}
impl Role {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Member => "member",
			Self::ChurchAdmin => "church_admin",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim() {
			"member" => Some(Self::Member),
			"church_admin" => Some(Self::ChurchAdmin),
			_ => None,
		}
	}
}

/// A church admin may remove notes scoped to the church they administer.
pub fn can_moderate(role: Role, admin_church: Option<Uuid>, note_church: Option<Uuid>) -> bool {
	if role != Role::ChurchAdmin {
		return false;
	}

	match (admin_church, note_church) {
		(Some(admin), Some(note)) => admin == note,
		_ => false,
	}
}
