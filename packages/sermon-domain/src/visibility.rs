use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
	Public,
	Private,
	Church,
}
impl Visibility {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Public => "public",
			Self::Private => "private",
			Self::Church => "church",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim() {
			"public" => Some(Self::Public),
			"private" => Some(Self::Private),
			"church" => Some(Self::Church),
			_ => None,
		}
	}
}

/// Who is asking, as far as note visibility is concerned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Audience {
	pub profile_id: Option<Uuid>,
	pub church_id: Option<Uuid>,
}

pub struct NoteAccess {
	pub visibility: Visibility,
	pub author_id: Uuid,
	pub church_id: Option<Uuid>,
}

pub fn note_visible(note: &NoteAccess, audience: &Audience) -> bool {
	if audience.profile_id == Some(note.author_id) {
		return true;
	}

	match note.visibility {
		Visibility::Public => true,
		Visibility::Private => false,
		Visibility::Church => match (note.church_id, audience.church_id) {
			(Some(note_church), Some(viewer_church)) => note_church == viewer_church,
			_ => false,
		},
	}
}
