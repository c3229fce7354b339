use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Profile {
	pub id: Uuid,
	pub username: String,
	pub full_name: Option<String>,
	pub bio: Option<String>,
	pub avatar_url: Option<String>,
	pub church_id: Option<Uuid>,
	pub role: String,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Church {
	pub id: Uuid,
	pub name: String,
	pub description: Option<String>,
	pub location: Option<Value>,
	pub image_url: Option<String>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewSermonNote {
	pub id: Uuid,
	pub user_id: Uuid,
	pub title: String,
	pub content: String,
	pub sermon: Value,
	pub privacy: String,
	pub church_id: Option<Uuid>,
	pub created_at: OffsetDateTime,
}

/// Note joined with its author, as used by feeds and note detail.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NoteWithAuthor {
	pub id: Uuid,
	pub user_id: Uuid,
	pub title: String,
	pub content: String,
	pub sermon: Option<Value>,
	pub privacy: String,
	pub church_id: Option<Uuid>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
	pub author_username: String,
	pub author_full_name: Option<String>,
	pub author_avatar_url: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileMatch {
	pub id: Uuid,
	pub username: String,
	pub full_name: Option<String>,
	pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChurchMatch {
	pub id: Uuid,
	pub name: String,
	pub description: Option<String>,
	pub location: Option<Value>,
	pub image_url: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NoteMatch {
	pub id: Uuid,
	pub title: String,
	pub author_username: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Tag {
	pub id: Uuid,
	pub name: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NoteTag {
	pub sermon_id: Uuid,
	pub name: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
	pub id: Uuid,
	pub sermon_id: Uuid,
	pub user_id: Uuid,
	pub content: String,
	pub created_at: OffsetDateTime,
	pub username: String,
	pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Notification {
	pub id: Uuid,
	pub user_id: Uuid,
	pub kind: String,
	pub content: String,
	pub read: bool,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TrendingTag {
	pub id: Uuid,
	pub name: String,
	pub note_count: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LegacyChurch {
	pub id: Uuid,
	pub description: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LegacyNote {
	pub id: Uuid,
	pub content: String,
}
