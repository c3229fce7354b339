use time::OffsetDateTime;
use uuid::Uuid;

/// Position after the last row of a feed page, ordered by `(created_at DESC, id DESC)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedCursor {
	pub created_at: OffsetDateTime,
	pub id: Uuid,
}
impl FeedCursor {
	pub fn new(created_at: OffsetDateTime, id: Uuid) -> Self {
		Self { created_at, id }
	}

	pub fn encode(&self) -> String {
		format!("{}_{}", self.created_at.unix_timestamp_nanos(), self.id.simple())
	}

	pub fn decode(raw: &str) -> Option<Self> {
		let (nanos, id) = raw.trim().split_once('_')?;
		let nanos: i128 = nanos.parse().ok()?;
		let created_at = OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()?;
		let id = Uuid::parse_str(id).ok()?;

		Some(Self { created_at, id })
	}
}
