pub mod admin;
pub mod churches;
pub mod feed;
pub mod normalize;
pub mod notes;
pub mod notifications;
pub mod profiles;
pub mod reactions;
pub mod search;
pub mod social;
pub mod time_serde;
pub mod tracker;
pub mod trending;
pub mod viewer;

mod error;

pub use admin::{LegacyMigrationReport, MigrateLegacyRequest};
pub use churches::{ChurchDashboard, ChurchProfile, ChurchView};
pub use error::{Error, Result};
pub use feed::{AuthorSummary, FeedPage, FeedRequest, FeedScope, NoteItem};
pub use notes::{CreateNoteRequest, CreateNoteResponse, NoteDetail};
pub use notifications::NotificationView;
pub use profiles::{NewChurchRequest, ProfileView, RegisterProfileRequest, UpdateProfileRequest};
pub use reactions::{AddCommentRequest, CommentView, PraiseResponse};
pub use search::{Category, ResultKind, SearchRequest, SearchResponse, SearchResult};
pub use social::{FollowResponse, ProfileOverview};
pub use tracker::{SearchTicket, SearchTracker};
pub use trending::TrendingTagView;
pub use viewer::Viewer;

use std::{future::Future, pin::Pin, sync::Arc};

use sqlx::PgPool;

use sermon_config::Config;
use sermon_storage::{
	db::Db,
	models::{ChurchMatch, NoteMatch, ProfileMatch},
	search as search_queries,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The three per-category lookups behind search. `pattern` is an escaped `ILIKE` pattern.
pub trait SearchSource
where
	Self: Send + Sync,
{
	fn people<'a>(
		&'a self,
		pattern: &'a str,
		limit: i64,
	) -> BoxFuture<'a, Result<Vec<ProfileMatch>>>;

	fn churches<'a>(
		&'a self,
		pattern: &'a str,
		limit: i64,
	) -> BoxFuture<'a, Result<Vec<ChurchMatch>>>;

	fn notes<'a>(
		&'a self,
		pattern: &'a str,
		limit: i64,
	) -> BoxFuture<'a, Result<Vec<NoteMatch>>>;
}

pub struct PgSearchSource {
	pool: PgPool,
}
impl PgSearchSource {
	pub fn new(pool: PgPool) -> Self {
		Self { pool }
	}
}
impl SearchSource for PgSearchSource {
	fn people<'a>(
		&'a self,
		pattern: &'a str,
		limit: i64,
	) -> BoxFuture<'a, Result<Vec<ProfileMatch>>> {
		Box::pin(async move {
			Ok(search_queries::search_profiles(&self.pool, pattern, limit).await?)
		})
	}

	fn churches<'a>(
		&'a self,
		pattern: &'a str,
		limit: i64,
	) -> BoxFuture<'a, Result<Vec<ChurchMatch>>> {
		Box::pin(async move {
			Ok(search_queries::search_churches(&self.pool, pattern, limit).await?)
		})
	}

	fn notes<'a>(
		&'a self,
		pattern: &'a str,
		limit: i64,
	) -> BoxFuture<'a, Result<Vec<NoteMatch>>> {
		Box::pin(async move { Ok(search_queries::search_notes(&self.pool, pattern, limit).await?) })
	}
}

pub struct SermonService {
	pub cfg: Config,
	pub db: Db,
	pub search_source: Arc<dyn SearchSource>,
}
impl SermonService {
	pub fn new(cfg: Config, db: Db) -> Self {
		let search_source = Arc::new(PgSearchSource::new(db.pool.clone()));

		Self { cfg, db, search_source }
	}

	pub fn with_search_source(cfg: Config, db: Db, search_source: Arc<dyn SearchSource>) -> Self {
		Self { cfg, db, search_source }
	}
}
