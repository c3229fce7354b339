use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub search: Search,
	pub feed: Feed,
	#[serde(default)]
	pub notes: Notes,
	#[serde(default)]
	pub notifications: Notifications,
	#[serde(default)]
	pub trending: Trending,
	#[serde(default)]
	pub churches: Churches,
	pub security: Security,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	/// Maximum rows returned per category (people, churches, notes).
	pub per_category_limit: u32,
	pub max_term_chars: u32,
	pub query_timeout_ms: u64,
	/// When true, a failed category is dropped and reported instead of failing the whole search.
	#[serde(default = "default_partial_results")]
	pub partial_results: bool,
}

#[derive(Debug, Deserialize)]
pub struct Feed {
	pub default_page_size: u32,
	pub max_page_size: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Notes {
	pub max_title_chars: u32,
	pub max_tags: u32,
	pub max_comment_chars: u32,
}
impl Default for Notes {
	fn default() -> Self {
		Self { max_title_chars: 200, max_tags: 10, max_comment_chars: 2_000 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Notifications {
	pub unread_limit: u32,
}
impl Default for Notifications {
	fn default() -> Self {
		Self { unread_limit: 5 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Trending {
	pub limit: u32,
}
impl Default for Trending {
	fn default() -> Self {
		Self { limit: 5 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Churches {
	pub recent_activity_days: i64,
}
impl Default for Churches {
	fn default() -> Self {
		Self { recent_activity_days: 7 }
	}
}

#[derive(Debug, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
	pub admin_auth_token: Option<String>,
}

fn default_partial_results() -> bool {
	true
}
