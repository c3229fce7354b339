mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Churches, Config, Feed, Notes, Notifications, Postgres, Search, Security, Service, Storage,
	Trending,
};

use std::{fs, path::Path};

pub const MAX_RECENT_ACTIVITY_DAYS: i64 = 36_500;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	parse(&raw).map_err(|err| match err {
		Error::ParseConfig { source, .. } =>
			Error::ParseConfig { path: path.to_path_buf(), source },
		other => other,
	})
}

pub fn parse(raw: &str) -> Result<Config> {
	let mut cfg: Config = toml::from_str(raw)
		.map_err(|err| Error::ParseConfig { path: Default::default(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	for (label, value) in [
		("service.http_bind", &cfg.service.http_bind),
		("service.admin_bind", &cfg.service.admin_bind),
		("storage.postgres.dsn", &cfg.storage.postgres.dsn),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.search.per_category_limit == 0 {
		return Err(Error::Validation {
			message: "search.per_category_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.search.max_term_chars == 0 {
		return Err(Error::Validation {
			message: "search.max_term_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.search.query_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "search.query_timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.feed.default_page_size == 0 {
		return Err(Error::Validation {
			message: "feed.default_page_size must be greater than zero.".to_string(),
		});
	}
	if cfg.feed.default_page_size > cfg.feed.max_page_size {
		return Err(Error::Validation {
			message: "feed.default_page_size must not exceed feed.max_page_size.".to_string(),
		});
	}
	if cfg.notes.max_title_chars == 0 {
		return Err(Error::Validation {
			message: "notes.max_title_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.notes.max_comment_chars == 0 {
		return Err(Error::Validation {
			message: "notes.max_comment_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.notifications.unread_limit == 0 {
		return Err(Error::Validation {
			message: "notifications.unread_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.trending.limit == 0 {
		return Err(Error::Validation {
			message: "trending.limit must be greater than zero.".to_string(),
		});
	}
	if cfg.churches.recent_activity_days <= 0 {
		return Err(Error::Validation {
			message: "churches.recent_activity_days must be greater than zero.".to_string(),
		});
	}
	if cfg.churches.recent_activity_days > MAX_RECENT_ACTIVITY_DAYS {
		return Err(Error::Validation {
			message: format!(
				"churches.recent_activity_days must be at most {MAX_RECENT_ACTIVITY_DAYS}."
			),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg
		.security
		.admin_auth_token
		.as_deref()
		.map(|token| token.trim().is_empty())
		.unwrap_or(false)
	{
		cfg.security.admin_auth_token = None;
	}
	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
