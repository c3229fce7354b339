use sermon_config::{
	Churches, Config, Feed, Notes, Notifications, Postgres, Search, Security, Service, Storage,
	Trending,
};

pub fn test_config(dsn: &str, partial_results: bool, query_timeout_ms: u64) -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:8080".to_string(),
			admin_bind: "127.0.0.1:8081".to_string(),
			log_level: "info".to_string(),
		},
		storage: Storage { postgres: Postgres { dsn: dsn.to_string(), pool_max_conns: 2 } },
		search: Search {
			per_category_limit: 3,
			max_term_chars: 64,
			query_timeout_ms,
			partial_results,
		},
		feed: Feed { default_page_size: 2, max_page_size: 50 },
		notes: Notes::default(),
		notifications: Notifications::default(),
		trending: Trending::default(),
		churches: Churches::default(),
		security: Security { bind_localhost_only: true, admin_auth_token: None },
	}
}
