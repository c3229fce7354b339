use std::sync::Arc;

use sermon_service::SermonService;
use sermon_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<SermonService>,
}
impl AppState {
	pub async fn new(config: sermon_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::from_service(SermonService::new(config, db)))
	}

	pub fn from_service(service: SermonService) -> Self {
		Self { service: Arc::new(service) }
	}
}
