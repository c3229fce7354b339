use serde::Serialize;

use sermon_storage::trending;

use crate::{Result, SermonService};

#[derive(Debug, Clone, Serialize)]
pub struct TrendingTagView {
	pub name: String,
	pub note_count: i64,
}

impl SermonService {
	pub async fn trending_tags(&self) -> Result<Vec<TrendingTagView>> {
		let limit = i64::from(self.cfg.trending.limit);
		let rows = trending::trending_tags(&self.db.pool, limit).await?;

		Ok(rows
			.into_iter()
			.map(|row| TrendingTagView { name: row.name, note_count: row.note_count })
			.collect())
	}
}
