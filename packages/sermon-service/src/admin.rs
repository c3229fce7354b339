use serde::{Deserialize, Serialize};

use sermon_storage::legacy;

use crate::{Error, Result, SermonService, normalize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrateLegacyRequest {
	pub batch_size: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LegacyMigrationReport {
	pub churches: u64,
	pub notes: u64,
}

impl SermonService {
	/// Rewrites rows that still keep structured content inside the text column into the split
	/// form, one batch per transaction, until none are left.
	pub async fn migrate_legacy_content(
		&self,
		req: MigrateLegacyRequest,
	) -> Result<LegacyMigrationReport> {
		if req.batch_size == 0 {
			return Err(Error::invalid("batch_size must be greater than zero."));
		}

		let limit = i64::from(req.batch_size);
		let mut report = LegacyMigrationReport::default();

		loop {
			let mut tx = self.db.pool.begin().await?;
			let rows = legacy::legacy_churches(&mut *tx, limit).await?;

			for row in &rows {
				let decoded = normalize::church_details(row.id, row.description.as_deref(), None);

				legacy::split_church(
					&mut *tx,
					row.id,
					&decoded.value.description,
					&decoded.value.location.to_value(),
				)
				.await?;
			}

			tx.commit().await?;

			report.churches += rows.len() as u64;

			if rows.len() < req.batch_size as usize {
				break;
			}
		}
		loop {
			let mut tx = self.db.pool.begin().await?;
			let rows = legacy::legacy_notes(&mut *tx, limit).await?;

			for row in &rows {
				let decoded = normalize::sermon_content(row.id, &row.content, None);
				let (body, meta) = decoded.value.split();

				legacy::split_note(&mut *tx, row.id, &body, &meta.to_value()).await?;
			}

			tx.commit().await?;

			report.notes += rows.len() as u64;

			if rows.len() < req.batch_size as usize {
				break;
			}
		}

		tracing::info!(
			churches = report.churches,
			notes = report.notes,
			"Migrated legacy content."
		);

		Ok(report)
	}
}
