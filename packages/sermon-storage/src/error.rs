const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(sqlx::Error),
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	#[error("Not found: {0}")]
	NotFound(String),
	#[error("Conflict: {0}")]
	Conflict(String),
}
impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		if let Some(db_err) = err.as_database_error()
			&& db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
		{
			let target = db_err.constraint().unwrap_or("unique constraint").to_string();

			return Self::Conflict(format!("Duplicate value violates {target}."));
		}

		Self::Sqlx(err)
	}
}
