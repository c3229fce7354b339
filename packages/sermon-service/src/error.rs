pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Remote failure: {message}")]
	Remote { message: String },
	#[error("A signed-in viewer is required.")]
	Unauthenticated,
	#[error("Forbidden: {message}")]
	Forbidden { message: String },
	#[error("Conflict: {message}")]
	Conflict { message: String },
}
impl Error {
	pub(crate) fn invalid(message: impl Into<String>) -> Self {
		Self::InvalidRequest { message: message.into() }
	}

	pub(crate) fn not_found(message: impl Into<String>) -> Self {
		Self::NotFound { message: message.into() }
	}
}
impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		sermon_storage::Error::from(err).into()
	}
}
impl From<sermon_storage::Error> for Error {
	fn from(err: sermon_storage::Error) -> Self {
		match err {
			sermon_storage::Error::Sqlx(inner) => Self::Remote { message: inner.to_string() },
			sermon_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			sermon_storage::Error::NotFound(message) => Self::NotFound { message },
			sermon_storage::Error::Conflict(message) => Self::Conflict { message },
		}
	}
}
