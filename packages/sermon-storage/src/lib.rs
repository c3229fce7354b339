pub mod churches;
pub mod db;
pub mod follows;
pub mod legacy;
pub mod models;
pub mod notes;
pub mod notifications;
pub mod profiles;
pub mod reactions;
pub mod schema;
pub mod search;
pub mod tags;
pub mod trending;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
