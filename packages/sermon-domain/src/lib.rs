pub mod content;
pub mod cursor;
pub mod role;
pub mod search_term;
pub mod tags;
pub mod username;
pub mod visibility;
