pub mod auth;
pub mod documents;

pub use auth::*;
