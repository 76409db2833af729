//! Application layer
//!
//! Use cases that validate input, call the domain ports and decide where
//! the client goes next.

pub mod auth;
pub mod documents;
