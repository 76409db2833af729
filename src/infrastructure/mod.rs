//! Infrastructure layer
//!
//! Configuration loading and the adapters behind the domain ports: the
//! Supabase auth client, the rendered page cache and the tokenizer.

pub mod cache;
pub mod config;
pub mod supabase;
pub mod tokenizer;
