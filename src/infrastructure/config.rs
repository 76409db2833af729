use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use super::cache::DEFAULT_MAX_ENTRIES;
use crate::domain::documents::{DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP};

fn default_request_timeout() -> u64 {
  10
}

fn default_rate_limit_replenish_seconds() -> u64 {
  2
}

fn default_rate_limit_burst_size() -> u32 {
  10
}

fn default_true() -> bool {
  true
}

fn default_page_cache_max_entries() -> usize {
  DEFAULT_MAX_ENTRIES
}

fn default_chunk_size() -> usize {
  DEFAULT_CHUNK_SIZE
}

fn default_chunk_overlap() -> usize {
  DEFAULT_OVERLAP
}

fn default_chunker_max_body_bytes() -> usize {
  2 * 1024 * 1024
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub supabase: SupabaseConfig,
  #[serde(default)]
  pub app: AppConfig,
  #[serde(default)]
  pub session: SessionConfig,
  #[serde(default)]
  pub rate_limit: RateLimitConfig,
  #[serde(default)]
  pub page_cache: PageCacheConfig,
  #[serde(default)]
  pub chunker: ChunkerConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
}

/// Hosted auth provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseConfig {
  /// Project URL, e.g. https://xyzcompany.supabase.co
  pub url: String,
  /// Public anon key sent as the `apikey` header
  pub anon_key: String,
  #[serde(default = "default_request_timeout")]
  pub request_timeout_seconds: u64,
}

/// Public-facing application settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  /// Base URL users reach this app at; sign-up refuses to run without it
  pub public_url: Option<String>,
}

/// Session cookie settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
  /// Mark the session cookie `Secure` (enable behind HTTPS)
  #[serde(default)]
  pub secure_cookies: bool,
}

/// Rate limiting for the auth form endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
  #[serde(default = "default_true")]
  pub enabled: bool,
  /// Seconds after which one request of the burst quota is replenished
  #[serde(default = "default_rate_limit_replenish_seconds")]
  pub replenish_seconds: u64,
  #[serde(default = "default_rate_limit_burst_size")]
  pub burst_size: u32,
}

impl Default for RateLimitConfig {
  fn default() -> Self {
    Self {
      enabled: true,
      replenish_seconds: default_rate_limit_replenish_seconds(),
      burst_size: default_rate_limit_burst_size(),
    }
  }
}

/// Rendered page cache settings
#[derive(Debug, Clone, Deserialize)]
pub struct PageCacheConfig {
  /// Pages kept before the oldest is evicted
  #[serde(default = "default_page_cache_max_entries")]
  pub max_entries: usize,
}

impl Default for PageCacheConfig {
  fn default() -> Self {
    Self {
      max_entries: default_page_cache_max_entries(),
    }
  }
}

/// Document chunking settings
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkerConfig {
  /// Hugging Face `tokenizer.json`; the document API is off while unset
  #[serde(default)]
  pub tokenizer_path: Option<String>,
  #[serde(default = "default_chunk_size")]
  pub chunk_size: usize,
  #[serde(default = "default_chunk_overlap")]
  pub overlap: usize,
  #[serde(default = "default_chunker_max_body_bytes")]
  pub max_body_bytes: usize,
}

impl Default for ChunkerConfig {
  fn default() -> Self {
    Self {
      tokenizer_path: None,
      chunk_size: default_chunk_size(),
      overlap: default_chunk_overlap(),
      max_body_bytes: default_chunker_max_body_bytes(),
    }
  }
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override earlier ones):
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with GATEHOUSE_ prefix
  ///
  /// # Environment Variables
  ///
  /// Environment variables use the GATEHOUSE_ prefix and are separated by double underscores:
  /// - `GATEHOUSE_SERVER__PORT=8080`
  /// - `GATEHOUSE_SUPABASE__URL=https://xyzcompany.supabase.co`
  /// - `GATEHOUSE_SUPABASE__ANON_KEY=eyJhbGciOi...`
  /// - `GATEHOUSE_APP__PUBLIC_URL=https://app.example.com`
  /// - `GATEHOUSE_SESSION__SECURE_COOKIES=true`
  /// - `GATEHOUSE_RATE_LIMIT__BURST_SIZE=20`
  /// - `GATEHOUSE_PAGE_CACHE__MAX_ENTRIES=4096`
  /// - `GATEHOUSE_CHUNKER__TOKENIZER_PATH=models/qwen3/tokenizer.json`
  ///
  /// # Errors
  ///
  /// Returns a `ConfigError` if `config/default.toml` is missing, a source is
  /// not valid TOML, or a required value is missing or has the wrong type.
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("GATEHOUSE")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}
