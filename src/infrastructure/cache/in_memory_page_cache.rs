use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::auth::errors::CacheError;
use crate::domain::auth::ports::PageCache;

/// Default upper bound on cached pages
pub const DEFAULT_MAX_ENTRIES: usize = 1024;

struct CachedPage {
  html: String,
  stamp: u64,
}

#[derive(Default)]
struct Entries {
  pages: HashMap<(String, Uuid), CachedPage>,
  next_stamp: u64,
}

impl Entries {
  /// Drops the page that was written longest ago
  fn evict_oldest(&mut self) -> Option<(String, Uuid)> {
    let oldest = self
      .pages
      .iter()
      .min_by_key(|(_, page)| page.stamp)
      .map(|(key, _)| key.clone())?;
    self.pages.remove(&oldest);
    Some(oldest)
  }
}

/// Process-local cache of rendered pages
///
/// Entries are keyed by route path and user so one user's dashboard is
/// never served to another. Entries live until revalidated or until the
/// cache is full, at which point the oldest write is evicted.
pub struct InMemoryPageCache {
  entries: RwLock<Entries>,
  max_entries: usize,
}

impl Default for InMemoryPageCache {
  fn default() -> Self {
    Self::with_capacity(DEFAULT_MAX_ENTRIES)
  }
}

impl InMemoryPageCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// A cache holding at most `max_entries` pages (at least one)
  pub fn with_capacity(max_entries: usize) -> Self {
    Self {
      entries: RwLock::new(Entries::default()),
      max_entries: max_entries.max(1),
    }
  }

  pub fn len(&self) -> usize {
    self.entries.read().pages.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Strips a trailing slash so `/dashboard/` and `/dashboard` share entries
fn normalize(path: &str) -> &str {
  if path.len() > 1 {
    path.strip_suffix('/').unwrap_or(path)
  } else {
    path
  }
}

/// True when `cached` is `scope` itself or nested below it
fn in_scope(scope: &str, cached: &str) -> bool {
  scope == "/"
    || cached == scope
    || cached
      .strip_prefix(scope)
      .is_some_and(|rest| rest.starts_with('/'))
}

#[async_trait]
impl PageCache for InMemoryPageCache {
  async fn get(&self, path: &str, user_id: Uuid) -> Result<Option<String>, CacheError> {
    let entries = self.entries.read();
    Ok(
      entries
        .pages
        .get(&(normalize(path).to_string(), user_id))
        .map(|page| page.html.clone()),
    )
  }

  async fn put(&self, path: &str, user_id: Uuid, html: String) -> Result<(), CacheError> {
    let key = (normalize(path).to_string(), user_id);
    let mut entries = self.entries.write();

    if !entries.pages.contains_key(&key) && entries.pages.len() >= self.max_entries {
      if let Some((evicted, _)) = entries.evict_oldest() {
        tracing::debug!(path = %evicted, "Evicted page from full cache");
      }
    }

    let stamp = entries.next_stamp;
    entries.next_stamp += 1;
    entries.pages.insert(key, CachedPage { html, stamp });
    Ok(())
  }

  async fn revalidate_path(&self, path: &str) -> Result<usize, CacheError> {
    let scope = normalize(path);
    let mut entries = self.entries.write();

    let before = entries.pages.len();
    entries.pages.retain(|(cached, _), _| !in_scope(scope, cached));
    let dropped = before - entries.pages.len();

    tracing::debug!(path = scope, dropped, "Revalidated page cache");
    Ok(dropped)
  }
}
