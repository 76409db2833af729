use super::errors::ChunkError;

/// Counts model tokens in a piece of text
///
/// Counting is CPU-bound and synchronous; callers on an async runtime
/// should run it on a blocking thread.
pub trait TokenCounter: Send + Sync {
  /// Number of tokens `text` encodes to, special tokens included
  fn count_tokens(&self, text: &str) -> Result<usize, ChunkError>;
}
