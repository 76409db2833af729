use thiserror::Error;

/// Errors raised while splitting a document into chunks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkError {
  /// The tokenizer could not be loaded
  #[error("Tokenizer unavailable: {0}")]
  TokenizerUnavailable(String),

  /// The tokenizer rejected the text
  #[error("Tokenization failed: {0}")]
  Tokenize(String),
}
