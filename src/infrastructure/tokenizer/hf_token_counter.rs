use std::path::Path;
use tokenizers::Tokenizer;

use crate::domain::documents::errors::ChunkError;
use crate::domain::documents::ports::TokenCounter;

/// Counts tokens with a Hugging Face `tokenizer.json`
///
/// Point it at the file shipped with the embedding model (for example the
/// one from `Qwen/Qwen3-0.6B`) so chunk budgets match what the model sees.
pub struct HfTokenCounter {
  tokenizer: Tokenizer,
}

impl HfTokenCounter {
  /// Loads a serialized tokenizer from disk
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ChunkError> {
    let path = path.as_ref();
    let tokenizer = Tokenizer::from_file(path).map_err(|e| {
      ChunkError::TokenizerUnavailable(format!("{}: {}", path.display(), e))
    })?;

    tracing::debug!(path = %path.display(), "Loaded tokenizer");
    Ok(Self { tokenizer })
  }
}

impl TokenCounter for HfTokenCounter {
  fn count_tokens(&self, text: &str) -> Result<usize, ChunkError> {
    self
      .tokenizer
      .encode(text, true)
      .map(|encoding| encoding.len())
      .map_err(|e| ChunkError::Tokenize(e.to_string()))
  }
}
