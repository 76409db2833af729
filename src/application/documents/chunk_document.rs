use serde_json::{Map, Value};

use crate::domain::documents::chunker::{TextChunk, TextChunker};
use crate::domain::documents::errors::ChunkError;

/// Use case for splitting a document into overlapping chunks
pub struct ChunkDocumentUseCase {
  chunker: TextChunker,
}

impl ChunkDocumentUseCase {
  /// Creates a new instance of ChunkDocumentUseCase
  pub fn new(chunker: TextChunker) -> Self {
    Self { chunker }
  }

  /// Executes the chunking use case
  ///
  /// Blocks on tokenization; run it off the async executor.
  pub fn execute(
    &self,
    text: &str,
    metadata: Map<String, Value>,
  ) -> Result<Vec<TextChunk>, ChunkError> {
    let chunks = self.chunker.chunk(text, metadata).inspect_err(|e| {
      tracing::error!(error = %e, "Document chunking failed");
    })?;

    tracing::info!(
      chunks = chunks.len(),
      tokens = chunks.iter().map(|c| c.tokens).sum::<usize>(),
      chunk_size = self.chunker.chunk_size(),
      overlap = self.chunker.overlap(),
      "Document chunked"
    );
    Ok(chunks)
  }
}
