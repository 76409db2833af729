use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

use super::errors::ChunkError;
use super::ports::TokenCounter;

/// Token budget of one chunk
pub const DEFAULT_CHUNK_SIZE: usize = 8000;

/// Token budget of the sentences repeated at the start of the next chunk
pub const DEFAULT_OVERLAP: usize = 500;

/// One piece of a chunked document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextChunk {
  pub text: String,
  pub metadata: Map<String, Value>,
  pub chunk_index: usize,
  pub total_chunks: usize,
  pub tokens: usize,
}

/// Sentences of `text` with surrounding whitespace stripped, empties dropped
pub fn split_sentences(text: &str) -> Vec<&str> {
  text
    .split_sentence_bounds()
    .map(str::trim)
    .filter(|sentence| !sentence.is_empty())
    .collect()
}

/// Sentences gathered for one chunk, each with its token count
type SentenceGroup<'a> = Vec<(&'a str, usize)>;

fn group_tokens(group: &SentenceGroup<'_>) -> usize {
  group.iter().map(|(_, tokens)| tokens).sum()
}

/// Splits text at sentence boundaries into token-budgeted chunks
///
/// Consecutive chunks share trailing sentences worth at most `overlap`
/// tokens. A sentence over the budget on its own becomes a chunk by
/// itself, with no overlap carried into or out of it.
pub struct TextChunker {
  counter: Arc<dyn TokenCounter>,
  chunk_size: usize,
  overlap: usize,
}

impl TextChunker {
  pub fn new(counter: Arc<dyn TokenCounter>, chunk_size: usize, overlap: usize) -> Self {
    Self {
      counter,
      chunk_size,
      overlap,
    }
  }

  pub fn chunk_size(&self) -> usize {
    self.chunk_size
  }

  pub fn overlap(&self) -> usize {
    self.overlap
  }

  /// Chunks `text`, copying `metadata` onto every chunk
  ///
  /// Text that fits the budget, or has no sentences, comes back whole as
  /// a single chunk.
  pub fn chunk(
    &self,
    text: &str,
    metadata: Map<String, Value>,
  ) -> Result<Vec<TextChunk>, ChunkError> {
    let total_tokens = self.counter.count_tokens(text)?;

    if total_tokens <= self.chunk_size {
      return Ok(vec![whole(text, metadata, total_tokens)]);
    }

    let sentences = split_sentences(text);
    if sentences.is_empty() {
      return Ok(vec![whole(text, metadata, total_tokens)]);
    }

    let groups = self.group_sentences(&sentences)?;
    let total_chunks = groups.len();

    Ok(
      groups
        .iter()
        .enumerate()
        .map(|(chunk_index, group)| TextChunk {
          text: group
            .iter()
            .map(|(sentence, _)| *sentence)
            .collect::<Vec<_>>()
            .join(" "),
          metadata: metadata.clone(),
          chunk_index,
          total_chunks,
          tokens: group_tokens(group),
        })
        .collect(),
    )
  }

  fn group_sentences<'a>(&self, sentences: &[&'a str]) -> Result<Vec<SentenceGroup<'a>>, ChunkError> {
    let mut groups = Vec::new();
    let mut current: SentenceGroup<'a> = Vec::new();
    let mut current_tokens = 0;

    for &sentence in sentences {
      let tokens = self.counter.count_tokens(sentence)?;

      if tokens > self.chunk_size {
        if !current.is_empty() {
          groups.push(std::mem::take(&mut current));
          current_tokens = 0;
        }
        groups.push(vec![(sentence, tokens)]);
        continue;
      }

      if current_tokens + tokens > self.chunk_size && !current.is_empty() {
        let seed = self.overlap_tail(&current);
        current_tokens = group_tokens(&seed);
        groups.push(std::mem::replace(&mut current, seed));
      }

      current.push((sentence, tokens));
      current_tokens += tokens;
    }

    if !current.is_empty() {
      groups.push(current);
    }

    Ok(groups)
  }

  /// Trailing sentences of `group` that fit within the overlap budget
  fn overlap_tail<'a>(&self, group: &SentenceGroup<'a>) -> SentenceGroup<'a> {
    let mut tail = Vec::new();
    let mut tokens = 0;

    for &(sentence, sentence_tokens) in group.iter().rev() {
      if tokens + sentence_tokens > self.overlap {
        break;
      }
      tail.push((sentence, sentence_tokens));
      tokens += sentence_tokens;
    }

    tail.reverse();
    tail
  }
}

fn whole(text: &str, metadata: Map<String, Value>, tokens: usize) -> TextChunk {
  TextChunk {
    text: text.to_string(),
    metadata,
    chunk_index: 0,
    total_chunks: 1,
    tokens,
  }
}
