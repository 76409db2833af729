pub mod chunker;
pub mod errors;
pub mod ports;

// Re-export commonly used types
pub use chunker::{DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP, TextChunk, TextChunker, split_sentences};
pub use errors::ChunkError;
pub use ports::TokenCounter;
