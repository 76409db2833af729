//! Document preparation
//!
//! Splits uploaded text into chunks sized for the embedding model.

mod chunk_document;

pub use chunk_document::ChunkDocumentUseCase;
