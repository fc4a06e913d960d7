pub mod adapters;
pub mod batch;
pub mod cache;
pub mod engine;
pub mod error;
pub mod io;
pub mod media;
pub mod models;
pub mod normalize;
pub mod parsing;
pub mod router;
pub mod snapshot;
pub mod structure;
pub mod version;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use engine::{Engine, OutputFormat, Transformed};
pub use error::{Result, UmafError};
pub use models::{Block, BlockBody, BlockKind, Envelope, SemanticModel, Span};
pub use router::{Route, route};
pub use structure::ensure_root_span_and_block;
