//! Semantic model to span/block tree: placement, parenting, paragraph and
//! raw fill, ids and provenance.

pub mod ids;
pub mod placement;
pub mod provenance;
pub mod repair;
pub mod walker;

#[cfg(test)]
mod tests;

pub use ids::{IdGenerator, ROOT_BLOCK_ID, ROOT_SPAN_ID};
pub use provenance::{Provenance, Shape, SourceOrigin, classify};
pub use repair::ensure_root_span_and_block;
pub use walker::{Structure, WalkInput, build};
