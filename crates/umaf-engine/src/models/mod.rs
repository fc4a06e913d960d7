pub mod envelope;
pub mod semantic;
pub mod structure;

pub use envelope::Envelope;
pub use semantic::{Bullet, CodeBlock, FrontMatterEntry, Section, SemanticModel, Table};
pub use structure::{Block, BlockBody, BlockKind, Span};
