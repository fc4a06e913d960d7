pub mod bullet;
pub mod code_fence;
pub mod front_matter;
pub mod heading;
pub mod table;

pub use bullet::BulletMarker;
pub use code_fence::{CodeFence, FenceRole, FenceSig};
pub use front_matter::{FrontMatter, FrontMatterBlock};
pub use heading::{AtxHeading, Heading};
pub use table::PipeTable;
