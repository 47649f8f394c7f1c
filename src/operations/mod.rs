pub mod generate;
pub mod merge;
pub mod offset;

pub use generate::{EmbankmentGeneration, OffsetMode};
pub use merge::merge_lines;
pub use offset::{ConstantDistanceOffset, CrossSectionOffset, Side, Sides};
