//! Palette construction by recursive median cut

/// Split-driven palette builder and empty-bucket compaction
pub mod builder;

pub use builder::{PaletteBuilder, compact};
