//! Stochastic pixel model over a quantized palette

/// Color-to-bucket lookup
pub mod classify;
/// Grid synthesis from a trained model
pub mod generate;
/// Training pixel buffers
pub mod training;
/// Count table population and sampling
pub mod transition;

pub use training::TrainingImage;
pub use transition::{PopulationSummary, TransitionModel};
