//! Ports layer: Trait definitions for the external collaborators.
//!
//! Following Hexagonal Architecture, these traits define the boundary between
//! the form handler and the loaded artifacts.

mod classifier;
mod preprocessor;

pub use classifier::Classifier;
pub use preprocessor::Preprocessor;
