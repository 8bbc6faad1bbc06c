//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod cue;
pub mod error;
pub mod identifiers;

// Re-export for convenience
pub use cue::Cue;
pub use error::{AppError, SourceError};
pub use identifiers::{InvalidSourceUrl, SourceUrl};
