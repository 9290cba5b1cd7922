//! Lint rules organized by category.

pub mod layout;

// Re-export all rules
pub use layout::*;
