//! Core types for accelerator resolution.

pub mod backend;
pub mod error;
pub mod presence;
pub mod resolver;

// Re-export core types
pub use backend::*;
pub use error::*;
pub use presence::*;
pub use resolver::*;
