//! # Placement Passes
//!
//! Secondary passes that scan the grid for valid sites and write entities in:
//! enemies, question blocks and the centralized coin pass.

pub mod collectibles;
pub mod enemies;

pub use collectibles::*;
pub use enemies::*;
