//! # Rendering Module
//!
//! Text previews of generated levels for the terminal.

pub mod ascii;

pub use ascii::*;
