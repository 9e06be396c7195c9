//! # Stagecraft
//!
//! Deterministic procedural level generation for a side-scrolling platformer.
//!
//! ## Architecture Overview
//!
//! A level is built by a linear pipeline of passes over a single tile grid.
//! Every pass owns the grid mutably for its duration and hands it on:
//!
//! - **Structure**: a theme generator (or the curated first level) stamps pipes,
//!   platforms, floor gaps and enemies
//! - **Goal**: the flagpole and flag are stamped at the right edge
//! - **Safety**: over-tall stacks, low overhangs and tall pipes are removed and
//!   every ground column is made walkable or jumpable
//! - **Stepping stones**: low platforms are inserted near unreachable ones
//! - **Coins**: the single coin pass fills the level with 6 to 12 coins
//!
//! All randomness comes from [`LevelRng`], reseeded from the level number at the
//! start of every generation, so the same level number always yields the same
//! grid.
//!
//! ```
//! use stagecraft::LevelGenerator;
//!
//! let generator = LevelGenerator::default();
//! let first = generator.generate_dynamic_level(12).unwrap();
//! let again = generator.generate_dynamic_level(12).unwrap();
//! assert_eq!(first.grid, again.grid);
//! ```

pub mod generation;
pub mod grid;
pub mod rendering;
pub mod serialize;

pub use generation::*;
pub use grid::*;
pub use rendering::*;
pub use serialize::*;

pub use generation::pipeline::{
    GeneratedLevel, GenerationReport, LevelGenerator, PipelineStage,
};

/// Core error type for the level generator.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Level numbers start at 1
    #[error("Invalid level number: {0}")]
    InvalidLevel(u32),

    /// Generation configuration is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A serialized grid could not be decoded
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// A generated level breaks one of its structural guarantees
    #[error("Invariant violated: {0}")]
    InvariantViolated(String),
}

/// Result type used throughout the Stagecraft codebase.
pub type StageResult<T> = Result<T, StageError>;

/// Version information for the generator.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gameplay and geometry constants shared by every pass.
pub mod config {
    /// Default level width in tiles
    pub const LEVEL_WIDTH: usize = 120;

    /// Default level height in tiles
    pub const LEVEL_HEIGHT: usize = 15;

    /// Height of the player in tiles
    pub const MARIO_HEIGHT: usize = 2;

    /// Blocks the player clears with a standing jump
    pub const REGULAR_JUMP_HEIGHT: usize = 3;

    /// Blocks the player clears with a running jump
    pub const RUNNING_JUMP_HEIGHT: usize = 4;

    /// Tallest ground obstacle the path scan still treats as jumpable
    pub const MAX_OBSTACLE_JUMP: usize = 5;

    /// Minimum run of open cells beneath an overhang
    pub const MIN_HEADROOM: usize = MARIO_HEIGHT + 1;

    /// Widest floor gap left in a finished level
    pub const MAX_GAP_WIDTH: usize = 4;

    /// Columns at the right edge reserved for the goal
    pub const GOAL_ZONE: usize = 4;

    /// Highest difficulty tier
    pub const MAX_DIFFICULTY: u32 = 8;

    /// Levels sharing one difficulty tier and theme
    pub const LEVELS_PER_WORLD: u32 = 7;

    /// Highest level number the front end offers
    pub const MAX_LEVEL: u32 = 999;
}
