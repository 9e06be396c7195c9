//! # Generation Module
//!
//! Procedural level generation: themes, entity placement and the corrective
//! passes that keep every level completable.
//!
//! The pipeline in [`pipeline`] wires the passes together. Each pass is a plain
//! function over `&mut Grid`, so the order in which they run is visible at the
//! single call site that drives them.

pub mod pipeline;
pub mod placement;
pub mod reachability;
pub mod rng;
pub mod safety;
pub mod stepping;
pub mod themes;

pub use placement::*;
pub use reachability::*;
pub use rng::*;
pub use safety::*;
pub use stepping::*;
pub use themes::*;

use crate::config::{LEVELS_PER_WORLD, MAX_DIFFICULTY};
use crate::grid::{FloorGap, Grid};
use crate::{StageError, StageResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for level generation.
///
/// Geometry and placement targets. Every field has a default, so a JSON file
/// only needs to name the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Level width in tiles
    pub width: usize,
    /// Level height in tiles
    pub height: usize,
    /// Fewest coins the random coin phase aims for
    pub coin_target_min: usize,
    /// Most coins the random coin phase aims for
    pub coin_target_max: usize,
    /// Coins guaranteed by the fallback phase
    pub coin_floor: usize,
    /// Random placement attempts before falling back
    pub coin_attempts: usize,
    /// Farthest a coin may float above its support
    pub coin_support_distance: i32,
    /// Natural enemies added at difficulty 0
    pub natural_enemy_base: usize,
    /// Upper bound on natural enemies
    pub natural_enemy_cap: usize,
    /// Minimum columns between naturally placed enemies
    pub natural_enemy_spacing: i32,
    /// Minimum columns between force-placed enemies
    pub forced_enemy_spacing: i32,
    /// Whether to run the reachability check after generation
    pub check_reachability: bool,
}

impl GenerationConfig {
    /// Creates the standard configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use stagecraft::GenerationConfig;
    ///
    /// let config = GenerationConfig::new();
    /// assert_eq!(config.width, 120);
    /// assert_eq!(config.height, 15);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new() -> Self {
        Self {
            width: crate::config::LEVEL_WIDTH,
            height: crate::config::LEVEL_HEIGHT,
            coin_target_min: 8,
            coin_target_max: 12,
            coin_floor: 6,
            coin_attempts: 500,
            coin_support_distance: 5,
            natural_enemy_base: 10,
            natural_enemy_cap: 20,
            natural_enemy_spacing: 8,
            forced_enemy_spacing: 5,
            check_reachability: true,
        }
    }

    /// Creates a configuration for testing. Same geometry, reachability checked.
    pub fn for_testing() -> Self {
        Self {
            check_reachability: true,
            ..Self::new()
        }
    }

    /// Parses a configuration from JSON, filling omitted fields with defaults.
    pub fn from_json_str(json: &str) -> StageResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> StageResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Rejects configurations the passes cannot honour.
    pub fn validate(&self) -> StageResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(StageError::InvalidConfig(format!(
                "level dimensions must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.coin_target_min > self.coin_target_max {
            return Err(StageError::InvalidConfig(format!(
                "coin_target_min ({}) exceeds coin_target_max ({})",
                self.coin_target_min, self.coin_target_max
            )));
        }
        if self.coin_floor > self.coin_target_max {
            return Err(StageError::InvalidConfig(format!(
                "coin_floor ({}) exceeds coin_target_max ({})",
                self.coin_floor, self.coin_target_max
            )));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Difficulty tier of a level: one tier per world of seven levels, capped.
///
/// # Examples
///
/// ```
/// use stagecraft::difficulty_tier;
///
/// assert_eq!(difficulty_tier(1), 0);
/// assert_eq!(difficulty_tier(7), 0);
/// assert_eq!(difficulty_tier(8), 1);
/// assert_eq!(difficulty_tier(500), 8);
/// ```
pub fn difficulty_tier(level_number: u32) -> u32 {
    world_index(level_number).min(MAX_DIFFICULTY)
}

/// Uncapped world index of a level, used for theme rotation.
pub fn world_index(level_number: u32) -> u32 {
    level_number.saturating_sub(1) / LEVELS_PER_WORLD
}

/// Human-readable name of a difficulty tier.
pub fn difficulty_label(difficulty: u32) -> &'static str {
    match difficulty {
        0 => "Beginner",
        1 => "Easy",
        2 => "Normal",
        3 => "Tricky",
        4 => "Hard",
        5 => "Very Hard",
        6 => "Expert",
        7 => "Master",
        _ => "Legendary",
    }
}

/// Everything a theme generator needs to know about the level it builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeContext {
    /// 1-based level number
    pub level_number: u32,
    /// Level width in tiles
    pub width: usize,
    /// Level height in tiles
    pub height: usize,
    /// Difficulty tier, already capped
    pub difficulty: u32,
    /// Display name of the difficulty tier
    pub difficulty_label: &'static str,
}

impl ThemeContext {
    /// Builds the context for a level under the given configuration.
    pub fn for_level(level_number: u32, config: &GenerationConfig) -> Self {
        let difficulty = difficulty_tier(level_number);
        Self {
            level_number,
            width: config.width,
            height: config.height,
            difficulty,
            difficulty_label: difficulty_label(difficulty),
        }
    }

    /// Difficulty as a signed value for arithmetic on coordinates.
    pub fn d(&self) -> i32 {
        self.difficulty as i32
    }

    pub fn width_i(&self) -> i32 {
        self.width as i32
    }
}

/// What a structure pass put into the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureReport {
    /// Pipes stamped
    pub pipes: usize,
    /// Platforms stamped (including mountain steps)
    pub platforms: usize,
    /// Floor gaps carved
    pub gaps: Vec<FloorGap>,
    /// Enemies placed by the theme itself
    pub enemies: usize,
    /// Question blocks placed by the theme itself
    pub question_blocks: usize,
}

/// Trait for theme generators.
///
/// A theme generator only adds structure: pipes, platforms, floor gaps and its
/// own enemies. Everything after that is handled by the shared passes.
pub trait ThemeGenerator {
    /// Stamps the theme's structure onto a grid that already has its floor.
    fn build(&self, grid: &mut Grid, ctx: &ThemeContext, rng: &mut LevelRng) -> StructureReport;

    /// Widest floor gap this theme carves.
    fn max_gap_width(&self) -> usize;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use crate::config::{GOAL_ZONE, MAX_GAP_WIDTH, MIN_HEADROOM, RUNNING_JUMP_HEIGHT};
    use crate::grid::TileType;

    /// Creates the level RNG for a level number.
    pub fn create_rng(level_number: u32) -> LevelRng {
        LevelRng::new(u64::from(level_number))
    }

    /// Checks that a finished level meets its structural guarantees.
    ///
    /// Verifies the goal tiles, the stack-height limit, the floor-gap limit
    /// and the collectible anti-stacking rule.
    pub fn validate_level(grid: &Grid) -> StageResult<()> {
        let width = grid.width as i32;
        let pole_x = width - 3;
        let flag_x = width - 2;

        if (0..grid.height as i32).all(|y| grid.get(pole_x, y) != TileType::Flagpole) {
            return Err(StageError::InvariantViolated(format!(
                "no flagpole in column {pole_x}"
            )));
        }
        if (0..grid.height as i32).all(|y| grid.get(flag_x, y) != TileType::Flag) {
            return Err(StageError::InvariantViolated(format!(
                "no flag in column {flag_x}"
            )));
        }

        for x in 0..width {
            let stack = grid.stack_height(x);
            if stack > RUNNING_JUMP_HEIGHT {
                return Err(StageError::InvariantViolated(format!(
                    "column {x} has a stack of {stack} blocks"
                )));
            }
        }

        if let Some(gap) = grid.floor_gaps().iter().find(|gap| gap.width > MAX_GAP_WIDTH) {
            return Err(StageError::InvariantViolated(format!(
                "floor gap at column {} is {} wide",
                gap.start, gap.width
            )));
        }

        for x in 0..width {
            let rows: Vec<i32> = (0..grid.height as i32)
                .filter(|&y| grid.get(x, y).is_collectible())
                .collect();
            if let Some(pair) = rows.windows(2).find(|pair| pair[1] - pair[0] <= 3) {
                return Err(StageError::InvariantViolated(format!(
                    "collectibles stacked in column {x} at rows {} and {}",
                    pair[0], pair[1]
                )));
            }
        }

        Ok(())
    }

    /// Checks the headroom rule: every overhang outside the goal zone has at
    /// least [`MIN_HEADROOM`] open cells beneath it.
    ///
    /// Only meaningful straight after the safety pass; stepping stones are
    /// allowed to sit lower.
    pub fn validate_headroom(grid: &Grid) -> StageResult<()> {
        let playable = grid.width.saturating_sub(GOAL_ZONE) as i32;
        for x in 0..playable {
            for y in 1..grid.ground_row() {
                if !grid.is_solid(x, y) || grid.is_solid(x, y + 1) {
                    continue;
                }
                let clearance = crate::generation::safety::clearance_below(grid, x, y);
                if clearance < MIN_HEADROOM {
                    return Err(StageError::InvariantViolated(format!(
                        "block at ({x}, {y}) has only {clearance} open cells beneath"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_defaults() {
        let config = GenerationConfig::new();
        assert_eq!(config.coin_target_min, 8);
        assert_eq!(config.coin_target_max, 12);
        assert_eq!(config.coin_floor, 6);
        assert_eq!(config.coin_attempts, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_inverted_coin_targets() {
        let config = GenerationConfig {
            coin_target_min: 13,
            ..GenerationConfig::new()
        };
        assert!(matches!(
            config.validate(),
            Err(StageError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_partial_json() {
        let config = GenerationConfig::from_json_str(r#"{ "width": 80 }"#).unwrap();
        assert_eq!(config.width, 80);
        assert_eq!(config.height, 15);

        assert!(GenerationConfig::from_json_str(r#"{ "height": 0 }"#).is_err());
        assert!(GenerationConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_difficulty_tiers() {
        assert_eq!(difficulty_tier(1), 0);
        assert_eq!(difficulty_tier(15), 2);
        assert_eq!(difficulty_tier(57), 8);
        assert_eq!(difficulty_tier(999), 8);
        assert_eq!(world_index(999), 142);
        assert_eq!(difficulty_label(0), "Beginner");
        assert_eq!(difficulty_label(42), "Legendary");
    }

    #[test]
    fn test_validate_level_catches_tall_stack() {
        let mut grid = Grid::with_floor(30, 15);
        grid.set(27, 13, crate::TileType::Flagpole);
        grid.set(28, 5, crate::TileType::Flag);
        assert!(utils::validate_level(&grid).is_ok());

        for y in 8..=13 {
            grid.set(4, y, crate::TileType::Ground);
        }
        assert!(utils::validate_level(&grid).is_err());
    }
}
