//! # Level Pipeline
//!
//! Drives one level from level number to finished grid.
//!
//! The stages run strictly in order, each owning the grid mutably until it
//! returns:
//!
//! 1. [`PipelineStage::Structure`]: the level-1 layout, or the world's theme
//!    generator followed by natural enemies and question blocks
//! 2. [`PipelineStage::Goal`]: flagpole and flag
//! 3. [`PipelineStage::Safety`]: [`apply_safety_check`]
//! 4. [`PipelineStage::SteppingStones`]: [`add_stepping_stones`]
//! 5. [`PipelineStage::Coins`]: [`add_coins_to_level`]

use crate::generation::placement::{
    add_coins_to_level, add_limited_question_blocks, add_natural_enemies, CoinReport,
};
use crate::generation::reachability::check_reachability;
use crate::generation::safety::{apply_safety_check, SafetyReport};
use crate::generation::stepping::{add_stepping_stones, SteppingReport};
use crate::generation::themes::{LevelOneLayout, PlainsGenerator, Theme};
use crate::generation::{utils, GenerationConfig, StructureReport, ThemeContext, ThemeGenerator};
use crate::grid::{Grid, TileType};
use crate::{StageError, StageResult};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rows of the flagpole, counted up from the bottom edge.
const FLAGPOLE_TOP: i32 = 10;

/// A point in the pipeline to stop after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Structure,
    Goal,
    Safety,
    SteppingStones,
    Coins,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Structure => "structure",
            PipelineStage::Goal => "goal",
            PipelineStage::Safety => "safety",
            PipelineStage::SteppingStones => "stepping_stones",
            PipelineStage::Coins => "coins",
        };
        f.write_str(name)
    }
}

/// Everything the pipeline did to produce a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub level_number: u32,
    pub difficulty: u32,
    pub difficulty_label: String,
    /// Theme name shown to the player
    pub display_theme: String,
    /// Theme whose generator actually built the level
    pub active_theme: String,
    /// Last stage that ran
    pub stage: PipelineStage,
    pub structure: StructureReport,
    pub natural_enemies: usize,
    pub question_blocks: usize,
    pub safety: SafetyReport,
    pub stepping: SteppingReport,
    pub coins: CoinReport,
    /// Result of the reachability check, when it ran
    pub reachable: Option<bool>,
}

impl GenerationReport {
    fn new(ctx: &ThemeContext) -> Self {
        let (display_theme, active_theme) = if ctx.level_number == 1 {
            ("classic".to_string(), "classic".to_string())
        } else {
            (
                Theme::display_for_level(ctx.level_number)
                    .map(|t| t.name().to_string())
                    .unwrap_or_default(),
                Theme::active_for_level(ctx.level_number)
                    .map(|t| t.name().to_string())
                    .unwrap_or_default(),
            )
        };
        Self {
            level_number: ctx.level_number,
            difficulty: ctx.difficulty,
            difficulty_label: ctx.difficulty_label.to_string(),
            display_theme,
            active_theme,
            stage: PipelineStage::Structure,
            structure: StructureReport::default(),
            natural_enemies: 0,
            question_blocks: 0,
            safety: SafetyReport::default(),
            stepping: SteppingReport::default(),
            coins: CoinReport::default(),
            reachable: None,
        }
    }
}

/// A generated grid together with its report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedLevel {
    pub report: GenerationReport,
    pub grid: Grid,
}

impl GeneratedLevel {
    /// The grid in the runtime's string form.
    pub fn serialized_grid(&self) -> StageResult<String> {
        crate::serialize::serialize_grid(&self.grid)
    }

    /// Report and grid as one JSON document.
    pub fn to_json(&self) -> StageResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Stamps the flagpole and flag at the right edge.
pub fn place_goal(grid: &mut Grid) {
    let pole_x = grid.width as i32 - 3;
    let top = (grid.height as i32 - FLAGPOLE_TOP).max(0);
    for y in top..=grid.ground_row() {
        grid.set(pole_x, y, TileType::Flagpole);
    }
    grid.set(pole_x + 1, top, TileType::Flag);
}

/// Generates levels under one configuration.
///
/// The generator holds no state between calls; every call reseeds its own
/// [`LevelRng`](crate::LevelRng) from the level number.
#[derive(Debug, Clone, Default)]
pub struct LevelGenerator {
    config: GenerationConfig,
}

impl LevelGenerator {
    /// Creates a generator, rejecting an invalid configuration.
    pub fn new(config: GenerationConfig) -> StageResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Runs the whole pipeline for a 1-based level number.
    ///
    /// # Examples
    ///
    /// ```
    /// use stagecraft::{LevelGenerator, TileType};
    ///
    /// let level = LevelGenerator::default().generate_dynamic_level(1).unwrap();
    /// assert_eq!(level.grid.get(18, 13), TileType::PipeTopLeft);
    /// assert!(LevelGenerator::default().generate_dynamic_level(0).is_err());
    /// ```
    pub fn generate_dynamic_level(&self, level_number: u32) -> StageResult<GeneratedLevel> {
        self.generate_through(level_number, PipelineStage::Coins)
    }

    /// Runs the whole pipeline and returns the serialized grid.
    pub fn generate_serialized(&self, level_number: u32) -> StageResult<String> {
        self.generate_dynamic_level(level_number)?.serialized_grid()
    }

    /// Runs the pipeline up to and including `stage`.
    pub fn generate_through(
        &self,
        level_number: u32,
        stage: PipelineStage,
    ) -> StageResult<GeneratedLevel> {
        if level_number == 0 {
            return Err(StageError::InvalidLevel(level_number));
        }

        let ctx = ThemeContext::for_level(level_number, &self.config);
        let mut rng = utils::create_rng(level_number);
        let mut grid = Grid::with_floor(ctx.width, ctx.height);
        let mut report = GenerationReport::new(&ctx);

        info!(
            "generating level {} ({}, difficulty {} {})",
            level_number, report.active_theme, ctx.difficulty, ctx.difficulty_label
        );

        if level_number == 1 {
            report.structure = LevelOneLayout.build(&mut grid, &ctx, &mut rng);
        } else {
            let generator: &dyn ThemeGenerator = Theme::active_for_level(level_number)
                .and_then(Theme::generator)
                .unwrap_or(&PlainsGenerator);
            debug!("structure from {}", generator.generator_type());
            report.structure = generator.build(&mut grid, &ctx, &mut rng);
            report.natural_enemies = add_natural_enemies(&mut grid, &ctx, &self.config, &mut rng);
            report.question_blocks = add_limited_question_blocks(&mut grid, &ctx, &mut rng);
        }
        if stage == PipelineStage::Structure {
            return Ok(GeneratedLevel { report, grid });
        }

        place_goal(&mut grid);
        report.stage = PipelineStage::Goal;
        if stage == PipelineStage::Goal {
            return Ok(GeneratedLevel { report, grid });
        }

        report.safety = apply_safety_check(&mut grid);
        report.stage = PipelineStage::Safety;
        if stage == PipelineStage::Safety {
            return Ok(GeneratedLevel { report, grid });
        }

        report.stepping = add_stepping_stones(&mut grid);
        report.stage = PipelineStage::SteppingStones;
        if stage == PipelineStage::SteppingStones {
            return Ok(GeneratedLevel { report, grid });
        }

        report.coins = add_coins_to_level(&mut grid, &self.config, &mut rng);
        report.stage = PipelineStage::Coins;

        if self.config.check_reachability {
            let reachability = check_reachability(&grid);
            if !reachability.reachable {
                warn!("level {level_number}: goal not reachable from the start");
            }
            report.reachable = Some(reachability.reachable);
        }

        info!(
            "level {} done: {} pipes, {} gaps, {} enemies, {} coins",
            level_number,
            grid.pipe_tops().len(),
            grid.floor_gaps().len(),
            grid.count(TileType::Enemy),
            report.coins.placed
        );
        Ok(GeneratedLevel { report, grid })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_zero_rejected() {
        let generator = LevelGenerator::default();
        assert!(matches!(
            generator.generate_dynamic_level(0),
            Err(StageError::InvalidLevel(0))
        ));
    }

    #[test]
    fn test_goal_placement() {
        let mut grid = Grid::with_floor(120, 15);
        place_goal(&mut grid);
        assert_eq!(grid.get(117, 5), TileType::Flagpole);
        assert_eq!(grid.get(117, 13), TileType::Flagpole);
        assert_eq!(grid.get(118, 5), TileType::Flag);
        assert_eq!(grid.count(TileType::Flagpole), 9);
    }

    #[test]
    fn test_stages_stop_where_asked() {
        let generator = LevelGenerator::default();
        let structure = generator.generate_through(9, PipelineStage::Structure).unwrap();
        assert_eq!(structure.report.stage, PipelineStage::Structure);
        assert_eq!(structure.grid.count(TileType::Flagpole), 0);

        let goal = generator.generate_through(9, PipelineStage::Goal).unwrap();
        assert!(goal.grid.count(TileType::Flagpole) > 0);
        assert_eq!(goal.grid.count(TileType::Coin), 0);

        let full = generator.generate_dynamic_level(9).unwrap();
        assert_eq!(full.report.stage, PipelineStage::Coins);
        assert_eq!(full.grid.count(TileType::Coin), full.report.coins.placed);
    }

    #[test]
    fn test_report_themes() {
        let generator = LevelGenerator::default();
        let level = generator.generate_through(8, PipelineStage::Structure).unwrap();
        assert_eq!(level.report.active_theme, "underground");
        assert_eq!(level.report.display_theme, "parkour");
        assert_eq!(level.report.difficulty, 1);

        let first = generator.generate_through(1, PipelineStage::Structure).unwrap();
        assert_eq!(first.report.active_theme, "classic");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GenerationConfig {
            coin_floor: 20,
            ..GenerationConfig::new()
        };
        assert!(LevelGenerator::new(config).is_err());
    }
}
