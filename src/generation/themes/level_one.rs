//! # Level One
//!
//! The curated introductory layout. Nothing here draws from the RNG.

use super::builders::{stamp_pipe, stamp_platform};
use crate::generation::{LevelRng, StructureReport, ThemeContext, ThemeGenerator};
use crate::grid::{Grid, TileType};

/// Columns of the five one-block pipes.
pub const LEVEL_ONE_PIPES: [i32; 5] = [18, 35, 52, 75, 95];

/// Columns of the ground enemies.
pub const LEVEL_ONE_ENEMIES: [i32; 4] = [30, 50, 65, 85];

/// Question blocks as `(column, rows above the bottom edge)`; the row is
/// `height - n`.
pub const LEVEL_ONE_QUESTION_BLOCKS: [(i32, i32); 3] = [(40, 11), (70, 11), (55, 10)];

/// Floating platforms as `(column, length, rows above the bottom edge)`.
const LEVEL_ONE_PLATFORMS: [(i32, i32, i32); 5] =
    [(22, 3, 5), (38, 5, 5), (53, 5, 6), (68, 5, 5), (88, 4, 6)];

/// First column of the closing staircase.
const STAIRCASE_X: i32 = 104;

/// Builds the fixed first level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelOneLayout;

impl ThemeGenerator for LevelOneLayout {
    fn build(&self, grid: &mut Grid, _ctx: &ThemeContext, _rng: &mut LevelRng) -> StructureReport {
        let height = grid.height as i32;
        let floor = grid.floor_row();
        let ground = grid.ground_row();
        let mut report = StructureReport::default();

        for x in LEVEL_ONE_PIPES {
            stamp_pipe(grid, x, floor, 1);
            report.pipes += 1;
        }

        for (x, len, rows_up) in LEVEL_ONE_PLATFORMS {
            stamp_platform(grid, x, height - rows_up, len, TileType::Block);
            report.platforms += 1;
        }

        // Four-step staircase before the goal
        for step in 0..4 {
            for y in (ground - step)..=ground {
                grid.set(STAIRCASE_X + step, y, TileType::Ground);
            }
        }
        report.platforms += 1;

        for x in LEVEL_ONE_ENEMIES {
            if grid.set(x, ground, TileType::Enemy) {
                report.enemies += 1;
            }
        }

        for (x, rows_up) in LEVEL_ONE_QUESTION_BLOCKS {
            if grid.set(x, height - rows_up, TileType::QuestionBlock) {
                report.question_blocks += 1;
            }
        }

        report
    }

    fn max_gap_width(&self) -> usize {
        0
    }

    fn generator_type(&self) -> &'static str {
        "LevelOneLayout"
    }
}
