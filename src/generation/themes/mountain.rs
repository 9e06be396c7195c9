//! # Mountain Theme
//!
//! Rising staircases of floating platforms. Each step sits one block above the
//! previous one, starting at running-jump height, with small holes in front of
//! some staircases.

use super::builders::{stamp_pipe, stamp_platform, try_carve_gap};
use crate::config::RUNNING_JUMP_HEIGHT;
use crate::generation::placement::place_enemy;
use crate::generation::{LevelRng, StructureReport, ThemeContext, ThemeGenerator};
use crate::grid::{Grid, TileType};

/// Widest hole carved in front of a staircase.
pub const MOUNTAIN_MAX_GAP: usize = 2;

/// Builds mountain levels.
#[derive(Debug, Clone, Copy, Default)]
pub struct MountainGenerator;

impl MountainGenerator {
    /// Highest elevation a step may reach.
    fn max_step_elevation(grid: &Grid) -> i32 {
        (grid.height as i32 - 9).max(1)
    }

    /// Stamps one staircase, returning the number of steps, or `None` if the
    /// footprint was not clear.
    fn try_staircase(
        &self,
        grid: &mut Grid,
        x0: i32,
        steps: i32,
        step_width: i32,
        rng: &mut LevelRng,
        report: &mut StructureReport,
    ) -> Option<i32> {
        let floor = grid.floor_row();
        let max_elevation = Self::max_step_elevation(grid);
        let first = (RUNNING_JUMP_HEIGHT as i32).min(max_elevation);
        let top = floor - max_elevation - 2;
        if top < 1 || !grid.area_is_empty(x0 - 1, top, x0 + steps * step_width, grid.ground_row()) {
            return None;
        }

        for i in 0..steps {
            let elevation = (first + i).min(max_elevation);
            let y = floor - elevation;
            let x = x0 + i * step_width;
            stamp_platform(grid, x, y, step_width, TileType::Ground);
            report.platforms += 1;

            if i == steps - 1 && rng.chance(0.25) {
                stamp_pipe(grid, x, y, 1);
                report.pipes += 1;
            } else if rng.chance(0.35) && place_enemy(grid, x + step_width / 2, y - 1) {
                report.enemies += 1;
            }
        }
        Some(steps)
    }
}

impl ThemeGenerator for MountainGenerator {
    fn build(&self, grid: &mut Grid, ctx: &ThemeContext, rng: &mut LevelRng) -> StructureReport {
        let mut report = StructureReport::default();

        let mountains = (2 + ctx.d() / 2).min(5);
        let most_steps = (3 + ctx.d() / 2).min(5);
        for _ in 0..mountains {
            for _ in 0..8 {
                let steps = rng.range_inclusive(2, most_steps);
                let step_width = rng.range_inclusive(2, 3);
                let x0 = rng.range(18, ctx.width_i() - 16 - steps * step_width);
                if self
                    .try_staircase(grid, x0, steps, step_width, rng, &mut report)
                    .is_none()
                {
                    continue;
                }
                if rng.chance(0.3) {
                    let width = rng.range_inclusive(1, MOUNTAIN_MAX_GAP as i32);
                    if let Some(gap) = try_carve_gap(grid, x0 - 3 - width, width as usize) {
                        report.gaps.push(gap);
                    }
                }
                break;
            }
        }

        let ground = grid.ground_row();
        let enemies = (3 + ctx.d()).min(8);
        for _ in 0..enemies {
            let x = rng.range(15, ctx.width_i() - 10);
            if place_enemy(grid, x, ground) {
                report.enemies += 1;
            }
        }

        report
    }

    fn max_gap_width(&self) -> usize {
        MOUNTAIN_MAX_GAP
    }

    fn generator_type(&self) -> &'static str {
        "MountainGenerator"
    }
}
