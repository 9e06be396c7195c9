//! # Underground Theme
//!
//! A ceilinged cave: dense and taller pipes, few platforms, narrow gaps and
//! single-block holes, more enemies.

use super::builders::{stamp_ceiling, try_carve_gap, try_place_pipe, try_place_platform};
use crate::config::REGULAR_JUMP_HEIGHT;
use crate::generation::placement::place_enemy;
use crate::generation::{LevelRng, StructureReport, ThemeContext, ThemeGenerator};
use crate::grid::{Grid, TileType};
use log::trace;

/// Fewest pipes an underground level ends up with.
pub const MIN_UNDERGROUND_PIPES: usize = 4;

/// Builds underground levels.
#[derive(Debug, Clone, Copy, Default)]
pub struct UndergroundGenerator;

impl UndergroundGenerator {
    fn place_pipes(&self, grid: &mut Grid, ctx: &ThemeContext, rng: &mut LevelRng) -> usize {
        let target = (4 + ctx.d()).min(8) as usize;
        let tallest = (2 + ctx.d() / 3).min(REGULAR_JUMP_HEIGHT as i32);
        let mut placed = 0;
        for _ in 0..target {
            for _ in 0..12 {
                let x = rng.range(10, ctx.width_i() - 16);
                let height = rng.range_inclusive(1, tallest);
                if try_place_pipe(grid, x, height) {
                    placed += 1;
                    break;
                }
            }
        }

        // Forced left-to-right fill when the random draws came up short
        let mut x = 12;
        while placed < MIN_UNDERGROUND_PIPES.min(target) && x < ctx.width_i() - 16 {
            if try_place_pipe(grid, x, 1) {
                trace!("forced pipe at column {x}");
                placed += 1;
            }
            x += 1;
        }
        placed
    }
}

impl ThemeGenerator for UndergroundGenerator {
    fn build(&self, grid: &mut Grid, ctx: &ThemeContext, rng: &mut LevelRng) -> StructureReport {
        stamp_ceiling(grid);

        let mut report = StructureReport {
            pipes: self.place_pipes(grid, ctx, rng),
            ..StructureReport::default()
        };

        let floor = grid.floor_row();
        let platforms = (1 + ctx.d() / 3).min(3);
        for _ in 0..platforms {
            for _ in 0..8 {
                let x = rng.range(15, ctx.width_i() - 20);
                let len = rng.range(3, 5);
                if try_place_platform(grid, x, floor - 5, len, TileType::Block) {
                    report.platforms += 1;
                    break;
                }
            }
        }

        let bands = (1 + ctx.d() / 2).min(4);
        let widest = (2 + ctx.d() / 4).min(self.max_gap_width() as i32);
        for _ in 0..bands {
            for _ in 0..10 {
                let width = rng.range_inclusive(2, widest);
                let x = rng.range(15, ctx.width_i() - 15 - width);
                if let Some(gap) = try_carve_gap(grid, x, width as usize) {
                    report.gaps.push(gap);
                    break;
                }
            }
        }

        let holes = (2 + ctx.d() / 2).min(5);
        for _ in 0..holes {
            for _ in 0..6 {
                let x = rng.range(15, ctx.width_i() - 15);
                if let Some(gap) = try_carve_gap(grid, x, 1) {
                    report.gaps.push(gap);
                    break;
                }
            }
        }

        let ground = grid.ground_row();
        let enemies = (5 + 2 * ctx.d()).min(14);
        for _ in 0..enemies {
            let x = rng.range(15, ctx.width_i() - 10);
            if place_enemy(grid, x, ground) {
                report.enemies += 1;
            }
        }

        report
    }

    fn max_gap_width(&self) -> usize {
        crate::config::MAX_GAP_WIDTH
    }

    fn generator_type(&self) -> &'static str {
        "UndergroundGenerator"
    }
}
