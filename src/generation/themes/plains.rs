//! # Plains Theme
//!
//! Open ground with low pipes, a few short platforms and bands of floor gaps
//! that widen with difficulty.

use super::builders::{try_carve_gap, try_place_pipe, try_place_platform};
use crate::config::MAX_GAP_WIDTH;
use crate::generation::placement::place_enemy;
use crate::generation::{LevelRng, StructureReport, ThemeContext, ThemeGenerator};
use crate::grid::{Grid, TileType};

/// Builds plains levels.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainsGenerator;

impl PlainsGenerator {
    fn place_pipes(&self, grid: &mut Grid, ctx: &ThemeContext, rng: &mut LevelRng) -> usize {
        let target = (3 + ctx.d()).min(7);
        let mut placed = 0;
        for _ in 0..target {
            for _ in 0..10 {
                let x = rng.range(12, ctx.width_i() - 20);
                if try_place_pipe(grid, x, 1) {
                    placed += 1;
                    break;
                }
            }
        }
        placed
    }

    fn place_platforms(&self, grid: &mut Grid, ctx: &ThemeContext, rng: &mut LevelRng) -> usize {
        let target = (2 + ctx.d() / 2).min(5);
        let floor = grid.floor_row();
        let mut placed = 0;
        for _ in 0..target {
            for _ in 0..10 {
                let x = rng.range(15, ctx.width_i() - 20);
                let len = rng.range(3, 6);
                let y = floor - rng.range(4, 6);
                let tile = if rng.chance(0.25) {
                    TileType::Ground
                } else {
                    TileType::Block
                };
                if try_place_platform(grid, x, y, len, tile) {
                    placed += 1;
                    break;
                }
            }
        }
        placed
    }
}

impl ThemeGenerator for PlainsGenerator {
    fn build(&self, grid: &mut Grid, ctx: &ThemeContext, rng: &mut LevelRng) -> StructureReport {
        let mut report = StructureReport {
            pipes: self.place_pipes(grid, ctx, rng),
            platforms: self.place_platforms(grid, ctx, rng),
            ..StructureReport::default()
        };

        let bands = (2 + ctx.d()).min(6);
        let widest = (2 + ctx.d() / 2).min(MAX_GAP_WIDTH as i32);
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

        let ground = grid.ground_row();
        let direct = (3 + ctx.d()).min(10);
        for _ in 0..direct {
            let x = rng.range(15, ctx.width_i() - 10);
            if place_enemy(grid, x, ground) {
                report.enemies += 1;
            }
        }

        // Enemies guarding the gap edges
        for gap in report.gaps.clone() {
            if !rng.chance(0.6) {
                continue;
            }
            let x = if rng.chance(0.5) {
                gap.start - 2
            } else {
                gap.start + gap.width as i32 + 1
            };
            if place_enemy(grid, x, ground) {
                report.enemies += 1;
            }
        }

        report
    }

    fn max_gap_width(&self) -> usize {
        MAX_GAP_WIDTH
    }

    fn generator_type(&self) -> &'static str {
        "PlainsGenerator"
    }
}
