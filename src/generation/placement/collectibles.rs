//! # Coin and Question-Block Placement
//!
//! A collectible site is an empty cell with solid support a bounded distance
//! below it and no other coin or question block within three rows in the same
//! column.

use crate::generation::{GenerationConfig, LevelRng, ThemeContext};
use crate::grid::{Grid, TileType};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

/// Rows above and below a collectible that must stay free of other collectibles.
pub const STACKING_BAND: i32 = 3;

/// Distance to the first solid cell below `(x, y)`, if it lies within `max`.
pub fn support_distance(grid: &Grid, x: i32, y: i32, max: i32) -> Option<i32> {
    (1..=max).find(|&d| grid.is_solid(x, y + d))
}

/// Whether another coin or question block sits within the stacking band.
pub fn collectible_nearby(grid: &Grid, x: i32, y: i32) -> bool {
    (-STACKING_BAND..=STACKING_BAND)
        .filter(|&dy| dy != 0)
        .any(|dy| grid.get(x, y + dy).is_collectible())
}

/// Checks whether `(x, y)` can hold a coin.
///
/// # Examples
///
/// ```
/// use stagecraft::{is_coin_site, Grid, TileType};
///
/// let mut grid = Grid::with_floor(20, 15);
/// assert!(is_coin_site(&grid, 4, 11, 5));
/// assert!(!is_coin_site(&grid, 4, 8, 5));
///
/// grid.set(4, 13, TileType::Coin);
/// assert!(!is_coin_site(&grid, 4, 11, 5));
/// ```
pub fn is_coin_site(grid: &Grid, x: i32, y: i32, max_support: i32) -> bool {
    grid.is_empty(x, y)
        && support_distance(grid, x, y, max_support).is_some()
        && !collectible_nearby(grid, x, y)
}

/// Checks whether `(x, y)` can hold a question block.
///
/// The three cells below must be empty so the player can stand underneath and
/// bump it, with the standing surface four or five rows down.
pub fn is_question_block_site(grid: &Grid, x: i32, y: i32) -> bool {
    if !grid.is_empty(x, y) || collectible_nearby(grid, x, y) {
        return false;
    }
    if !(1..=3).all(|d| grid.is_empty(x, y + d)) {
        return false;
    }
    matches!(support_distance(grid, x, y, 5), Some(4) | Some(5))
}

/// Places one to three question blocks at random bumpable sites.
pub fn add_limited_question_blocks(grid: &mut Grid, ctx: &ThemeContext, rng: &mut LevelRng) -> usize {
    let target = rng.range_inclusive(1, 3) as usize;
    let floor = grid.floor_row();
    let max_x = ctx.width_i() - 10;

    let mut placed = 0;
    for _ in 0..60 {
        if placed >= target {
            break;
        }
        let x = rng.range(15, max_x);
        let y = rng.range(2, floor - 3);
        if is_question_block_site(grid, x, y) {
            trace!("question block at ({x}, {y})");
            grid.set(x, y, TileType::QuestionBlock);
            placed += 1;
        }
    }

    debug!("question blocks: {placed}/{target} placed");
    placed
}

/// Outcome of the coin pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinReport {
    /// Coins the random phase aimed for
    pub target: usize,
    /// Coins placed in total
    pub placed: usize,
    /// Coins placed by the deterministic fallback
    pub fallback: usize,
}

/// Row two cells above the highest standing surface in column `x`.
fn fallback_row(grid: &Grid, x: i32) -> Option<i32> {
    (3..=grid.floor_row())
        .find(|&y| grid.is_solid(x, y) && !grid.is_solid(x, y - 1) && !grid.is_solid(x, y - 2))
        .map(|y| y - 2)
}

/// The single coin pass, run once at the end of the pipeline.
///
/// Aims for a random count between `coin_target_min` and `coin_target_max`
/// using up to `coin_attempts` random draws, then tops up to `coin_floor` by
/// scanning columns left to right, every third column first and then every
/// column.
pub fn add_coins_to_level(grid: &mut Grid, config: &GenerationConfig, rng: &mut LevelRng) -> CoinReport {
    let target = rng.range_inclusive(config.coin_target_min as i32, config.coin_target_max as i32) as usize;
    let width = grid.width as i32;
    let height = grid.height as i32;
    let support = config.coin_support_distance;

    let mut placed = 0;
    for _ in 0..config.coin_attempts {
        if placed >= target {
            break;
        }
        let x = rng.range(5, width - 6);
        let y = rng.range(2, height - 2);
        if is_coin_site(grid, x, y, support) {
            grid.set(x, y, TileType::Coin);
            placed += 1;
        }
    }

    let mut fallback = 0;
    if placed < config.coin_floor {
        for stride in [3, 1] {
            for x in (5..(width - 6).max(5)).step_by(stride) {
                if placed >= config.coin_floor {
                    break;
                }
                let Some(y) = fallback_row(grid, x) else {
                    continue;
                };
                if is_coin_site(grid, x, y, support) {
                    grid.set(x, y, TileType::Coin);
                    placed += 1;
                    fallback += 1;
                }
            }
        }
        warn!("coin pass fell back to fixed positions for {fallback} coins");
    }

    debug!("coins: {placed} placed (target {target}, fallback {fallback})");
    CoinReport {
        target,
        placed,
        fallback,
    }
}
