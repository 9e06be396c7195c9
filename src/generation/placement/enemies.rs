//! # Enemy Placement
//!
//! Enemy spawn markers go on empty cells with solid support below and two
//! cells of headroom above. Placement prefers natural sites chosen at random
//! and falls back to a left-to-right forced scan when too few were found.

use crate::generation::{GenerationConfig, LevelRng, ThemeContext};
use crate::grid::{Grid, Position, TileType};
use log::{debug, trace};
use rand::seq::SliceRandom;

/// Columns at the start of a level kept free of enemies.
pub const ENEMY_FREE_START: i32 = 15;

/// Columns before the goal kept free of enemies.
pub const ENEMY_FREE_END: i32 = 10;

/// Checks whether `(x, y)` is a valid enemy site.
///
/// # Examples
///
/// ```
/// use stagecraft::{is_enemy_site, Grid};
///
/// let grid = Grid::with_floor(20, 15);
/// assert!(is_enemy_site(&grid, 5, 13));
/// assert!(!is_enemy_site(&grid, 5, 12));
/// ```
pub fn is_enemy_site(grid: &Grid, x: i32, y: i32) -> bool {
    grid.is_empty(x, y)
        && grid.is_solid(x, y + 1)
        && grid.is_empty(x, y - 1)
        && grid.is_empty(x, y - 2)
}

/// Places an enemy marker if `(x, y)` is a valid site.
pub fn place_enemy(grid: &mut Grid, x: i32, y: i32) -> bool {
    if !is_enemy_site(grid, x, y) {
        return false;
    }
    trace!("enemy at ({x}, {y})");
    grid.set(x, y, TileType::Enemy)
}

/// Lowest valid enemy site in column `x`, if any.
pub fn lowest_enemy_site(grid: &Grid, x: i32) -> Option<i32> {
    (2..=grid.ground_row())
        .rev()
        .find(|&y| is_enemy_site(grid, x, y))
}

fn is_spaced(occupied: &[i32], x: i32, spacing: i32) -> bool {
    occupied.iter().all(|&ox| (ox - x).abs() >= spacing)
}

/// Adds enemies on top of whatever the theme placed.
///
/// Targets `natural_enemy_base + 2 * difficulty` enemies (capped), keeping
/// them `natural_enemy_spacing` columns apart from every enemy already in the
/// level. If the shuffled natural sites run out first, the remaining enemies
/// are forced in column by column with the looser forced spacing. Returns the
/// number placed, which may be below target on crowded levels.
pub fn add_natural_enemies(
    grid: &mut Grid,
    ctx: &ThemeContext,
    config: &GenerationConfig,
    rng: &mut LevelRng,
) -> usize {
    let target = (config.natural_enemy_base + 2 * ctx.difficulty as usize)
        .min(config.natural_enemy_cap);
    let min_x = ENEMY_FREE_START;
    let max_x = grid.width as i32 - ENEMY_FREE_END;

    let mut occupied: Vec<i32> = grid
        .positions_of(TileType::Enemy)
        .iter()
        .map(|pos| pos.x)
        .collect();

    let mut sites = Vec::new();
    for y in 2..=grid.ground_row() {
        for x in min_x..max_x {
            if is_enemy_site(grid, x, y) {
                sites.push(Position::new(x, y));
            }
        }
    }
    sites.shuffle(rng);

    let mut placed = 0;
    for site in sites {
        if placed >= target {
            break;
        }
        if is_spaced(&occupied, site.x, config.natural_enemy_spacing)
            && place_enemy(grid, site.x, site.y)
        {
            occupied.push(site.x);
            placed += 1;
        }
    }
    let natural = placed;

    for x in min_x..max_x {
        if placed >= target {
            break;
        }
        if !is_spaced(&occupied, x, config.forced_enemy_spacing) {
            continue;
        }
        if let Some(y) = lowest_enemy_site(grid, x) {
            if place_enemy(grid, x, y) {
                occupied.push(x);
                placed += 1;
            }
        }
    }

    debug!(
        "natural enemies: {placed}/{target} placed ({natural} natural, {} forced)",
        placed - natural
    );
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils;

    fn context(level_number: u32) -> ThemeContext {
        ThemeContext::for_level(level_number, &GenerationConfig::new())
    }

    #[test]
    fn test_enemy_site_requires_headroom() {
        let mut grid = Grid::with_floor(20, 15);
        grid.set(5, 11, TileType::Block);
        assert!(!is_enemy_site(&grid, 5, 13));
        grid.set(5, 11, TileType::Air);
        grid.set(5, 12, TileType::Coin);
        assert!(!is_enemy_site(&grid, 5, 13));
    }

    #[test]
    fn test_enemy_site_requires_support() {
        let mut grid = Grid::with_floor(20, 15);
        grid.set(7, 14, TileType::Air);
        assert!(!is_enemy_site(&grid, 7, 13));
        assert!(!place_enemy(&mut grid, 7, 13));
        assert_eq!(grid.count(TileType::Enemy), 0);
    }

    #[test]
    fn test_natural_enemies_respect_spacing() {
        let mut grid = Grid::with_floor(120, 15);
        let config = GenerationConfig::new();
        let mut rng = utils::create_rng(3);
        let placed = add_natural_enemies(&mut grid, &context(3), &config, &mut rng);

        let mut xs: Vec<i32> = grid.positions_of(TileType::Enemy).iter().map(|p| p.x).collect();
        assert_eq!(xs.len(), placed);
        assert!(placed > 0 && placed <= 10);
        xs.sort_unstable();
        for pair in xs.windows(2) {
            assert!(pair[1] - pair[0] >= config.forced_enemy_spacing);
        }
        assert!(xs.iter().all(|&x| (ENEMY_FREE_START..120 - ENEMY_FREE_END).contains(&x)));
    }

    #[test]
    fn test_forced_phase_fills_flat_level() {
        // Natural spacing wider than the level admits a single natural enemy,
        // so the forced scan has to supply the rest.
        let mut grid = Grid::with_floor(120, 15);
        let config = GenerationConfig {
            natural_enemy_base: 16,
            natural_enemy_cap: 16,
            natural_enemy_spacing: 200,
            ..GenerationConfig::new()
        };
        let mut rng = utils::create_rng(9);
        let placed = add_natural_enemies(&mut grid, &context(9), &config, &mut rng);
        assert_eq!(placed, 16);
    }

    #[test]
    fn test_degrades_without_sites() {
        let mut grid = Grid::new(120, 15);
        let mut rng = utils::create_rng(4);
        let placed =
            add_natural_enemies(&mut grid, &context(4), &GenerationConfig::new(), &mut rng);
        assert_eq!(placed, 0);
    }
}
