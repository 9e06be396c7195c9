//! # Stepping Stones
//!
//! A best-effort patch for platforms that sit too high to reach from the
//! ground. It is not a reachability proof; see
//! [`crate::generation::reachability`] for the actual check.

use crate::config::RUNNING_JUMP_HEIGHT;
use crate::generation::safety::playable_width;
use crate::grid::{Grid, TileType};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Elevation above which a platform gets a second, mid-height stone.
pub const HIGH_PLATFORM_ELEVATION: i32 = 6;

/// Elevation of the low stones.
pub const LOW_STONE_ELEVATION: i32 = 2;

/// Stones added by the pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteppingReport {
    /// Low stones beside high platforms
    pub low_stones: usize,
    /// Mid-height stones beside very high platforms
    pub mid_stones: usize,
}

/// A horizontal run of platform tops on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformRun {
    pub start: i32,
    pub end: i32,
    pub y: i32,
}

/// Finds every run of solid cells with open space above, higher than
/// `min_elevation` above the floor.
pub fn platform_runs(grid: &Grid, min_elevation: i32) -> Vec<PlatformRun> {
    let playable = playable_width(grid);
    let mut runs = Vec::new();
    for y in 1..grid.floor_row() {
        if grid.elevation(y) <= min_elevation {
            continue;
        }
        let mut x = 0;
        while x < playable {
            if !is_platform_top(grid, x, y) {
                x += 1;
                continue;
            }
            let start = x;
            while x < playable && is_platform_top(grid, x, y) {
                x += 1;
            }
            runs.push(PlatformRun {
                start,
                end: x - 1,
                y,
            });
        }
    }
    runs
}

fn is_platform_top(grid: &Grid, x: i32, y: i32) -> bool {
    grid.is_solid(x, y) && !grid.is_solid(x, y - 1)
}

/// Whether a two-wide stone fits at `(x, y)`: both cells and the cells below
/// empty, two non-solid cells above to stand in.
fn stone_fits(grid: &Grid, x: i32, y: i32, needs_floor: bool) -> bool {
    let playable = playable_width(grid);
    (x..=x + 1).all(|cx| {
        cx >= 1
            && cx < playable
            && grid.is_empty(cx, y)
            && grid.is_empty(cx, y + 1)
            && !grid.is_solid(cx, y - 1)
            && !grid.is_solid(cx, y - 2)
            && (!needs_floor || grid.has_floor(cx))
    })
}

fn place_stone(grid: &mut Grid, x: i32, y: i32) {
    trace!("stepping stone at ({x}, {y})");
    grid.set(x, y, TileType::Block);
    grid.set(x + 1, y, TileType::Block);
}

/// Tries the left candidate, then the right one.
fn place_beside(grid: &mut Grid, candidates: [i32; 2], y: i32, needs_floor: bool) -> bool {
    for x in candidates {
        if stone_fits(grid, x, y, needs_floor) {
            place_stone(grid, x, y);
            return true;
        }
    }
    false
}

/// Adds stepping stones next to platforms the player cannot jump onto.
///
/// First pass: every platform run more than a running jump above the floor
/// gets one floor-supported stone two rows up, four columns to its left or
/// right. Second pass: runs more than six rows up get one more stone at half
/// their elevation, three columns out.
pub fn add_stepping_stones(grid: &mut Grid) -> SteppingReport {
    let mut report = SteppingReport::default();
    let floor = grid.floor_row();

    for run in platform_runs(grid, RUNNING_JUMP_HEIGHT as i32) {
        let y = floor - LOW_STONE_ELEVATION;
        if place_beside(grid, [run.start - 5, run.end + 4], y, true) {
            report.low_stones += 1;
        }
    }

    for run in platform_runs(grid, HIGH_PLATFORM_ELEVATION) {
        let y = floor - grid.elevation(run.y) / 2;
        if place_beside(grid, [run.start - 4, run.end + 3], y, false) {
            report.mid_stones += 1;
        }
    }

    debug!(
        "stepping stones: {} low, {} mid",
        report.low_stones, report.mid_stones
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_runs() {
        let mut grid = Grid::with_floor(40, 15);
        for x in 10..14 {
            grid.set(x, 8, TileType::Block);
        }
        grid.set(20, 11, TileType::Block);
        let runs = platform_runs(&grid, 4);
        assert_eq!(runs, vec![PlatformRun { start: 10, end: 13, y: 8 }]);
        assert_eq!(platform_runs(&grid, 2).len(), 2);
    }

    #[test]
    fn test_low_stone_beside_high_platform() {
        let mut grid = Grid::with_floor(40, 15);
        for x in 15..18 {
            grid.set(x, 9, TileType::Block);
        }
        let report = add_stepping_stones(&mut grid);
        assert_eq!(report.low_stones, 1);
        assert_eq!(report.mid_stones, 0);
        assert_eq!(grid.get(10, 12), TileType::Block);
        assert_eq!(grid.get(11, 12), TileType::Block);
    }

    #[test]
    fn test_stone_falls_back_to_right_side() {
        let mut grid = Grid::with_floor(40, 15);
        for x in 6..9 {
            grid.set(x, 9, TileType::Block);
        }
        // Left candidate would start at column 1 over a missing floor
        grid.set(1, 14, TileType::Air);
        add_stepping_stones(&mut grid);
        assert_eq!(grid.get(12, 12), TileType::Block);
        assert_eq!(grid.get(13, 12), TileType::Block);
    }

    #[test]
    fn test_very_high_platform_gets_mid_stone() {
        let mut grid = Grid::with_floor(40, 15);
        for x in 20..23 {
            grid.set(x, 5, TileType::Block);
        }
        let report = add_stepping_stones(&mut grid);
        assert_eq!(report.low_stones, 1);
        assert_eq!(report.mid_stones, 1);
        // Elevation 9, so the mid stone sits four rows up
        assert_eq!(grid.get(16, 10), TileType::Block);
        assert_eq!(grid.get(17, 10), TileType::Block);
    }

    #[test]
    fn test_low_platforms_left_alone() {
        let mut grid = Grid::with_floor(40, 15);
        for x in 20..23 {
            grid.set(x, 10, TileType::Block);
        }
        assert_eq!(add_stepping_stones(&mut grid), SteppingReport::default());
    }
}
