//! # Safety Validation
//!
//! The mandatory corrective pass. It only ever removes structure (or, for
//! over-wide gaps, restores floor) and finishes in a single left-to-right
//! sweep.
//!
//! Per column, in order:
//! 1. blocks stacked more than a running jump above the floor are removed
//! 2. overhangs with fewer than [`MIN_HEADROOM`] open cells beneath are removed
//! 3. pipes taller than a regular jump are cut down and re-capped
//!
//! [`ensure_passable_path`] then narrows over-wide floor gaps and clears any
//! ground column the player could neither walk through nor jump over.

use crate::config::{
    GOAL_ZONE, MARIO_HEIGHT, MAX_GAP_WIDTH, MAX_OBSTACLE_JUMP, MIN_HEADROOM, REGULAR_JUMP_HEIGHT,
    RUNNING_JUMP_HEIGHT,
};
use crate::grid::{Grid, TileType};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// What the safety pass removed or repaired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyReport {
    /// Blocks removed for exceeding the stack-height limit
    pub stack_blocks_removed: usize,
    /// Overhanging blocks removed for lacking headroom
    pub overhangs_removed: usize,
    /// Pipe tiles removed for exceeding the pipe-height limit
    pub pipe_tiles_removed: usize,
    /// Floor tiles restored inside over-wide gaps
    pub gap_tiles_filled: usize,
    /// Ground columns cleared to force a passage
    pub columns_cleared: usize,
}

impl SafetyReport {
    /// Total number of tiles and columns touched.
    pub fn total_changes(&self) -> usize {
        self.stack_blocks_removed
            + self.overhangs_removed
            + self.pipe_tiles_removed
            + self.gap_tiles_filled
            + self.columns_cleared
    }
}

/// Columns the corrective passes may touch; the goal zone is left alone.
pub fn playable_width(grid: &Grid) -> i32 {
    grid.width.saturating_sub(GOAL_ZONE) as i32
}

/// Open (non-solid) cells directly beneath `(x, y)`, down to the bottom edge.
pub fn clearance_below(grid: &Grid, x: i32, y: i32) -> usize {
    ((y + 1)..grid.height as i32)
        .take_while(|&cy| !grid.is_solid(x, cy))
        .count()
}

/// Runs the full safety pass over every playable column.
pub fn apply_safety_check(grid: &mut Grid) -> SafetyReport {
    let mut report = SafetyReport::default();

    for x in 0..playable_width(grid) {
        report.stack_blocks_removed += clamp_stack_height(grid, x);
        report.overhangs_removed += clamp_headroom(grid, x);
        report.pipe_tiles_removed += clamp_pipe_height(grid, x);
    }

    let path = ensure_passable_path(grid);
    report.gap_tiles_filled = path.gap_tiles_filled;
    report.columns_cleared = path.columns_cleared;

    debug!(
        "safety pass: {} stacked, {} overhangs, {} pipe tiles removed; {} gap tiles filled, {} columns cleared",
        report.stack_blocks_removed,
        report.overhangs_removed,
        report.pipe_tiles_removed,
        report.gap_tiles_filled,
        report.columns_cleared
    );
    report
}

/// Removes solid blocks more than [`RUNNING_JUMP_HEIGHT`] above the floor in
/// the stack standing on it.
pub fn clamp_stack_height(grid: &mut Grid, x: i32) -> usize {
    let mut run = 0;
    let mut removed = 0;
    for y in (0..=grid.ground_row()).rev() {
        if !grid.is_solid(x, y) {
            break;
        }
        run += 1;
        if run > RUNNING_JUMP_HEIGHT {
            grid.set(x, y, TileType::Air);
            removed += 1;
        }
    }
    if removed > 0 {
        trace!("column {x}: removed {removed} stacked blocks");
    }
    removed
}

/// Removes overhanging blocks the player could not walk beneath.
///
/// Scans from just below the ceiling row downward. Row 0 is left untouched.
pub fn clamp_headroom(grid: &mut Grid, x: i32) -> usize {
    let mut removed = 0;
    for y in 1..grid.ground_row() {
        if !grid.is_solid(x, y) || grid.is_solid(x, y + 1) {
            continue;
        }
        if clearance_below(grid, x, y) < MIN_HEADROOM {
            trace!("column {x}: removed overhang at row {y}");
            grid.set(x, y, TileType::Air);
            removed += 1;
        }
    }
    removed
}

/// Cuts pipe segments down to [`REGULAR_JUMP_HEIGHT`] tiles above their base,
/// turning the new top into a cap.
pub fn clamp_pipe_height(grid: &mut Grid, x: i32) -> usize {
    let mut removed = 0;
    let mut cut_at = None;
    for y in 0..grid.height as i32 {
        if !grid.get(x, y).is_pipe() {
            continue;
        }
        let segment = (y..grid.height as i32)
            .take_while(|&cy| grid.get(x, cy).is_pipe())
            .count();
        if segment > REGULAR_JUMP_HEIGHT {
            grid.set(x, y, TileType::Air);
            removed += 1;
            cut_at = Some(y);
        }
    }

    if let Some(y) = cut_at {
        let recapped = match grid.get(x, y + 1) {
            TileType::PipeLeft => Some(TileType::PipeTopLeft),
            TileType::PipeRight => Some(TileType::PipeTopRight),
            _ => None,
        };
        if let Some(cap) = recapped {
            grid.set(x, y + 1, cap);
        }
        trace!("column {x}: cut {removed} pipe tiles");
    }
    removed
}

/// Result of the ground-path scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathReport {
    /// Floor tiles restored inside over-wide gaps
    pub gap_tiles_filled: usize,
    /// Ground columns cleared
    pub columns_cleared: usize,
}

/// Whether the player can walk through ground column `x`.
pub fn is_walkable(grid: &Grid, x: i32) -> bool {
    let ground = grid.ground_row();
    (0..MARIO_HEIGHT as i32).all(|dy| !grid.is_solid(x, ground - dy))
}

/// Whether the obstacle standing in ground column `x` can be jumped over.
pub fn is_jumpable(grid: &Grid, x: i32) -> bool {
    let obstacle = grid.stack_height(x) as i32;
    if obstacle > MAX_OBSTACLE_JUMP as i32 {
        return false;
    }
    let above = grid.ground_row() - obstacle;
    (0..MARIO_HEIGHT as i32).all(|dy| !grid.is_solid(x, above - dy))
}

/// Makes the ground route from the left edge to the goal passable.
///
/// Floor gaps wider than [`MAX_GAP_WIDTH`] get their floor back past that
/// width. Every other column must then be walkable or jumpable; if it is
/// neither, rows `height-6..=height-2` of that column are cleared.
pub fn ensure_passable_path(grid: &mut Grid) -> PathReport {
    let mut report = PathReport::default();
    let playable = playable_width(grid);
    let floor = grid.floor_row();

    for gap in grid.floor_gaps() {
        if gap.start >= playable || gap.width <= MAX_GAP_WIDTH {
            continue;
        }
        let keep_until = gap.start + MAX_GAP_WIDTH as i32;
        for x in keep_until..(gap.start + gap.width as i32).min(playable) {
            grid.set(x, floor, TileType::Ground);
            report.gap_tiles_filled += 1;
        }
    }

    let ground = grid.ground_row();
    for x in 0..playable {
        if !grid.has_floor(x) || is_walkable(grid, x) || is_jumpable(grid, x) {
            continue;
        }
        trace!("column {x}: impassable, clearing");
        for y in (ground - 4)..=ground {
            grid.set(x, y, TileType::Air);
        }
        report.columns_cleared += 1;
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat() -> Grid {
        Grid::with_floor(30, 15)
    }

    #[test]
    fn test_stack_clamp() {
        let mut grid = flat();
        for y in 7..=13 {
            grid.set(5, y, TileType::Ground);
        }
        assert_eq!(clamp_stack_height(&mut grid, 5), 3);
        assert_eq!(grid.stack_height(5), 4);
        assert_eq!(grid.get(5, 9), TileType::Air);
    }

    #[test]
    fn test_stack_clamp_ignores_coins() {
        let mut grid = flat();
        for y in 10..=13 {
            grid.set(5, y, TileType::Ground);
        }
        grid.set(5, 9, TileType::Coin);
        grid.set(5, 8, TileType::Block);
        assert_eq!(clamp_stack_height(&mut grid, 5), 0);
        assert_eq!(grid.get(5, 8), TileType::Block);
    }

    #[test]
    fn test_headroom_clamp() {
        let mut grid = flat();
        grid.set(3, 11, TileType::Block);
        grid.set(4, 10, TileType::Block);
        assert_eq!(clamp_headroom(&mut grid, 3), 1);
        assert_eq!(clamp_headroom(&mut grid, 4), 0);
        assert_eq!(grid.get(3, 11), TileType::Air);
        assert_eq!(grid.get(4, 10), TileType::Block);
    }

    #[test]
    fn test_headroom_over_gap_counts_gap() {
        let mut grid = flat();
        grid.set(6, 14, TileType::Air);
        grid.set(6, 12, TileType::Block);
        assert_eq!(clearance_below(&grid, 6, 12), 2);
        assert_eq!(clamp_headroom(&mut grid, 6), 1);
    }

    #[test]
    fn test_headroom_keeps_ceiling() {
        let mut grid = flat();
        grid.set(2, 0, TileType::Ground);
        grid.set(2, 2, TileType::Ground);
        assert_eq!(clamp_headroom(&mut grid, 2), 0);
        assert_eq!(grid.get(2, 0), TileType::Ground);
    }

    #[test]
    fn test_pipe_clamp_recaps() {
        let mut grid = flat();
        crate::generation::themes::stamp_pipe(&mut grid, 8, 14, 5);
        assert_eq!(clamp_pipe_height(&mut grid, 8), 2);
        assert_eq!(clamp_pipe_height(&mut grid, 9), 2);
        assert_eq!(grid.get(8, 11), TileType::PipeTopLeft);
        assert_eq!(grid.get(9, 11), TileType::PipeTopRight);
        assert_eq!(grid.get(8, 10), TileType::Air);
        assert_eq!(grid.pipe_tops().len(), 1);
    }

    #[test]
    fn test_pipe_on_platform_measured_from_base() {
        let mut grid = flat();
        grid.set(10, 9, TileType::Ground);
        grid.set(11, 9, TileType::Ground);
        crate::generation::themes::stamp_pipe(&mut grid, 10, 9, 2);
        assert_eq!(clamp_pipe_height(&mut grid, 10), 0);
        assert_eq!(grid.get(10, 7), TileType::PipeTopLeft);
    }

    #[test]
    fn test_wide_gap_is_narrowed() {
        let mut grid = flat();
        for x in 5..12 {
            grid.set(x, 14, TileType::Air);
        }
        let report = ensure_passable_path(&mut grid);
        assert_eq!(report.gap_tiles_filled, 3);
        assert_eq!(grid.floor_gaps()[0].width, 4);
    }

    #[test]
    fn test_blocked_column_is_cleared() {
        let mut grid = flat();
        // Four-high wall capped right above by a low ceiling: not jumpable.
        for y in 10..=13 {
            grid.set(7, y, TileType::Ground);
        }
        grid.set(7, 8, TileType::Block);
        assert!(!is_walkable(&grid, 7));
        assert!(!is_jumpable(&grid, 7));

        let report = ensure_passable_path(&mut grid);
        assert_eq!(report.columns_cleared, 1);
        assert!((9..=13).all(|y| grid.get(7, y) == TileType::Air));
        assert_eq!(grid.get(7, 8), TileType::Block);
    }

    #[test]
    fn test_goal_zone_untouched() {
        let mut grid = flat();
        for y in 3..=13 {
            grid.set(28, y, TileType::Ground);
        }
        let report = apply_safety_check(&mut grid);
        assert_eq!(report.total_changes(), 0);
        assert_eq!(grid.stack_height(28), 11);
    }

    #[test]
    fn test_safety_pass_yields_valid_headroom() {
        let mut grid = flat();
        grid.set(4, 12, TileType::Block);
        grid.set(5, 11, TileType::Block);
        grid.set(6, 10, TileType::Block);
        for y in 6..=13 {
            grid.set(12, y, TileType::Ground);
        }
        apply_safety_check(&mut grid);
        assert!(crate::generation::utils::validate_headroom(&grid).is_ok());
        assert_eq!(grid.stack_height(12), 4);
    }
}
