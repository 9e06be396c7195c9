//! # Reachability
//!
//! Breadth-first search over the cells the player can stand in, from the left
//! edge to the goal zone.
//!
//! The movement model is coarse: from any standing cell the player may land on
//! any other standing cell up to five columns away and at most a running jump
//! higher, or anywhere lower, provided every column crossed has a two-cell
//! opening within jump height. Jump arcs are not traced exactly, so the check
//! is an approximation of completability rather than a proof.

use crate::config::{GOAL_ZONE, MAX_GAP_WIDTH, RUNNING_JUMP_HEIGHT};
use crate::grid::{Grid, Position};
use log::debug;
use pathfinding::prelude::bfs;
use serde::{Deserialize, Serialize};

/// Farthest horizontal distance covered by one jump.
pub const JUMP_REACH: i32 = MAX_GAP_WIDTH as i32 + 1;

/// Outcome of the reachability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reachability {
    /// Whether the goal zone can be reached
    pub reachable: bool,
    /// Standing cell the search started from
    pub start: Option<Position>,
    /// Landings on the shortest route, including start and end
    pub route: Vec<Position>,
}

/// Whether the player fits in `(x, y)` with solid ground under their feet.
pub fn is_standable(grid: &Grid, x: i32, y: i32) -> bool {
    grid.in_bounds(x, y)
        && y >= 1
        && !grid.is_solid(x, y)
        && !grid.is_solid(x, y - 1)
        && grid.is_solid(x, y + 1)
}

/// Whether a jump taking off from row `from_y` can pass through column `x`.
fn passes_over(grid: &Grid, x: i32, from_y: i32) -> bool {
    ((from_y - RUNNING_JUMP_HEIGHT as i32)..=from_y)
        .any(|y| !grid.is_solid(x, y) && !grid.is_solid(x, y - 1))
}

fn landings(grid: &Grid, from: Position) -> Vec<Position> {
    let mut next = Vec::new();
    let highest = (from.y - RUNNING_JUMP_HEIGHT as i32).max(1);
    for dx in -JUMP_REACH..=JUMP_REACH {
        let x = from.x + dx;
        let (lo, hi) = if dx < 0 { (x + 1, from.x) } else { (from.x + 1, x) };
        if !(lo..hi).all(|cx| passes_over(grid, cx, from.y)) {
            continue;
        }
        for y in highest..=grid.ground_row() {
            if (dx != 0 || y != from.y) && is_standable(grid, x, y) {
                next.push(Position::new(x, y));
            }
        }
    }
    next
}

/// Lowest standing cell in the first few columns.
pub fn find_start(grid: &Grid) -> Option<Position> {
    (0..GOAL_ZONE as i32).find_map(|x| {
        (1..=grid.ground_row())
            .rev()
            .find(|&y| is_standable(grid, x, y))
            .map(|y| Position::new(x, y))
    })
}

/// Searches for a route from the left edge into the goal zone.
///
/// # Examples
///
/// ```
/// use stagecraft::{check_reachability, Grid, TileType};
///
/// let mut grid = Grid::with_floor(30, 15);
/// assert!(check_reachability(&grid).reachable);
///
/// for x in 10..20 {
///     grid.set(x, 14, TileType::Air);
/// }
/// assert!(!check_reachability(&grid).reachable);
/// ```
pub fn check_reachability(grid: &Grid) -> Reachability {
    let goal_x = grid.width.saturating_sub(GOAL_ZONE) as i32;
    let Some(start) = find_start(grid) else {
        debug!("reachability: no standing cell at the left edge");
        return Reachability {
            reachable: false,
            start: None,
            route: Vec::new(),
        };
    };

    let route = bfs(&start, |pos| landings(grid, *pos), |pos| pos.x >= goal_x);
    debug!(
        "reachability from ({}, {}): {}",
        start.x,
        start.y,
        match &route {
            Some(route) => format!("{} landings", route.len()),
            None => "unreachable".to_string(),
        }
    );

    Reachability {
        reachable: route.is_some(),
        start: Some(start),
        route: route.unwrap_or_default(),
    }
}
