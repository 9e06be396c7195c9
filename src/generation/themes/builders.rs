//! # Structure Builders
//!
//! Stamping helpers shared by the theme generators. The `stamp_*` functions
//! write unconditionally (through the bounds-checked setter); the `try_*`
//! functions first check that the footprint is free and leave the grid
//! untouched when it is not.

use crate::grid::{FloorGap, Grid, TileType};

/// Writes a pipe standing on row `surface_y`.
///
/// The caps sit `height` rows above the surface and the body fills the rows
/// between.
pub fn stamp_pipe(grid: &mut Grid, x: i32, surface_y: i32, height: i32) {
    if height <= 0 {
        return;
    }
    let top = surface_y - height;
    grid.set(x, top, TileType::PipeTopLeft);
    grid.set(x + 1, top, TileType::PipeTopRight);
    for y in (top + 1)..surface_y {
        grid.set(x, y, TileType::PipeLeft);
        grid.set(x + 1, y, TileType::PipeRight);
    }
}

/// Places a floor-standing pipe if the floor is intact under it and the
/// surrounding columns are clear.
///
/// The clear area spans two columns either side and two rows above the cap,
/// so pipes never touch and always leave jumping room.
pub fn try_place_pipe(grid: &mut Grid, x: i32, height: i32) -> bool {
    let ground = grid.ground_row();
    if height <= 0 || !grid.has_floor(x) || !grid.has_floor(x + 1) {
        return false;
    }
    let top = ground - height + 1;
    if top - 2 < 1 || !grid.area_is_empty(x - 2, top - 2, x + 3, ground) {
        return false;
    }
    stamp_pipe(grid, x, grid.floor_row(), height);
    true
}

/// Writes a one-block-thick horizontal platform.
pub fn stamp_platform(grid: &mut Grid, x: i32, y: i32, len: i32, tile: TileType) {
    for cx in x..x + len {
        grid.set(cx, y, tile);
    }
}

/// Places a floating platform if nothing sits beside it, above it or in the
/// columns beneath it.
pub fn try_place_platform(grid: &mut Grid, x: i32, y: i32, len: i32, tile: TileType) -> bool {
    if len <= 0 || y < 3 || y >= grid.ground_row() {
        return false;
    }
    if !grid.area_is_empty(x - 1, y - 2, x + len, grid.ground_row()) {
        return false;
    }
    stamp_platform(grid, x, y, len, tile);
    true
}

/// Carves a floor gap of `width` columns starting at `x`.
///
/// The floor must be intact for two columns on either side, so carved gaps
/// never merge, and nothing may stand on the edges or over the gap.
pub fn try_carve_gap(grid: &mut Grid, x: i32, width: usize) -> Option<FloorGap> {
    let w = width as i32;
    if width == 0 || x < 2 {
        return None;
    }
    if !((x - 2)..(x + w + 2)).all(|cx| grid.has_floor(cx)) {
        return None;
    }
    let ground = grid.ground_row();
    if !((x - 1)..=(x + w)).all(|cx| grid.is_empty(cx, ground)) {
        return None;
    }
    let floor = grid.floor_row();
    for cx in x..x + w {
        grid.set(cx, floor, TileType::Air);
    }
    Some(FloorGap { start: x, width })
}

/// Fills the whole top row, used as a cave ceiling.
pub fn stamp_ceiling(grid: &mut Grid) {
    for x in 0..grid.width as i32 {
        grid.set(x, 0, TileType::Ground);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipe_layout() {
        let mut grid = Grid::with_floor(20, 15);
        assert!(try_place_pipe(&mut grid, 5, 3));
        assert_eq!(grid.get(5, 11), TileType::PipeTopLeft);
        assert_eq!(grid.get(6, 11), TileType::PipeTopRight);
        assert_eq!(grid.get(5, 12), TileType::PipeLeft);
        assert_eq!(grid.get(6, 13), TileType::PipeRight);
        assert_eq!(grid.get(5, 10), TileType::Air);
        assert_eq!(grid.stack_height(5), 3);
    }

    #[test]
    fn test_pipes_keep_their_distance() {
        let mut grid = Grid::with_floor(20, 15);
        assert!(try_place_pipe(&mut grid, 5, 1));
        assert!(!try_place_pipe(&mut grid, 8, 1));
        assert!(try_place_pipe(&mut grid, 9, 1));
    }

    #[test]
    fn test_gap_requires_intact_margins() {
        let mut grid = Grid::with_floor(30, 15);
        let gap = try_carve_gap(&mut grid, 10, 3).unwrap();
        assert_eq!(gap, FloorGap { start: 10, width: 3 });
        assert!(!grid.has_floor(11));

        // Would merge with the first gap
        assert!(try_carve_gap(&mut grid, 14, 2).is_none());
        assert!(try_carve_gap(&mut grid, 15, 2).is_some());
        assert_eq!(grid.floor_gaps().len(), 2);
    }

    #[test]
    fn test_platform_needs_clear_columns() {
        let mut grid = Grid::with_floor(30, 15);
        grid.set(6, 13, TileType::Enemy);
        assert!(!try_place_platform(&mut grid, 5, 10, 3, TileType::Block));
        assert!(try_place_platform(&mut grid, 12, 10, 3, TileType::Block));
        assert_eq!(grid.get(14, 10), TileType::Block);
    }
}
