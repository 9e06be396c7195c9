//! # Grid Module
//!
//! The tile grid every generation pass mutates in place.
//!
//! Rows are indexed top to bottom, so row `height - 1` is the floor and row
//! `height - 2` is the row the player walks along. Coordinates are signed so
//! that passes can compute offsets like `x - 4` freely; anything outside the
//! grid reads as air and ignores writes.

pub mod tile;

pub use tile::*;

use serde::{Deserialize, Serialize};

/// Represents a 2D coordinate in the level grid.
///
/// # Examples
///
/// ```
/// use stagecraft::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// assert_eq!(pos.offset(-4, 1), Position::new(6, 6));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this position shifted by the given deltas.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Calculates the Manhattan distance to another position.
    pub fn manhattan_distance(self, other: Position) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }
}

/// A run of missing floor tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorGap {
    /// First missing column
    pub start: i32,
    /// Number of missing columns
    pub width: usize,
}

/// Fixed-size 2D array of tiles, `tiles[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Width in tiles
    pub width: usize,
    /// Height in tiles
    pub height: usize,
    tiles: Vec<Vec<TileType>>,
}

impl Grid {
    /// Creates a grid filled with air.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![vec![TileType::Air; width]; height],
        }
    }

    /// Creates a grid whose bottom row is solid ground.
    ///
    /// # Examples
    ///
    /// ```
    /// use stagecraft::{Grid, TileType};
    ///
    /// let grid = Grid::with_floor(20, 15);
    /// assert_eq!(grid.get(0, 14), TileType::Ground);
    /// assert_eq!(grid.get(0, 13), TileType::Air);
    /// ```
    pub fn with_floor(width: usize, height: usize) -> Self {
        let mut grid = Self::new(width, height);
        let floor = grid.floor_row();
        for x in 0..width as i32 {
            grid.set(x, floor, TileType::Ground);
        }
        grid
    }

    /// Builds a grid from rows of tiles. All rows must share one width.
    pub fn from_rows(tiles: Vec<Vec<TileType>>) -> Option<Self> {
        let height = tiles.len();
        let width = tiles.first().map(Vec::len).unwrap_or(0);
        if tiles.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height,
            tiles,
        })
    }

    /// Borrows the rows of the grid.
    pub fn rows(&self) -> &[Vec<TileType>] {
        &self.tiles
    }

    /// Rows of raw tile codes, the shape the runtime consumes.
    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        self.tiles
            .iter()
            .map(|row| row.iter().map(|tile| tile.code()).collect())
            .collect()
    }

    /// Row index of the floor.
    pub fn floor_row(&self) -> i32 {
        self.height as i32 - 1
    }

    /// Row index the player walks along when standing on the floor.
    pub fn ground_row(&self) -> i32 {
        self.height as i32 - 2
    }

    /// Number of rows between `y` and the floor.
    pub fn elevation(&self, y: i32) -> i32 {
        self.floor_row() - y
    }

    /// Checks if a position is inside the grid.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Reads a tile. Out-of-bounds cells read as air.
    pub fn get(&self, x: i32, y: i32) -> TileType {
        if self.in_bounds(x, y) {
            self.tiles[y as usize][x as usize]
        } else {
            TileType::Air
        }
    }

    /// Writes a tile, silently ignoring out-of-bounds coordinates.
    ///
    /// Returns whether the write landed.
    pub fn set(&mut self, x: i32, y: i32, tile: TileType) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        self.tiles[y as usize][x as usize] = tile;
        true
    }

    /// Reads a tile at a position.
    pub fn at(&self, pos: Position) -> TileType {
        self.get(pos.x, pos.y)
    }

    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_solid()
    }

    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.get(x, y) == TileType::Air
    }

    /// Whether every cell of the rectangle `[x0, x1] x [y0, y1]` is in bounds and air.
    pub fn area_is_empty(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> bool {
        (y0..=y1).all(|y| (x0..=x1).all(|x| self.is_empty(x, y)))
    }

    /// Contiguous solid tiles standing on the floor at column `x`.
    pub fn stack_height(&self, x: i32) -> usize {
        (0..=self.ground_row())
            .rev()
            .take_while(|&y| self.is_solid(x, y))
            .count()
    }

    /// Whether the floor tile under column `x` is present.
    pub fn has_floor(&self, x: i32) -> bool {
        self.is_solid(x, self.floor_row())
    }

    /// All runs of missing floor, left to right.
    pub fn floor_gaps(&self) -> Vec<FloorGap> {
        let mut gaps = Vec::new();
        let mut x = 0;
        while x < self.width as i32 {
            if self.has_floor(x) {
                x += 1;
                continue;
            }
            let start = x;
            while x < self.width as i32 && !self.has_floor(x) {
                x += 1;
            }
            gaps.push(FloorGap {
                start,
                width: (x - start) as usize,
            });
        }
        gaps
    }

    /// Positions of pipe caps, one per pipe (the left cap with a right cap beside it).
    pub fn pipe_tops(&self) -> Vec<Position> {
        let mut tops = Vec::new();
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if self.get(x, y) == TileType::PipeTopLeft
                    && self.get(x + 1, y) == TileType::PipeTopRight
                {
                    tops.push(Position::new(x, y));
                }
            }
        }
        tops
    }

    /// Counts tiles of the given type.
    pub fn count(&self, tile: TileType) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&t| t == tile)
            .count()
    }

    /// Every position holding the given tile type, row by row.
    pub fn positions_of(&self, tile: TileType) -> Vec<Position> {
        let mut positions = Vec::new();
        for (y, row) in self.tiles.iter().enumerate() {
            for (x, &t) in row.iter().enumerate() {
                if t == tile {
                    positions.push(Position::new(x as i32, y as i32));
                }
            }
        }
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_writes_are_ignored() {
        let mut grid = Grid::new(10, 5);
        assert!(!grid.set(-1, 0, TileType::Ground));
        assert!(!grid.set(10, 0, TileType::Ground));
        assert!(!grid.set(0, 5, TileType::Ground));
        assert!(grid.set(9, 4, TileType::Ground));
        assert_eq!(grid.count(TileType::Ground), 1);
        assert_eq!(grid.get(-3, 2), TileType::Air);
    }

    #[test]
    fn test_stack_height() {
        let mut grid = Grid::with_floor(10, 15);
        for y in 10..=13 {
            grid.set(3, y, TileType::Ground);
        }
        grid.set(3, 8, TileType::Block);
        assert_eq!(grid.stack_height(3), 4);
        assert_eq!(grid.stack_height(4), 0);
    }

    #[test]
    fn test_floor_gaps() {
        let mut grid = Grid::with_floor(20, 15);
        for x in [3, 4, 10, 11, 12, 19] {
            grid.set(x, 14, TileType::Air);
        }
        let gaps = grid.floor_gaps();
        assert_eq!(
            gaps,
            vec![
                FloorGap { start: 3, width: 2 },
                FloorGap { start: 10, width: 3 },
                FloorGap { start: 19, width: 1 },
            ]
        );
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![vec![TileType::Air; 3], vec![TileType::Air; 2]];
        assert!(Grid::from_rows(rows).is_none());
    }

    #[test]
    fn test_pipe_tops() {
        let mut grid = Grid::with_floor(10, 15);
        grid.set(2, 13, TileType::PipeTopLeft);
        grid.set(3, 13, TileType::PipeTopRight);
        grid.set(6, 12, TileType::PipeTopLeft);
        assert_eq!(grid.pipe_tops(), vec![Position::new(2, 13)]);
    }
}
