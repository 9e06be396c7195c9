//! # Grid Serialization
//!
//! The string form handed to the game runtime: a JSON array of rows, each row
//! an array of tile codes.
//!
//! ```text
//! [[0,0,0],[1,1,1]]
//! ```

use crate::grid::{Grid, TileType};
use crate::{StageError, StageResult};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_codes().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let codes = Vec::<Vec<u8>>::deserialize(deserializer)?;
        grid_from_codes(codes).map_err(D::Error::custom)
    }
}

fn grid_from_codes(codes: Vec<Vec<u8>>) -> StageResult<Grid> {
    let mut rows = Vec::with_capacity(codes.len());
    for (y, row) in codes.into_iter().enumerate() {
        let tiles = row
            .into_iter()
            .enumerate()
            .map(|(x, code)| {
                TileType::from_code(code).ok_or_else(|| {
                    StageError::InvalidGrid(format!("unknown tile code {code} at ({x}, {y})"))
                })
            })
            .collect::<StageResult<Vec<_>>>()?;
        rows.push(tiles);
    }
    Grid::from_rows(rows).ok_or_else(|| StageError::InvalidGrid("rows differ in width".into()))
}

/// Encodes a grid as the runtime's JSON array of rows.
///
/// # Examples
///
/// ```
/// use stagecraft::{serialize_grid, Grid};
///
/// let grid = Grid::with_floor(3, 2);
/// assert_eq!(serialize_grid(&grid).unwrap(), "[[0,0,0],[1,1,1]]");
/// ```
pub fn serialize_grid(grid: &Grid) -> StageResult<String> {
    Ok(serde_json::to_string(grid)?)
}

/// Decodes a grid produced by [`serialize_grid`].
///
/// Ragged rows and unknown tile codes are rejected.
pub fn deserialize_grid(json: &str) -> StageResult<Grid> {
    let codes: Vec<Vec<u8>> = serde_json::from_str(json)?;
    grid_from_codes(codes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_on_the_wire() {
        let mut grid = Grid::with_floor(4, 3);
        grid.set(0, 1, TileType::Enemy);
        grid.set(1, 1, TileType::PipeTopLeft);
        grid.set(2, 1, TileType::PipeTopRight);
        grid.set(3, 0, TileType::Coin);
        assert_eq!(
            serialize_grid(&grid).unwrap(),
            "[[0,0,0,2],[20,9,10,0],[1,1,1,1]]"
        );
    }

    #[test]
    fn test_parse_back() {
        let grid = deserialize_grid("[[0,3,0],[5,6,4],[1,1,1]]").unwrap();
        assert_eq!(grid.width, 3);
        assert_eq!(grid.height, 3);
        assert_eq!(grid.get(1, 0), TileType::QuestionBlock);
        assert_eq!(grid.get(0, 1), TileType::Flagpole);
        assert_eq!(grid.get(1, 1), TileType::Flag);
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = deserialize_grid("[[0,0],[1]]").unwrap_err();
        assert!(matches!(err, StageError::InvalidGrid(_)));
    }

    #[test]
    fn test_rejects_unknown_code() {
        let err = deserialize_grid("[[0,11]]").unwrap_err();
        assert!(matches!(err, StageError::InvalidGrid(_)));
        assert!(err.to_string().contains("(1, 0)"));
    }

    #[test]
    fn test_rejects_non_json() {
        assert!(matches!(
            deserialize_grid("not a grid"),
            Err(StageError::Serde(_))
        ));
    }
}
