//! # Tile Codes
//!
//! The integer tile codes shared with the game runtime.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Contents of a single grid cell.
///
/// The discriminants are the wire codes the runtime expects, so a tile always
/// serializes as its bare integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum TileType {
    /// Empty air
    #[default]
    Air = 0,
    /// Solid ground or platform block
    Ground = 1,
    /// Collectible coin
    Coin = 2,
    /// Question block yielding a coin or power-up
    QuestionBlock = 3,
    /// Decorative block, also used as generic platform filler
    Block = 4,
    /// Goal flagpole
    Flagpole = 5,
    /// Goal flag
    Flag = 6,
    /// Pipe body, left half
    PipeLeft = 7,
    /// Pipe body, right half
    PipeRight = 8,
    /// Pipe cap, left half
    PipeTopLeft = 9,
    /// Pipe cap, right half
    PipeTopRight = 10,
    /// Enemy spawn marker
    Enemy = 20,
}

impl TileType {
    /// Returns the wire code of this tile.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decodes a wire code.
    ///
    /// # Examples
    ///
    /// ```
    /// use stagecraft::TileType;
    ///
    /// assert_eq!(TileType::from_code(9), Some(TileType::PipeTopLeft));
    /// assert_eq!(TileType::from_code(11), None);
    /// ```
    pub fn from_code(code: u8) -> Option<Self> {
        let tile = match code {
            0 => Self::Air,
            1 => Self::Ground,
            2 => Self::Coin,
            3 => Self::QuestionBlock,
            4 => Self::Block,
            5 => Self::Flagpole,
            6 => Self::Flag,
            7 => Self::PipeLeft,
            8 => Self::PipeRight,
            9 => Self::PipeTopLeft,
            10 => Self::PipeTopRight,
            20 => Self::Enemy,
            _ => return None,
        };
        Some(tile)
    }

    /// Whether the player collides with this tile.
    pub fn is_solid(self) -> bool {
        matches!(
            self,
            Self::Ground
                | Self::QuestionBlock
                | Self::Block
                | Self::PipeLeft
                | Self::PipeRight
                | Self::PipeTopLeft
                | Self::PipeTopRight
        )
    }

    /// Whether this tile is any part of a pipe.
    pub fn is_pipe(self) -> bool {
        matches!(
            self,
            Self::PipeLeft | Self::PipeRight | Self::PipeTopLeft | Self::PipeTopRight
        )
    }

    /// Coins and question blocks, the tiles covered by the anti-stacking rule.
    pub fn is_collectible(self) -> bool {
        matches!(self, Self::Coin | Self::QuestionBlock)
    }

    /// Whether this tile is part of the goal.
    pub fn is_goal(self) -> bool {
        matches!(self, Self::Flagpole | Self::Flag)
    }

    /// Character used by the ASCII preview.
    pub fn glyph(self) -> char {
        match self {
            Self::Air => ' ',
            Self::Ground => '#',
            Self::Coin => 'o',
            Self::QuestionBlock => '?',
            Self::Block => '=',
            Self::Flagpole => '|',
            Self::Flag => 'F',
            Self::PipeLeft => '[',
            Self::PipeRight => ']',
            Self::PipeTopLeft => '<',
            Self::PipeTopRight => '>',
            Self::Enemy => 'e',
        }
    }
}

impl Serialize for TileType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for TileType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown tile code {code}")))
    }
}
