//! # Themes
//!
//! Named structural styles and the rotation that assigns them to levels.
//!
//! Ten theme names rotate for display, but only plains, underground and
//! mountain have generators. Those three rotate once per world of seven
//! levels, so a whole world shares one theme.

pub mod builders;
pub mod level_one;
pub mod mountain;
pub mod plains;
pub mod underground;

pub use builders::*;
pub use level_one::*;
pub use mountain::*;
pub use plains::*;
pub use underground::*;

use crate::generation::{world_index, ThemeGenerator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural style of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Plains,
    Underground,
    Mountain,
    Castle,
    Bridge,
    Maze,
    Parkour,
    Fortress,
    Sky,
    Cavern,
}

static PLAINS: PlainsGenerator = PlainsGenerator;
static UNDERGROUND: UndergroundGenerator = UndergroundGenerator;
static MOUNTAIN: MountainGenerator = MountainGenerator;

impl Theme {
    /// Every theme name, in display rotation order.
    pub const ALL: [Theme; 10] = [
        Theme::Plains,
        Theme::Underground,
        Theme::Mountain,
        Theme::Castle,
        Theme::Bridge,
        Theme::Maze,
        Theme::Parkour,
        Theme::Fortress,
        Theme::Sky,
        Theme::Cavern,
    ];

    /// Themes that have a generator.
    pub const ACTIVE: [Theme; 3] = [Theme::Plains, Theme::Underground, Theme::Mountain];

    /// Lowercase name of the theme.
    pub fn name(self) -> &'static str {
        match self {
            Theme::Plains => "plains",
            Theme::Underground => "underground",
            Theme::Mountain => "mountain",
            Theme::Castle => "castle",
            Theme::Bridge => "bridge",
            Theme::Maze => "maze",
            Theme::Parkour => "parkour",
            Theme::Fortress => "fortress",
            Theme::Sky => "sky",
            Theme::Cavern => "cavern",
        }
    }

    /// Theme shown for a level. Level 1 has its own layout and no theme.
    ///
    /// # Examples
    ///
    /// ```
    /// use stagecraft::Theme;
    ///
    /// assert_eq!(Theme::display_for_level(1), None);
    /// assert_eq!(Theme::display_for_level(2), Some(Theme::Plains));
    /// assert_eq!(Theme::display_for_level(5), Some(Theme::Castle));
    /// assert_eq!(Theme::display_for_level(12), Some(Theme::Plains));
    /// ```
    pub fn display_for_level(level_number: u32) -> Option<Theme> {
        if level_number <= 1 {
            return None;
        }
        let index = (level_number - 2) as usize % Self::ALL.len();
        Some(Self::ALL[index])
    }

    /// Theme whose generator builds a level. Level 1 has its own layout.
    ///
    /// # Examples
    ///
    /// ```
    /// use stagecraft::Theme;
    ///
    /// assert_eq!(Theme::active_for_level(2), Some(Theme::Plains));
    /// assert_eq!(Theme::active_for_level(8), Some(Theme::Underground));
    /// assert_eq!(Theme::active_for_level(15), Some(Theme::Mountain));
    /// assert_eq!(Theme::active_for_level(22), Some(Theme::Plains));
    /// ```
    pub fn active_for_level(level_number: u32) -> Option<Theme> {
        if level_number <= 1 {
            return None;
        }
        let index = world_index(level_number) as usize % Self::ACTIVE.len();
        Some(Self::ACTIVE[index])
    }

    /// Generator for this theme, if it has one.
    pub fn generator(self) -> Option<&'static dyn ThemeGenerator> {
        match self {
            Theme::Plains => Some(&PLAINS),
            Theme::Underground => Some(&UNDERGROUND),
            Theme::Mountain => Some(&MOUNTAIN),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
