//! ASCII preview of a grid, one character per tile.

use crate::grid::Grid;
use crate::GenerationReport;
use std::fmt::Write;

/// Renders grids as plain text.
#[derive(Debug, Clone, Default)]
pub struct AsciiRenderer {
    /// Print a column ruler under the grid, a digit every ten columns
    pub show_ruler: bool,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ruler(mut self) -> Self {
        self.show_ruler = true;
        self
    }

    /// Renders the grid, one line per row, using [`TileType::glyph`].
    ///
    /// [`TileType::glyph`]: crate::TileType::glyph
    ///
    /// # Examples
    ///
    /// ```
    /// use stagecraft::{AsciiRenderer, Grid, TileType};
    ///
    /// let mut grid = Grid::with_floor(4, 2);
    /// grid.set(1, 0, TileType::Enemy);
    /// assert_eq!(AsciiRenderer::new().render(&grid), " e  \n####\n");
    /// ```
    pub fn render(&self, grid: &Grid) -> String {
        let mut out = String::with_capacity((grid.width + 1) * (grid.height + 1));
        for row in grid.rows() {
            out.extend(row.iter().map(|tile| tile.glyph()));
            out.push('\n');
        }
        if self.show_ruler {
            out.extend((0..grid.width).map(|x| {
                if x % 10 == 0 {
                    char::from_digit(((x / 10) % 10) as u32, 10).unwrap_or('?')
                } else {
                    '.'
                }
            }));
            out.push('\n');
        }
        out
    }

    /// One-paragraph summary of a generation report.
    pub fn render_report(&self, report: &GenerationReport) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(
            out,
            "Level {} | {} (built as {}) | difficulty {} ({})",
            report.level_number,
            report.display_theme,
            report.active_theme,
            report.difficulty,
            report.difficulty_label
        );
        let _ = writeln!(
            out,
            "structure: {} pipes, {} platforms, {} gaps, {} enemies, {} question blocks",
            report.structure.pipes,
            report.structure.platforms,
            report.structure.gaps.len(),
            report.structure.enemies,
            report.structure.question_blocks
        );
        let _ = writeln!(
            out,
            "placement: {} natural enemies, {} question blocks, {} coins ({} fallback)",
            report.natural_enemies,
            report.question_blocks,
            report.coins.placed,
            report.coins.fallback
        );
        let _ = writeln!(
            out,
            "safety: {} fixes | stepping stones: {} low, {} mid",
            report.safety.total_changes(),
            report.stepping.low_stones,
            report.stepping.mid_stones
        );
        let reachable = match report.reachable {
            Some(true) => "yes",
            Some(false) => "NO",
            None => "not checked",
        };
        let _ = writeln!(out, "reachable: {reachable}");
        out
    }
}
