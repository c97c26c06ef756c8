//! ASCII maze layouts

use std::collections::BTreeSet;

use crate::{Error, Result};

/// A (row, column) position on the grid
pub type Cell = (usize, usize);

/// A tile of the maze as read from the layout text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Wall,
    Open,
    Hazard,
}

impl Tile {
    fn from_char(c: char) -> Option<(Tile, Option<Marker>)> {
        match c {
            '%' => Some((Tile::Wall, None)),
            ' ' => Some((Tile::Open, None)),
            '.' => Some((Tile::Open, Some(Marker::Food))),
            'P' => Some((Tile::Open, Some(Marker::Start))),
            'G' => Some((Tile::Hazard, None)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Food,
    Start,
}

const TINY: &str = "\
%%%%%%%
%P  . %
% %%% %
%.   .%
%%%%%%%";

const SMALL: &str = "\
%%%%%%%%%
%P  .  .%
% %%%% G%
%.     .%
%%%%%%%%%";

const CORRIDOR: &str = "\
%%%%%%%%%%
%P      .%
%%%%%%%%%%";

/// Static description of a maze: walls, hazards, food and the start cell.
///
/// Glyphs: `%` wall, `.` food, `P` agent start, `G` hazard, space empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    food: BTreeSet<Cell>,
    start: Cell,
}

impl Layout {
    /// Names accepted by [`Layout::builtin`]
    pub const BUILTIN: [&'static str; 3] = ["tiny", "small", "corridor"];

    /// Parse a layout from its ASCII form.
    ///
    /// Blank lines are ignored; every other line must have the same width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLayout`] for ragged rows, unknown glyphs,
    /// empty input or more than one start cell, and
    /// [`Error::MissingAgentStart`] when no `P` is present.
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            // space is floor, so only the line terminator is stripped
            .map(|(idx, line)| (idx + 1, line.strip_suffix('\r').unwrap_or(line)))
            .filter(|(_, line)| !line.is_empty())
            .collect();

        let Some(&(_, first)) = rows.first() else {
            return Err(Error::InvalidLayout {
                line: 0,
                message: "layout is empty".to_string(),
            });
        };
        let width = first.chars().count();

        let mut tiles = Vec::with_capacity(width * rows.len());
        let mut food = BTreeSet::new();
        let mut start = None;

        for (row, &(line_no, line)) in rows.iter().enumerate() {
            let row_width = line.chars().count();
            if row_width != width {
                return Err(Error::InvalidLayout {
                    line: line_no,
                    message: format!("expected {width} columns, found {row_width}"),
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let (tile, marker) = Tile::from_char(glyph).ok_or_else(|| Error::InvalidLayout {
                    line: line_no,
                    message: format!("unknown glyph '{glyph}' at column {}", col + 1),
                })?;
                match marker {
                    Some(Marker::Food) => {
                        food.insert((row, col));
                    }
                    Some(Marker::Start) if start.is_some() => {
                        return Err(Error::InvalidLayout {
                            line: line_no,
                            message: "more than one agent start ('P')".to_string(),
                        });
                    }
                    Some(Marker::Start) => start = Some((row, col)),
                    None => {}
                }
                tiles.push(tile);
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            tiles,
            food,
            start: start.ok_or(Error::MissingAgentStart)?,
        })
    }

    /// One of the bundled layouts, by name.
    pub fn builtin(name: &str) -> Option<Self> {
        let text = match name {
            "tiny" => TINY,
            "small" => SMALL,
            "corridor" => CORRIDOR,
            _ => return None,
        };
        Self::parse(text).ok()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    /// Food present at the start of an episode
    pub fn food(&self) -> &BTreeSet<Cell> {
        &self.food
    }

    /// Cells outside the grid count as walls.
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.tile(cell).is_none_or(|tile| tile == Tile::Wall)
    }

    pub fn is_hazard(&self, cell: Cell) -> bool {
        self.tile(cell) == Some(Tile::Hazard)
    }

    fn tile(&self, (row, col): Cell) -> Option<Tile> {
        if row < self.height && col < self.width {
            Some(self.tiles[row * self.width + col])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_parse() {
        for name in Layout::BUILTIN {
            let layout = Layout::builtin(name).unwrap();
            assert!(!layout.food().is_empty(), "{name} has no food");
        }
        assert!(Layout::builtin("missing").is_none());
    }

    #[test]
    fn test_parse_small() {
        let layout = Layout::builtin("small").unwrap();
        assert_eq!(layout.width(), 9);
        assert_eq!(layout.height(), 5);
        assert_eq!(layout.start(), (1, 1));
        assert_eq!(layout.food().len(), 4);
        assert!(layout.is_hazard((2, 7)));
        assert!(layout.is_wall((0, 0)));
        assert!(!layout.is_wall((1, 2)));
        assert!(layout.is_wall((40, 40)));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Layout::parse("%%%%\n%P.\n%%%%").unwrap_err();
        assert!(matches!(err, Error::InvalidLayout { line: 2, .. }));
    }

    #[test]
    fn test_trailing_floor_column_kept() {
        let layout = Layout::parse("%%%%\n%P. \n%%%%").unwrap();
        assert_eq!(layout.width(), 4);
        assert_eq!(layout.height(), 3);
        assert!(!layout.is_wall((1, 3)));

        let crlf = Layout::parse("%%%%\r\n%P. \r\n%%%%\r\n").unwrap();
        assert_eq!(crlf, layout);
    }

    #[test]
    fn test_unknown_glyph_rejected() {
        let err = Layout::parse("%%%\n%P#\n%%%").unwrap_err();
        assert!(matches!(err, Error::InvalidLayout { line: 2, .. }));
    }

    #[test]
    fn test_start_required_and_unique() {
        assert!(matches!(
            Layout::parse("%%%\n%.%\n%%%"),
            Err(Error::MissingAgentStart)
        ));
        assert!(matches!(
            Layout::parse("%%%%\n%PP%\n%%%%"),
            Err(Error::InvalidLayout { .. })
        ));
        assert!(matches!(
            Layout::parse("\n\n"),
            Err(Error::InvalidLayout { line: 0, .. })
        ));
    }
}
