//! Core domain types for the gridlock board.

use crate::{BOARD_SIZE, BoardError};
use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Player {
    /// Player X (moves first).
    X,
    /// Player O (moves second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A cell on the board.
///
/// On the wire a cell is one of three strings: `""` (empty), `"X"` or `"O"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a player.
    Occupied(Player),
}

impl Cell {
    /// Wire symbol for this cell.
    pub fn symbol(self) -> &'static str {
        match self {
            Cell::Empty => "",
            Cell::Occupied(Player::X) => "X",
            Cell::Occupied(Player::O) => "O",
        }
    }

    /// Symbol used by [`Board::render`], `.` for an empty cell.
    fn glyph(self) -> &'static str {
        match self {
            Cell::Empty => ".",
            other => other.symbol(),
        }
    }

    /// Returns true if the cell has no mark.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Cell> for &'static str {
    fn from(cell: Cell) -> Self {
        cell.symbol()
    }
}

impl TryFrom<String> for Cell {
    type Error = BoardError;

    fn try_from(symbol: String) -> Result<Self, Self::Error> {
        match symbol.as_str() {
            "" => Ok(Cell::Empty),
            "X" => Ok(Cell::Occupied(Player::X)),
            "O" => Ok(Cell::Occupied(Player::O)),
            _ => Err(BoardError::UnknownSymbol { symbol }),
        }
    }
}

/// Square grid of cells in row-major order.
///
/// Serializes as a sequence of rows, each a sequence of cell symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    rows: Vec<Vec<Cell>>,
}

impl Board {
    /// Creates an empty `size` x `size` board.
    pub fn new(size: usize) -> Self {
        Self {
            rows: vec![vec![Cell::Empty; size]; size],
        }
    }

    /// Creates an empty board of the standard game size.
    pub fn standard() -> Self {
        Self::new(BOARD_SIZE)
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Gets the cell at the given coordinate.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Gets the cell at a signed coordinate, `None` when it falls off the grid.
    pub fn get_signed(&self, row: isize, col: isize) -> Option<Cell> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        self.get(row, col)
    }

    /// Places `player`'s mark on an empty cell.
    ///
    /// The board is left untouched on error.
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> Result<(), BoardError> {
        let size = self.size();
        let cell = self
            .rows
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(BoardError::OutOfBounds { row, col, size })?;

        if let Cell::Occupied(by) = *cell {
            return Err(BoardError::Occupied { row, col, by });
        }

        *cell = Cell::Occupied(player);
        Ok(())
    }

    /// Returns the rows of the board.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rows.iter().flat_map(|r| r.iter().copied())
    }

    /// Number of cells holding `player`'s mark.
    pub fn count(&self, player: Player) -> usize {
        self.cells().filter(|&c| c == Cell::Occupied(player)).count()
    }

    /// Formats the board as a human-readable string, `.` for empty cells.
    pub fn render(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                let glyphs: Vec<_> = row.iter().map(|cell| cell.glyph()).collect();
                glyphs.join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
