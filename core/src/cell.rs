use serde::{Deserialize, Serialize};

use crate::*;

/// What a cell holds underneath. A cell holds at most one special content.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Content {
    #[default]
    Empty,
    Mine,
    Item,
}

impl Content {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_item(self) -> bool {
        matches!(self, Self::Item)
    }
}

/// One board position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    row: Coord,
    col: Coord,
    content: Content,
    adjacent_mines: u8,
    revealed: bool,
    flagged: bool,
}

impl Cell {
    pub const fn new((row, col): Coord2) -> Self {
        Self {
            row,
            col,
            content: Content::Empty,
            adjacent_mines: 0,
            revealed: false,
            flagged: false,
        }
    }

    pub const fn row(&self) -> Coord {
        self.row
    }

    pub const fn col(&self) -> Coord {
        self.col
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    pub const fn content(&self) -> Content {
        self.content
    }

    pub const fn is_mine(&self) -> bool {
        self.content.is_mine()
    }

    pub const fn is_item(&self) -> bool {
        self.content.is_item()
    }

    /// Mines among the up to 8 neighbors, always 0 for mine cells.
    pub const fn adjacent_mine_count(&self) -> u8 {
        self.adjacent_mines
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// Hidden and not flagged, so `open` would act on it.
    pub const fn is_openable(&self) -> bool {
        !self.revealed && !self.flagged
    }

    pub(crate) fn fill(&mut self, content: Content, adjacent_mines: u8) {
        self.content = content;
        self.adjacent_mines = if content.is_mine() { 0 } else { adjacent_mines };
    }

    pub(crate) fn reveal(&mut self) {
        debug_assert!(!self.flagged, "flagged cells are never revealed");
        self.revealed = true;
    }

    /// Flip the flag; returns false when the cell is already revealed.
    pub(crate) fn toggle_flag(&mut self) -> bool {
        if self.revealed {
            return false;
        }
        self.flagged = !self.flagged;
        true
    }
}
