#![no_std]

extern crate alloc;

use core::ops::{BitOr, Index};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use scores::*;
pub use session::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod error;
mod generator;
mod scores;
mod session;
mod snapshot;
mod types;

/// Points awarded for each collected item.
pub const ITEM_POINTS: Score = 10;

/// Board dimensions and content counts, validated on construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
    items: CellCount,
}

impl GameConfig {
    pub fn new(rows: Coord, cols: Coord, mines: CellCount, items: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyBoard.into());
        }
        let special = u32::from(mines) + u32::from(items);
        if special >= u32::from(mult(rows, cols)) {
            return Err(ConfigError::TooManyContents.into());
        }
        Ok(Self {
            size: (rows, cols),
            mines,
            items,
        })
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn items(&self) -> CellCount {
        self.items
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }
}

impl Default for GameConfig {
    /// The classic 10x10 board with 10 mines, plus a few items.
    fn default() -> Self {
        Self {
            size: (10, 10),
            mines: 10,
            items: 3,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Expert => "Expert",
        }
    }

    pub const fn config(self) -> GameConfig {
        let (size, mines, items) = match self {
            Self::Beginner => ((9, 9), 10, 3),
            Self::Intermediate => ((16, 16), 40, 5),
            Self::Expert => ((16, 30), 99, 8),
        };
        GameConfig { size, mines, items }
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

/// Where the mines and items of one board are.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentLayout {
    contents: Array2<Content>,
    mine_count: CellCount,
    item_count: CellCount,
}

impl ContentLayout {
    /// Wraps an arbitrary content grid, rejecting dimensions that do not fit a [`Coord`].
    pub fn from_contents(contents: Array2<Content>) -> Result<Self> {
        let (rows, cols) = contents.dim();
        if Coord::try_from(rows).is_err() || Coord::try_from(cols).is_err() {
            log::warn!("Content grid of {}x{} is too large for a board", rows, cols);
            return Err(GameError::InvalidLayout);
        }
        Ok(Self::from_contents_unchecked(contents))
    }

    /// Caller guarantees both dimensions fit a [`Coord`], so the counts fit a [`CellCount`].
    pub(crate) fn from_contents_unchecked(contents: Array2<Content>) -> Self {
        let count = |wanted: Content| {
            contents.iter().filter(|&&content| content == wanted).count() as CellCount
        };
        let mine_count = count(Content::Mine);
        let item_count = count(Content::Item);
        Self {
            contents,
            mine_count,
            item_count,
        }
    }

    /// Builds a layout from explicit positions, rejecting coordinates that are out of range or
    /// used twice.
    pub fn from_coords(size: Coord2, mines: &[Coord2], items: &[Coord2]) -> Result<Self> {
        let mut contents: Array2<Content> = Array2::default(size.to_nd_index());

        let tagged = mines
            .iter()
            .map(|&coords| (coords, Content::Mine))
            .chain(items.iter().map(|&coords| (coords, Content::Item)));
        for (coords, content) in tagged {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidLayout);
            }
            let slot = &mut contents[coords.to_nd_index()];
            if *slot != Content::Empty {
                return Err(GameError::InvalidLayout);
            }
            *slot = content;
        }

        Ok(Self::from_contents_unchecked(contents))
    }

    pub fn size(&self) -> Coord2 {
        board_size(&self.contents)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn item_count(&self) -> CellCount {
        self.item_count
    }

    pub fn content_at(&self, coords: Coord2) -> Content {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.contents
            .iter_neighbors(coords)
            .filter(|&pos| self[pos].is_mine())
            .count() as u8
    }

    /// Whether this layout can serve `config` with `exclude` kept free.
    pub fn satisfies(&self, config: &GameConfig, exclude: Option<Coord2>) -> bool {
        self.size() == config.size()
            && self.mine_count == config.mines()
            && self.item_count == config.items()
            && exclude.is_none_or(|coords| self[coords] == Content::Empty)
    }
}

impl Index<Coord2> for ContentLayout {
    type Output = Content;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.contents[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Collected,
    HitMine,
    Won,
}

impl RevealOutcome {
    const fn priority(self) -> u8 {
        use RevealOutcome::*;
        match self {
            NoChange => 0,
            Revealed => 1,
            Collected => 2,
            Won => 3,
            HitMine => 4,
        }
    }
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        if rhs.priority() > self.priority() {
            rhs
        } else {
            self
        }
    }
}
