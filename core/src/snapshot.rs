use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Render-facing copy of one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    pub row: Coord,
    pub col: Coord,
    pub revealed: bool,
    pub flagged: bool,
    pub is_mine: bool,
    pub is_item: bool,
    pub adjacent_mine_count: u8,
}

impl From<&Cell> for CellView {
    fn from(cell: &Cell) -> Self {
        Self {
            row: cell.row(),
            col: cell.col(),
            revealed: cell.is_revealed(),
            flagged: cell.is_flagged(),
            is_mine: cell.is_mine(),
            is_item: cell.is_item(),
            adjacent_mine_count: cell.adjacent_mine_count(),
        }
    }
}

/// Everything a renderer needs, detached from the session that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub size: Coord2,
    pub status: SessionStatus,
    pub score: Score,
    pub high_score: Score,
    pub items_collected: CellCount,
    pub items_total: CellCount,
    pub mines_total: CellCount,
    pub cells: Array2<CellView>,
}

impl BoardSnapshot {
    pub fn from_session<S: ScoreStore, G: ContentGenerator>(session: &GameSession<S, G>) -> Self {
        let config = session.config();
        Self {
            size: config.size(),
            status: session.status(),
            score: session.score(),
            high_score: session.high_score(),
            items_collected: session.items_collected(),
            items_total: config.items(),
            mines_total: config.mines(),
            cells: session.board().map(CellView::from),
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<&CellView> {
        self.cells.get(coords.to_nd_index())
    }
}
