use alloc::collections::VecDeque;
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Pending -> Active (first open places the contents)
/// - Pending -> Won (first open already collects every item)
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Board allocated, contents not placed yet
    #[default]
    Pending,
    Active,
    Won,
    Lost,
}

impl SessionStatus {
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from construction to win or loss.
///
/// Contents are placed on the first [`open`](Self::open), never on the cell being opened. After
/// the session is won or lost every mutating call is a silent no-op until [`reset`](Self::reset).
#[derive(Clone, Debug)]
pub struct GameSession<S, G = RandomContentGenerator> {
    config: GameConfig,
    board: Array2<Cell>,
    status: SessionStatus,
    items_collected: CellCount,
    score: Score,
    revealed_count: CellCount,
    flagged_count: Saturating<CellCount>,
    triggered_mine: Option<Coord2>,
    high_score: Score,
    store: S,
    generator: G,
}

fn fresh_board(size: Coord2) -> Array2<Cell> {
    Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
        Cell::new((row as Coord, col as Coord))
    })
}

impl<S: ScoreStore, G: ContentGenerator> GameSession<S, G> {
    pub fn new(config: GameConfig, store: S, generator: G) -> Self {
        let high_score = store.load().high_score;
        log::debug!("New session {:?}, high score {}", config, high_score);
        Self {
            config,
            board: fresh_board(config.size()),
            status: SessionStatus::Pending,
            items_collected: 0,
            score: 0,
            revealed_count: 0,
            flagged_count: Saturating(0),
            triggered_mine: None,
            high_score,
            store,
            generator,
        }
    }

    /// Starts a session on a known layout, skipping deferred placement.
    ///
    /// The layout must describe a valid configuration. `generator` is only used after a reset.
    pub fn with_layout(layout: ContentLayout, store: S, generator: G) -> Result<Self> {
        let (rows, cols) = layout.size();
        let config = GameConfig::new(rows, cols, layout.mine_count(), layout.item_count())?;
        let mut session = Self::new(config, store, generator);
        session.apply_layout(&layout);
        Ok(session)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn first_move_pending(&self) -> bool {
        self.status.is_pending()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Best score recorded by the store, including this session once it has ended.
    pub fn high_score(&self) -> Score {
        self.high_score
    }

    pub fn items_collected(&self) -> CellCount {
        self.items_collected
    }

    pub fn items_left(&self) -> CellCount {
        self.config.items() - self.items_collected
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// Mines not accounted for by flags, negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.config.mines() as isize) - (self.flagged_count.0 as isize)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.board[coords.to_nd_index()])
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_session(self)
    }

    pub(crate) fn board(&self) -> &Array2<Cell> {
        &self.board
    }

    /// Reveal a cell, flood-filling if it has no adjacent mines.
    ///
    /// Revealed or flagged cells, and any cell once the session is over, are left untouched.
    pub fn open(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;

        if self.status.is_finished() || !self.board[coords.to_nd_index()].is_openable() {
            return Ok(RevealOutcome::NoChange);
        }

        if self.status.is_pending() {
            self.place_content(coords)?;
        }

        let outcome = self.reveal_from(coords);
        Ok(self.settle(outcome))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.config.validate_coords(coords)?;

        if self.status.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = &mut self.board[coords.to_nd_index()];
        if !cell.toggle_flag() {
            return Ok(MarkOutcome::NoChange);
        }
        if cell.is_flagged() {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        Ok(MarkOutcome::Changed)
    }

    /// Throw the board away and start over with the same configuration.
    pub fn reset(&mut self) {
        self.reset_with(self.config);
    }

    pub fn reset_with(&mut self, config: GameConfig) {
        log::debug!("Reset session to {:?}", config);
        self.config = config;
        self.board = fresh_board(config.size());
        self.status = SessionStatus::Pending;
        self.items_collected = 0;
        self.score = 0;
        self.revealed_count = 0;
        self.flagged_count = Saturating(0);
        self.triggered_mine = None;
        self.high_score = self.store.load().high_score;
    }

    fn place_content(&mut self, exclude: Coord2) -> Result<()> {
        let layout = self.generator.generate(&self.config, exclude);
        if !layout.satisfies(&self.config, Some(exclude)) {
            log::warn!(
                "Generator returned a layout that does not fit {:?} around {:?}",
                self.config,
                exclude
            );
            return Err(GameError::InvalidLayout);
        }
        self.apply_layout(&layout);
        Ok(())
    }

    fn apply_layout(&mut self, layout: &ContentLayout) {
        for ((row, col), cell) in self.board.indexed_iter_mut() {
            let coords = (row as Coord, col as Coord);
            cell.fill(layout.content_at(coords), layout.adjacent_mine_count(coords));
        }
        self.status = SessionStatus::Active;
    }

    /// Opens `start` and, through a work queue, every cell reachable over zero-count cells.
    fn reveal_from(&mut self, start: Coord2) -> RevealOutcome {
        let mut outcome = RevealOutcome::NoChange;
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            let cell = {
                let cell = &mut self.board[coords.to_nd_index()];
                // queued twice, or flagged since being queued
                if !cell.is_openable() {
                    continue;
                }
                cell.reveal();
                *cell
            };
            self.revealed_count += 1;
            log::trace!(
                "Opened {:?}, content {:?}, adjacent mines {}",
                coords,
                cell.content(),
                cell.adjacent_mine_count()
            );

            match cell.content() {
                Content::Mine => {
                    self.triggered_mine = Some(coords);
                    return RevealOutcome::HitMine;
                }
                Content::Item => {
                    self.items_collected += 1;
                    self.score += ITEM_POINTS;
                    outcome = outcome | RevealOutcome::Collected;
                }
                Content::Empty => outcome = outcome | RevealOutcome::Revealed,
            }

            if cell.adjacent_mine_count() == 0 {
                let board = &self.board;
                to_visit.extend(
                    board
                        .iter_neighbors(coords)
                        .filter(|&pos| board[pos.to_nd_index()].is_openable()),
                );
            }
        }

        outcome
    }

    /// Applies the end-of-move state transitions.
    fn settle(&mut self, outcome: RevealOutcome) -> RevealOutcome {
        if outcome == RevealOutcome::HitMine {
            self.finish(SessionStatus::Lost);
            return outcome;
        }

        if self.items_collected == self.config.items() {
            self.finish(SessionStatus::Won);
            RevealOutcome::Won
        } else {
            outcome
        }
    }

    fn finish(&mut self, status: SessionStatus) {
        self.status = status;

        let mut record = self.store.load();
        if record.submit(self.score) {
            log::debug!("New high score {}", self.score);
        }
        self.store.save(&record);
        self.high_score = record.high_score;

        log::debug!(
            "Session ended {:?} with score {}, {} of {} items",
            status,
            self.score,
            self.items_collected,
            self.config.items()
        );
    }
}
