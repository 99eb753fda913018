use crate::memory::card::Card;
use crate::memory::deck::{paired_symbols, ShuffleRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

pub const MIN_CELLS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationProblem {
    OddCellCount(usize),
    TooFewCells(usize),
    TooManyCells { rows: usize, cols: usize },
}

impl fmt::Display for ConfigurationProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationProblem::OddCellCount(n) => {
                write!(f, "{} cells cannot be split into pairs", n)
            }
            ConfigurationProblem::TooFewCells(n) => {
                write!(f, "{} cells is below the minimum of {}", n, MIN_CELLS)
            }
            ConfigurationProblem::TooManyCells { rows, cols } => {
                write!(f, "{} rows by {} columns overflows the cell count", rows, cols)
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(ConfigurationProblem),
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionOutcome {
    Ignored,
    Flipped(Card),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PairOutcome {
    Matched,
    Mismatched,
}

// Check that a rows x cols grid can be dealt as pairs and return its cell count
pub(crate) fn cell_count(rows: usize, cols: usize) -> Result<usize, BoardError> {
    let cells = rows.checked_mul(cols).ok_or(BoardError::InvalidConfiguration(
        ConfigurationProblem::TooManyCells { rows, cols },
    ))?;
    if cells < MIN_CELLS {
        return Err(BoardError::InvalidConfiguration(
            ConfigurationProblem::TooFewCells(cells),
        ));
    }
    if cells % 2 != 0 {
        return Err(BoardError::InvalidConfiguration(
            ConfigurationProblem::OddCellCount(cells),
        ));
    }
    Ok(cells)
}

// Cards are stored in row-major order
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cards: Vec<Card>,
    matched_pairs: usize,
}

impl Board {
    pub fn new<R: ShuffleRng>(rows: usize, cols: usize, rng: &mut R) -> Result<Self, BoardError> {
        let cells = cell_count(rows, cols)?;
        let mut symbols = paired_symbols(cells / 2);
        rng.shuffle(&mut symbols);
        let cards = symbols
            .into_iter()
            .enumerate()
            .map(|(idx, value)| Card::new(Position::new(idx / cols, idx % cols), value))
            .collect();
        debug!("dealt a {}x{} board with {} pairs", rows, cols, cells / 2);
        Ok(Board {
            rows,
            cols,
            cards,
            matched_pairs: 0,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> usize {
        self.cards.len() / 2
    }

    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.total_pairs()
    }

    fn index_of(&self, position: Position) -> Option<usize> {
        if position.row() >= self.rows || position.col() >= self.cols {
            return None;
        }
        Some(position.row() * self.cols + position.col())
    }

    pub fn card_at(&self, position: Position) -> Option<&Card> {
        self.cards.get(self.index_of(position)?)
    }

    fn card_at_mut(&mut self, position: Position) -> Option<&mut Card> {
        let idx = self.index_of(position)?;
        self.cards.get_mut(idx)
    }

    // Turn over a hidden card. Anything else is ignored.
    pub fn select(&mut self, position: Position) -> SelectionOutcome {
        let card = match self.card_at_mut(position) {
            Some(card) => card,
            None => return SelectionOutcome::Ignored,
        };
        if card.reveal() {
            SelectionOutcome::Flipped(*card)
        } else {
            SelectionOutcome::Ignored
        }
    }

    // Compare two distinct revealed cards. A match settles both immediately;
    // a mismatch leaves both revealed until conceal_pair is called.
    pub(crate) fn evaluate_pair(&mut self, first: Position, second: Position) -> Option<PairOutcome> {
        let a = self.index_of(first)?;
        let b = self.index_of(second)?;
        if a == b || !self.cards[a].is_revealed() || !self.cards[b].is_revealed() {
            return None;
        }
        if self.cards[a].value() == self.cards[b].value() {
            self.cards[a].settle();
            self.cards[b].settle();
            self.matched_pairs += 1;
            Some(PairOutcome::Matched)
        } else {
            Some(PairOutcome::Mismatched)
        }
    }

    pub(crate) fn conceal_pair(&mut self, first: Position, second: Position) {
        for position in [first, second] {
            if let Some(card) = self.card_at_mut(position) {
                card.conceal();
            }
        }
    }
}
