use crate::{Outcome, Position, Symbol};
use serde::{Deserialize, Serialize};

// What a renderer needs to draw one card
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CellView {
    pub position: Position,
    // None while the card is face down
    pub value: Option<Symbol>,
    pub matched: bool,
}

// Produced once per frame from the session. Owned, so it can be handed to
// another thread without touching the board.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderState {
    pub cells: Vec<CellView>,
    pub remaining_seconds: u64,
    pub outcome: Option<Outcome>,
    pub matched_pairs: usize,
    pub total_pairs: usize,
}

impl RenderState {
    pub fn cell(&self, position: Position) -> Option<&CellView> {
        self.cells.iter().find(|c| c.position == position)
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
}
