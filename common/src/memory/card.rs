use crate::memory::board::Position;
use serde::{Deserialize, Serialize};

// Symbols are numbered from 1, one per pair
pub type Symbol = u32;

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum CardState {
    Hidden,
    Revealed,
    Matched,
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq)]
pub struct Card {
    position: Position,
    value: Symbol,
    state: CardState,
}

impl Card {
    pub fn new(position: Position, value: Symbol) -> Self {
        Card {
            position,
            value,
            state: CardState::Hidden,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn value(&self) -> Symbol {
        self.value
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self.state, CardState::Hidden)
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self.state, CardState::Revealed)
    }

    pub fn is_matched(&self) -> bool {
        matches!(self.state, CardState::Matched)
    }

    // The value is only visible once the card has been turned over
    pub fn visible_value(&self) -> Option<Symbol> {
        match self.state {
            CardState::Hidden => None,
            CardState::Revealed | CardState::Matched => Some(self.value),
        }
    }

    // Hidden -> Revealed. Returns false if the card was not hidden.
    pub(crate) fn reveal(&mut self) -> bool {
        if self.is_hidden() {
            self.state = CardState::Revealed;
            true
        } else {
            false
        }
    }

    // Revealed -> Hidden. Matched cards never turn back over.
    pub(crate) fn conceal(&mut self) -> bool {
        if self.is_revealed() {
            self.state = CardState::Hidden;
            true
        } else {
            false
        }
    }

    // Revealed -> Matched
    pub(crate) fn settle(&mut self) -> bool {
        if self.is_revealed() {
            self.state = CardState::Matched;
            true
        } else {
            false
        }
    }
}
