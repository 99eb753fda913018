mod board;
mod card;
mod deck;
mod input;
mod session;

pub use board::{Board, BoardError, ConfigurationProblem, Position, SelectionOutcome, MIN_CELLS};
pub use card::{Card, CardState, Symbol};
pub use deck::{paired_symbols, DeckRng, ShuffleRng};
pub use input::{GridLayout, InputEvent};
pub use session::{ClickOutcome, Outcome, Session, SessionConfig};
