use crate::memory::board::{cell_count, Board, BoardError, PairOutcome, Position, SelectionOutcome};
use crate::memory::deck::{DeckRng, ShuffleRng};
use crate::messages::{CellView, RenderState};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    pub rows: usize,
    pub cols: usize,
    pub time_limit_secs: u64,
    pub mismatch_delay_ms: u64,
    // Fixes the deal when set
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            rows: 4,
            cols: 4,
            time_limit_secs: 60,
            mismatch_delay_ms: 500,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), BoardError> {
        cell_count(self.rows, self.cols).map(|_| ())
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }

    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }

    pub fn deck_rng(&self) -> DeckRng {
        match self.seed {
            Some(seed) => DeckRng::seeded(seed),
            None => DeckRng::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won,
    TimedOut,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    Flipped(Position),
    Matched(Position, Position),
    Mismatched(Position, Position),
}

// Cards turned over but not yet matched. A mismatched pair stays on display
// until the deadline passes; no clicks are taken in the meantime.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Selection {
    Empty,
    One(Position),
    Held {
        first: Position,
        second: Position,
        until: Instant,
    },
}

#[derive(Clone, Debug)]
pub struct Session {
    board: Board,
    selection: Selection,
    started_at: Instant,
    time_limit: Duration,
    mismatch_delay: Duration,
    remaining: Duration,
    outcome: Option<Outcome>,
}

impl Session {
    pub fn start<R: ShuffleRng>(
        config: &SessionConfig,
        rng: &mut R,
        now: Instant,
    ) -> Result<Self, BoardError> {
        let board = Board::new(config.rows, config.cols, rng)?;
        info!(
            "started a {}x{} session with a {}s limit",
            config.rows, config.cols, config.time_limit_secs
        );
        Ok(Session {
            board,
            selection: Selection::Empty,
            started_at: now,
            time_limit: config.time_limit(),
            mismatch_delay: config.mismatch_delay(),
            remaining: config.time_limit(),
            outcome: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    // As of the last tick
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn hold_until(&self) -> Option<Instant> {
        match self.selection {
            Selection::Held { until, .. } => Some(until),
            _ => None,
        }
    }

    pub fn pending(&self) -> Vec<Position> {
        match self.selection {
            Selection::Empty => vec![],
            Selection::One(first) => vec![first],
            Selection::Held { first, second, .. } => vec![first, second],
        }
    }

    pub fn on_click(&mut self, position: Position, now: Instant) -> ClickOutcome {
        if let Some(outcome) = self.outcome {
            trace!("click on {} ignored, session over: {:?}", position, outcome);
            return ClickOutcome::Ignored;
        }
        let first = match self.selection {
            Selection::Held { .. } => {
                trace!("click on {} ignored while a mismatch is shown", position);
                return ClickOutcome::Ignored;
            }
            Selection::Empty => None,
            Selection::One(first) => Some(first),
        };
        let card = match self.board.select(position) {
            SelectionOutcome::Flipped(card) => card,
            SelectionOutcome::Ignored => {
                trace!("click on {} ignored", position);
                return ClickOutcome::Ignored;
            }
        };
        debug!("revealed {} at {}", card.value(), position);

        let first = match first {
            Some(first) => first,
            None => {
                self.selection = Selection::One(position);
                return ClickOutcome::Flipped(position);
            }
        };
        match self.board.evaluate_pair(first, position) {
            Some(PairOutcome::Matched) => {
                self.selection = Selection::Empty;
                debug!(
                    "matched {} and {}, {}/{} pairs",
                    first,
                    position,
                    self.board.matched_pairs(),
                    self.board.total_pairs()
                );
                ClickOutcome::Matched(first, position)
            }
            Some(PairOutcome::Mismatched) => {
                let until = now.checked_add(self.mismatch_delay).unwrap_or(now);
                self.selection = Selection::Held {
                    first,
                    second: position,
                    until,
                };
                debug!("mismatched {} and {}", first, position);
                ClickOutcome::Mismatched(first, position)
            }
            None => {
                warn!("could not evaluate pair {} and {}, turning both back", first, position);
                self.board.conceal_pair(first, position);
                self.selection = Selection::Empty;
                ClickOutcome::Ignored
            }
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        if self.outcome.is_some() {
            return;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        self.remaining = self.remaining.min(self.time_limit.saturating_sub(elapsed));

        if let Selection::Held {
            first,
            second,
            until,
        } = self.selection
        {
            if now >= until {
                self.board.conceal_pair(first, second);
                self.selection = Selection::Empty;
                debug!("turned {} and {} back over", first, second);
            }
        }

        // A finished board wins even if the clock ran out on the same tick
        let outcome = if self.board.is_complete() {
            Some(Outcome::Won)
        } else if self.remaining.is_zero() {
            Some(Outcome::TimedOut)
        } else {
            None
        };
        if let Some(outcome) = outcome {
            info!(
                "session over: {:?} with {}/{} pairs",
                outcome,
                self.board.matched_pairs(),
                self.board.total_pairs()
            );
            self.outcome = Some(outcome);
        }
    }

    pub fn snapshot(&self) -> RenderState {
        let cells = self
            .board
            .cards()
            .iter()
            .map(|card| CellView {
                position: card.position(),
                value: card.visible_value(),
                matched: card.is_matched(),
            })
            .collect();
        RenderState {
            cells,
            remaining_seconds: whole_seconds(self.remaining),
            outcome: self.outcome,
            matched_pairs: self.board.matched_pairs(),
            total_pairs: self.board.total_pairs(),
        }
    }
}

// Rounded up, so the display only reads 0 once time is actually up
fn whole_seconds(duration: Duration) -> u64 {
    if duration.subsec_nanos() > 0 {
        duration.as_secs() + 1
    } else {
        duration.as_secs()
    }
}
