use crate::config::AppConfig;
use crate::input;
use crate::view;
use crossterm::event;
use memory_common::{BoardError, ClickOutcome, GridLayout, InputEvent, Outcome, Session, ShuffleRng};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

pub struct App {
    session: Session,
    layout: GridLayout,
    tick: Duration,
    end_screen: Duration,
    // Set once the session is over; the result stays up until then
    close_at: Option<Instant>,
    should_quit: bool,
}

impl App {
    pub fn new<R: ShuffleRng>(config: &AppConfig, rng: &mut R, now: Instant) -> Result<Self, BoardError> {
        Ok(App {
            session: Session::start(&config.session, rng, now)?,
            layout: config.layout.grid(),
            tick: config.display.tick(),
            end_screen: config.display.end_screen(),
            close_at: None,
            should_quit: false,
        })
    }

    /// Main loop: tick, draw, then wait up to one tick for input.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.tick(Instant::now());
            let state = self.session.snapshot();
            terminal.draw(|f| view::render(f, &state, &self.layout))?;

            if self.is_finished(Instant::now()) {
                break;
            }

            if event::poll(self.tick)? {
                if let Some(input) = input::translate(&event::read()?) {
                    self.handle_input(input, Instant::now());
                }
            }
        }
        Ok(())
    }

    pub fn tick(&mut self, now: Instant) {
        self.session.on_tick(now);
        if self.session.is_over() && self.close_at.is_none() {
            self.close_at = Some(now.checked_add(self.end_screen).unwrap_or(now));
        }
    }

    pub fn handle_input(&mut self, input: InputEvent, now: Instant) -> ClickOutcome {
        match input {
            InputEvent::Quit => {
                info!("quit requested");
                self.should_quit = true;
                ClickOutcome::Ignored
            }
            InputEvent::Click { x, y } => {
                let board = self.session.board();
                match self.layout.position_at(x, y, board.rows(), board.cols()) {
                    Some(position) => {
                        let outcome = self.session.on_click(position, now);
                        debug!("click at ({}, {}) on {}: {:?}", x, y, position, outcome);
                        outcome
                    }
                    None => {
                        trace!("click at ({}, {}) missed the grid", x, y);
                        ClickOutcome::Ignored
                    }
                }
            }
        }
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.should_quit || self.close_at.map_or(false, |close_at| now >= close_at)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.session.outcome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memory_common::{CardState, Position};

    // Deals 1, 2, 1, 2 on a 2x2 board
    struct MockRng;

    impl ShuffleRng for MockRng {
        fn shuffle<T>(&mut self, _items: &mut [T]) {}
    }

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.session.rows = 2;
        config.session.cols = 2;
        config
    }

    // Default terminal layout: cells 9x4, gutter 1, margins 2 and 3
    fn click(row: u32, col: u32) -> InputEvent {
        InputEvent::Click {
            x: 2 + col * 10 + 4,
            y: 3 + row * 5 + 1,
        }
    }

    fn state(app: &App, row: usize, col: usize) -> CardState {
        app.session
            .board()
            .card_at(Position::new(row, col))
            .unwrap()
            .state()
    }

    #[test]
    fn test_clicks_reach_the_board() {
        let t0 = Instant::now();
        let mut app = App::new(&config(), &mut MockRng, t0).unwrap();
        assert_eq!(
            app.handle_input(click(0, 0), t0),
            ClickOutcome::Flipped(Position::new(0, 0))
        );
        assert_eq!(
            app.handle_input(click(1, 0), t0),
            ClickOutcome::Matched(Position::new(0, 0), Position::new(1, 0))
        );
        assert_eq!(state(&app, 0, 0), CardState::Matched);
        assert_eq!(state(&app, 1, 0), CardState::Matched);
    }

    #[test]
    fn test_clicks_off_the_grid_are_dropped() {
        let t0 = Instant::now();
        let mut app = App::new(&config(), &mut MockRng, t0).unwrap();
        // Header, gutter, and beyond the last column
        for (x, y) in [(5, 1), (11, 5), (30, 5)] {
            assert_eq!(app.handle_input(InputEvent::Click { x, y }, t0), ClickOutcome::Ignored);
        }
        assert!(app.session.pending().is_empty());
    }

    #[test]
    fn test_mismatch_clears_on_tick() {
        let t0 = Instant::now();
        let mut app = App::new(&config(), &mut MockRng, t0).unwrap();
        app.handle_input(click(0, 0), t0);
        app.handle_input(click(0, 1), t0);
        assert_eq!(app.handle_input(click(1, 0), t0), ClickOutcome::Ignored);

        app.tick(t0 + Duration::from_millis(500));
        assert_eq!(state(&app, 0, 0), CardState::Hidden);
        assert_eq!(state(&app, 0, 1), CardState::Hidden);
        assert_eq!(
            app.handle_input(click(1, 0), t0 + Duration::from_millis(501)),
            ClickOutcome::Flipped(Position::new(1, 0))
        );
    }

    #[test]
    fn test_quit() {
        let t0 = Instant::now();
        let mut app = App::new(&config(), &mut MockRng, t0).unwrap();
        assert!(!app.is_finished(t0));
        app.handle_input(InputEvent::Quit, t0);
        assert!(app.is_finished(t0));
        assert_eq!(app.outcome(), None);
    }

    #[test]
    fn test_result_stays_up_before_closing() {
        let t0 = Instant::now();
        let mut app = App::new(&config(), &mut MockRng, t0).unwrap();
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            app.handle_input(click(row, col), t0);
        }
        let won_at = t0 + Duration::from_secs(1);
        app.tick(won_at);
        assert_eq!(app.outcome(), Some(Outcome::Won));
        assert!(!app.is_finished(won_at));

        // Later ticks do not push the deadline back
        app.tick(won_at + Duration::from_secs(1));
        assert!(!app.is_finished(won_at + Duration::from_millis(1999)));
        assert!(app.is_finished(won_at + Duration::from_secs(2)));
    }

    #[test]
    fn test_timeout_closes_after_end_screen() {
        let t0 = Instant::now();
        let mut app = App::new(&config(), &mut MockRng, t0).unwrap();
        let limit = t0 + Duration::from_secs(60);
        app.tick(limit);
        assert_eq!(app.outcome(), Some(Outcome::TimedOut));
        // Clicks after the end change nothing
        assert_eq!(app.handle_input(click(0, 0), limit), ClickOutcome::Ignored);
        assert!(app.is_finished(limit + Duration::from_secs(2)));
    }

    #[test]
    fn test_new_rejects_odd_board() {
        let mut config = config();
        config.session.rows = 1;
        config.session.cols = 3;
        assert!(App::new(&config, &mut MockRng, Instant::now()).is_err());
    }
}
