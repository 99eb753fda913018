use memory_common::messages::{CellView, RenderState};
use memory_common::{GridLayout, Outcome};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub const TITLE: &str = "Memory Puzzle Game";

const HEADER_HEIGHT: u16 = 3;
const BANNER_WIDTH: u16 = 30;
const BANNER_HEIGHT: u16 = 3;

pub fn render(frame: &mut Frame, state: &RenderState, layout: &GridLayout) {
    let area = frame.area();
    let header_height = HEADER_HEIGHT.min(u16::try_from(layout.margin_y).unwrap_or(u16::MAX));
    render_header(frame, state, Rect::new(area.x, area.y, area.width, header_height).intersection(area));

    let mut grid_bottom = area.y;
    for cell in &state.cells {
        if let Some(rect) = cell_rect(cell, layout, area) {
            render_card(frame, cell, rect);
            grid_bottom = grid_bottom.max(rect.bottom());
        }
    }

    if grid_bottom < area.bottom() {
        render_controls(frame, Rect::new(area.x, area.bottom() - 1, area.width, 1));
    }

    if let Some(outcome) = state.outcome {
        render_banner(frame, outcome, area);
    }
}

// The same rectangle the layout uses to resolve clicks, clipped to the frame
fn cell_rect(cell: &CellView, layout: &GridLayout, area: Rect) -> Option<Rect> {
    let (x, y) = layout.cell_origin(cell.position);
    let x = u16::try_from(x).ok()?;
    let y = u16::try_from(y).ok()?;
    let width = u16::try_from(layout.cell_width).ok()?;
    let height = u16::try_from(layout.cell_height).ok()?;
    let rect = Rect::new(x, y, width, height).intersection(area);
    if rect.is_empty() {
        None
    } else {
        Some(rect)
    }
}

fn render_header(frame: &mut Frame, state: &RenderState, area: Rect) {
    if area.is_empty() {
        return;
    }
    let status = Line::from(vec![
        Span::raw(format!("Pairs: {}/{}", state.matched_pairs, state.total_pairs)),
        Span::raw("   "),
        Span::styled(
            format!("Time Left: {}s", state.remaining_seconds),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);
    let header = Paragraph::new(status)
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::BOTTOM).title(TITLE));
    frame.render_widget(header, area);
}

fn render_card(frame: &mut Frame, cell: &CellView, area: Rect) {
    let (label, style) = match (cell.value, cell.matched) {
        (None, _) => (String::new(), Style::default().fg(Color::DarkGray).bg(Color::Gray)),
        (Some(value), false) => (
            value.to_string(),
            Style::default().fg(Color::Black).bg(Color::White).add_modifier(Modifier::BOLD),
        ),
        (Some(value), true) => (
            value.to_string(),
            Style::default().fg(Color::Black).bg(Color::Green),
        ),
    };
    let card = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(card, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("Click: turn a card  |  Q/Esc: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(controls, area);
}

pub fn banner_text(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Won => "You Win!",
        Outcome::TimedOut => "Time's Up! Game Over!",
    }
}

fn render_banner(frame: &mut Frame, outcome: Outcome, area: Rect) {
    let width = BANNER_WIDTH.min(area.width);
    let height = BANNER_HEIGHT.min(area.height);
    let rect = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    let color = match outcome {
        Outcome::Won => Color::Green,
        Outcome::TimedOut => Color::Red,
    };
    let banner = Paragraph::new(banner_text(outcome))
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(Clear, rect);
    frame.render_widget(banner, rect);
}
