use crate::memory::board::Position;
use serde::{Deserialize, Serialize};

// Raw events from whatever surface is showing the board
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Click { x: u32, y: u32 },
    Quit,
}

// Maps surface coordinates to grid positions. Cells are laid out left to right
// and top to bottom, separated by a gutter and offset by a margin.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct GridLayout {
    pub cell_width: u32,
    pub cell_height: u32,
    pub gutter: u32,
    pub margin_x: u32,
    pub margin_y: u32,
}

impl Default for GridLayout {
    fn default() -> Self {
        GridLayout {
            cell_width: 100,
            cell_height: 100,
            gutter: 10,
            margin_x: 50,
            margin_y: 50,
        }
    }
}

impl GridLayout {
    // Top-left corner of the cell at the given position
    pub fn cell_origin(&self, position: Position) -> (u64, u64) {
        let x = self.margin_x as u64
            + position.col() as u64 * (self.cell_width as u64 + self.gutter as u64);
        let y = self.margin_y as u64
            + position.row() as u64 * (self.cell_height as u64 + self.gutter as u64);
        (x, y)
    }

    // Width and height covered by a rows x cols grid, margins included on both sides
    pub fn extent(&self, rows: usize, cols: usize) -> (u64, u64) {
        (
            span(self.margin_x, self.cell_width, self.gutter, cols),
            span(self.margin_y, self.cell_height, self.gutter, rows),
        )
    }

    // Clicks on a gutter, a margin, or past the last cell hit nothing
    pub fn position_at(&self, x: u32, y: u32, rows: usize, cols: usize) -> Option<Position> {
        let col = cell_index(x, self.margin_x, self.cell_width, self.gutter, cols)?;
        let row = cell_index(y, self.margin_y, self.cell_height, self.gutter, rows)?;
        Some(Position::new(row, col))
    }
}

fn span(margin: u32, size: u32, gutter: u32, count: usize) -> u64 {
    let count = count as u64;
    let gutters = count.saturating_sub(1) * gutter as u64;
    2 * margin as u64 + count * size as u64 + gutters
}

fn cell_index(coord: u32, margin: u32, size: u32, gutter: u32, count: usize) -> Option<usize> {
    let offset = coord.checked_sub(margin)? as u64;
    let stride = size as u64 + gutter as u64;
    if size == 0 || offset % stride >= size as u64 {
        return None;
    }
    let idx = usize::try_from(offset / stride).ok()?;
    if idx < count {
        Some(idx)
    } else {
        None
    }
}
