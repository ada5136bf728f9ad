//! A cell grid addressed in viewport px.

use crema_core::{CELL_HEIGHT_PX, CELL_WIDTH_PX};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use crate::color::BACKGROUND;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Option<Color>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: None,
        }
    }
}

/// Characters and colors for one terminal frame. Later writes cover earlier ones.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn to_cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = (x / CELL_WIDTH_PX).floor();
        let row = (y / CELL_HEIGHT_PX).floor();
        if col < 0.0 || row < 0.0 || col >= self.width as f32 || row >= self.height as f32 {
            return None;
        }
        Some((col as u16, row as u16))
    }

    fn index(&self, col: u16, row: u16) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// Put a character at a viewport px position. Off-screen writes are dropped.
    pub fn put(&mut self, x: f32, y: f32, ch: char, fg: Color) {
        if let Some((col, row)) = self.to_cell(x, y) {
            let i = self.index(col, row);
            let bg = self.cells[i].bg;
            self.cells[i] = Cell { ch, fg, bg };
        }
    }

    /// Write `text` left to right starting at a viewport px position.
    pub fn text(&mut self, x: f32, y: f32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            if ch != ' ' {
                self.put(x + i as f32 * CELL_WIDTH_PX, y, ch, fg);
            }
        }
    }

    /// Write `text` centered on `center_x`.
    pub fn text_centered(&mut self, center_x: f32, y: f32, text: &str, fg: Color) {
        let width = text.chars().count() as f32 * CELL_WIDTH_PX;
        self.text(center_x - width / 2.0, y, text, fg);
    }

    /// Paint the background of a whole cell row.
    pub fn fill_row(&mut self, y: f32, bg: Color) {
        if let Some((_, row)) = self.to_cell(0.0, y) {
            for col in 0..self.width {
                let i = self.index(col, row);
                self.cells[i].bg = Some(bg);
            }
        }
    }

    pub fn char_at(&self, col: u16, row: u16) -> Option<char> {
        (col < self.width && row < self.height).then(|| self.cells[self.index(col, row)].ch)
    }

    pub fn fg_at(&self, col: u16, row: u16) -> Option<Color> {
        (col < self.width && row < self.height).then(|| self.cells[self.index(col, row)].fg)
    }

    /// Convert to styled lines, one per row.
    pub fn into_lines(self) -> Vec<Line<'static>> {
        let page_bg = Color::Rgb(BACKGROUND.0, BACKGROUND.1, BACKGROUND.2);
        self.cells
            .chunks(self.width.max(1) as usize)
            .take(self.height as usize)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| {
                        Span::styled(
                            cell.ch.to_string(),
                            Style::default().fg(cell.fg).bg(cell.bg.unwrap_or(page_bg)),
                        )
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}
