//! Board rendering for the SOS GUI

use std::collections::HashMap;

use egui::{Align2, CornerRadius, FontId, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::{Board, Letter, Line, Pos, Side};

use super::theme::*;

/// What the board view needs from the session for one frame
pub struct BoardFrame<'a> {
    pub board: &'a Board,
    pub lines: &'a [Line],
    pub placed_by: &'a HashMap<Pos, Side>,
    pub last_move: Option<Pos>,
    /// Letter previewed under the pointer; `None` disables input
    pub preview: Option<(Letter, Side)>,
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
    size: usize,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 60.0,
            board_rect: Rect::NOTHING,
            size: 1,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked cell, if any
    pub fn show(&mut self, ui: &mut egui::Ui, frame: &BoardFrame<'_>) -> Option<Pos> {
        self.size = frame.board.size();
        let available_size = ui.available_size();

        // Calculate board size to fit available space
        let board_px = (available_size.x.min(available_size.y) - 20.0).clamp(120.0, MAX_BOARD_PX);
        self.cell_size = (board_px - 2.0 * BOARD_MARGIN) / self.size as f32;

        let (response, painter) = ui.allocate_painter(Vec2::splat(board_px), Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);

        let hovered = response
            .hover_pos()
            .and_then(|p| self.screen_to_board(p))
            .filter(|_| frame.preview.is_some());

        self.draw_cells(&painter, frame, hovered);
        self.draw_letters(&painter, frame);
        self.draw_lines(&painter, frame.lines);

        if let (Some(pos), Some((letter, side))) = (hovered, frame.preview) {
            if frame.board.is_empty(pos) {
                self.draw_preview(&painter, pos, letter, side);
            }
        }

        match hovered {
            Some(pos) if response.clicked() && frame.board.is_empty(pos) => Some(pos),
            _ => None,
        }
    }

    /// Draw cell backgrounds, highlighting the hovered and last-played cells
    fn draw_cells(&self, painter: &Painter, frame: &BoardFrame<'_>, hovered: Option<Pos>) {
        for row in 0..self.size {
            for col in 0..self.size {
                let pos = Pos::new(row, col);
                let fill = match hovered {
                    Some(h) if h == pos && frame.board.is_empty(pos) => CELL_HOVER,
                    Some(h) if h == pos => CELL_INVALID,
                    _ => CELL_BG,
                };
                let rect = self.cell_rect(pos);
                painter.rect_filled(rect, CornerRadius::same(3), fill);

                if frame.last_move == Some(pos) {
                    let marker = Rect::from_min_size(rect.min, Vec2::new(rect.width(), 4.0));
                    painter.rect_filled(marker, CornerRadius::same(2), LAST_MOVE_MARKER);
                }
            }
        }
    }

    /// Draw placed letters in the colour of the side that played them
    fn draw_letters(&self, painter: &Painter, frame: &BoardFrame<'_>) {
        let font = FontId::proportional(self.cell_size * LETTER_SIZE_RATIO);
        for row in 0..self.size {
            for col in 0..self.size {
                let pos = Pos::new(row, col);
                let Some(letter) = frame.board.get(pos).letter() else {
                    continue;
                };
                let color = frame
                    .placed_by
                    .get(&pos)
                    .map_or(TEXT_MUTED, |&side| side_color(side));
                painter.text(
                    self.board_to_screen(pos),
                    Align2::CENTER_CENTER,
                    letter.as_char(),
                    font.clone(),
                    color,
                );
            }
        }
    }

    /// Draw every recorded line from endpoint to endpoint
    fn draw_lines(&self, painter: &Painter, lines: &[Line]) {
        for line in lines {
            let stroke = Stroke::new(LINE_WIDTH, side_color(line.owner).gamma_multiply(0.8));
            painter.line_segment(
                [self.board_to_screen(line.start), self.board_to_screen(line.end)],
                stroke,
            );
        }
    }

    /// Draw hover preview
    fn draw_preview(&self, painter: &Painter, pos: Pos, letter: Letter, side: Side) {
        painter.text(
            self.board_to_screen(pos),
            Align2::CENTER_CENTER,
            letter.as_char(),
            FontId::proportional(self.cell_size * LETTER_SIZE_RATIO),
            side_color(side).gamma_multiply(0.35),
        );
    }

    fn cell_rect(&self, pos: Pos) -> Rect {
        let min = self.board_rect.min
            + Vec2::new(
                BOARD_MARGIN + pos.col as f32 * self.cell_size + CELL_GAP / 2.0,
                BOARD_MARGIN + pos.row as f32 * self.cell_size + CELL_GAP / 2.0,
            );
        Rect::from_min_size(min, Vec2::splat(self.cell_size - CELL_GAP))
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min - Vec2::splat(BOARD_MARGIN);
        if relative.x < 0.0 || relative.y < 0.0 {
            return None;
        }
        let col = (relative.x / self.cell_size).floor() as usize;
        let row = (relative.y / self.cell_size).floor() as usize;

        (row < self.size && col < self.size).then(|| Pos::new(row, col))
    }

    /// Convert board position to the screen coordinates of the cell center
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        let x = self.board_rect.min.x + BOARD_MARGIN + (pos.col as f32 + 0.5) * self.cell_size;
        let y = self.board_rect.min.y + BOARD_MARGIN + (pos.row as f32 + 0.5) * self.cell_size;
        Pos2::new(x, y)
    }
}
