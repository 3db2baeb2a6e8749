//! Theme constants for the SOS GUI

use egui::Color32;

use crate::Side;

// Board colors
pub const BOARD_BG: Color32 = Color32::from_rgb(200, 200, 200);
pub const CELL_BG: Color32 = Color32::from_rgb(250, 250, 252);
pub const CELL_HOVER: Color32 = Color32::from_rgb(225, 235, 250);
pub const CELL_INVALID: Color32 = Color32::from_rgb(245, 215, 215);
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(255, 200, 60);

// Side colors
pub const BLUE_SIDE: Color32 = Color32::from_rgb(0, 100, 255);
pub const RED_SIDE: Color32 = Color32::from_rgb(230, 30, 30);

/// Letter and line color of a side
pub fn side_color(side: Side) -> Color32 {
    match side {
        Side::Blue => BLUE_SIDE,
        Side::Red => RED_SIDE,
    }
}

// Panel colors - dark modern theme
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const GAME_OVER_BG: Color32 = Color32::from_rgb(45, 80, 55);
pub const MESSAGE_BG: Color32 = Color32::from_rgb(80, 60, 30);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Status colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);

// Sizes
pub const BOARD_MARGIN: f32 = 12.0;
pub const CELL_GAP: f32 = 3.0;
pub const LINE_WIDTH: f32 = 4.0;
pub const LETTER_SIZE_RATIO: f32 = 0.55;
pub const MAX_BOARD_PX: f32 = 560.0;
