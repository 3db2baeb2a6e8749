//! Main application for the SOS GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel};
use tracing::{info, warn};

use crate::{GameConfig, Letter, PlayerKind, Side, Variant, BOARD_SIZES};

use super::board_view::{BoardFrame, BoardView};
use super::game_state::Session;
use super::theme::*;

/// Which screen is showing
enum Screen {
    Setup,
    Playing(Session),
}

/// Main SOS application
pub struct SosApp {
    /// Settings edited on the setup screen, kept between games
    config: GameConfig,
    screen: Screen,
    board_view: BoardView,
    setup_error: Option<String>,
}

impl SosApp {
    /// Create the app on the setup screen, pre-filled with `config`
    pub fn new(_cc: &eframe::CreationContext<'_>, config: GameConfig) -> Self {
        Self {
            config,
            screen: Screen::Setup,
            board_view: BoardView::default(),
            setup_error: None,
        }
    }

    fn start_game(&mut self) {
        match Session::new(self.config) {
            Ok(session) => {
                info!(config = ?self.config, "starting game");
                self.setup_error = None;
                self.screen = Screen::Playing(session);
            }
            Err(err) => {
                warn!(%err, "cannot start game");
                self.setup_error = Some(err.to_string());
            }
        }
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    // =========================================================================
    // Setup screen
    // =========================================================================

    fn render_setup(&mut self, ctx: &Context) {
        let mut start = false;
        CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(RichText::new("SOS Game").size(28.0).strong());
                ui.add_space(24.0);

                Self::card_frame().show(ui, |ui| {
                    ui.set_max_width(320.0);
                    egui::Grid::new("setup_grid")
                        .num_columns(2)
                        .spacing([16.0, 12.0])
                        .show(ui, |ui| {
                            ui.label(RichText::new("Board size").strong().color(TEXT_PRIMARY));
                            egui::ComboBox::from_id_salt("board_size")
                                .selected_text(format!("{0}x{0}", self.config.board_size))
                                .show_ui(ui, |ui| {
                                    for size in BOARD_SIZES {
                                        ui.selectable_value(
                                            &mut self.config.board_size,
                                            size,
                                            format!("{size}x{size}"),
                                        );
                                    }
                                });
                            ui.end_row();

                            ui.label(RichText::new("Game mode").strong().color(TEXT_PRIMARY));
                            ui.horizontal(|ui| {
                                for variant in [Variant::Simple, Variant::General] {
                                    ui.radio_value(&mut self.config.variant, variant, variant.to_string());
                                }
                            });
                            ui.end_row();

                            for side in Side::ALL {
                                ui.label(
                                    RichText::new(format!("{side} player"))
                                        .strong()
                                        .color(side_color(side)),
                                );
                                let kind = match side {
                                    Side::Blue => &mut self.config.blue,
                                    Side::Red => &mut self.config.red,
                                };
                                ui.horizontal(|ui| {
                                    for option in [PlayerKind::Human, PlayerKind::Computer] {
                                        ui.radio_value(kind, option, option.to_string());
                                    }
                                });
                                ui.end_row();
                            }
                        });
                });

                ui.add_space(20.0);
                if ui.button(RichText::new("Start Game").size(16.0).strong()).clicked() {
                    start = true;
                }
                if let Some(err) = &self.setup_error {
                    ui.add_space(8.0);
                    ui.label(RichText::new(err).color(TIMER_WARNING));
                }
            });
        });

        if start {
            self.start_game();
        }
    }

    // =========================================================================
    // Game screen
    // =========================================================================

    /// Render the top menu bar. Returns true when a new game was requested.
    fn render_menu_bar(ctx: &Context, session: &Session) -> bool {
        let mut new_game = false;
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (N)").clicked() {
                        new_game = true;
                        ui.close_menu();
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let size = session.game.size();
                    ui.label(format!("{} - {size}x{size}", session.game.variant()));
                });
            });
        });
        new_game
    }

    /// Render the status bar. Returns true when a new game was requested.
    fn render_status_bar(ctx: &Context, session: &Session) -> bool {
        let mut new_game = false;
        TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let text = if session.game.is_over() {
                    "Game Over".to_string()
                } else {
                    session.turn_text()
                };
                ui.label(RichText::new(text).size(14.0).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("New Game").clicked() {
                        new_game = true;
                    }
                });
            });
            ui.add_space(6.0);
        });
        new_game
    }

    /// Render one side's panel: letter selection, score and status
    fn render_side_panel(ctx: &Context, session: &mut Session, side: Side) {
        let panel = match side {
            Side::Blue => SidePanel::left("blue_panel"),
            Side::Red => SidePanel::right("red_panel"),
        };
        panel
            .exact_width(170.0)
            .frame(Frame::new().fill(PANEL_BG).inner_margin(10.0))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                Self::render_player_card(ui, session, side);

                if side == Side::Red {
                    if let Some(text) = session.game_over_text() {
                        ui.add_space(10.0);
                        Self::render_game_over_card(ui, &text);
                    }
                    if let Some(msg) = &session.message {
                        ui.add_space(10.0);
                        Self::render_message_card(ui, msg);
                    }
                }
            });
    }

    fn render_player_card(ui: &mut egui::Ui, session: &mut Session, side: Side) {
        let to_move = session.game.current_side() == side && !session.game.is_over();
        let kind = session.game.player(side).kind();

        Self::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(format!("{side} player")).size(16.0).strong().color(side_color(side)));
            ui.label(RichText::new(kind.to_string()).size(11.0).color(TEXT_MUTED));
            ui.add_space(10.0);

            if kind.is_human() {
                for letter in Letter::ALL {
                    let checked = to_move && session.selected_letter == Some(letter);
                    let button = egui::RadioButton::new(
                        checked,
                        RichText::new(letter.to_string()).size(14.0).strong().color(side_color(side)),
                    );
                    if ui.add(button).clicked() {
                        session.select_letter(side, letter);
                    }
                }
                ui.add_space(8.0);
            }

            if session.shows_score() {
                ui.label(
                    RichText::new(format!("Score: {}", session.game.score(side)))
                        .size(13.0)
                        .color(TEXT_PRIMARY),
                );
            }

            if to_move {
                ui.add_space(6.0);
                let (text, color) = match session.ai_thinking_elapsed() {
                    Some(elapsed) => (format!("Thinking... {:.1}s", elapsed.as_secs_f32()), TIMER_WARNING),
                    None => ("Your turn".to_string(), TIMER_NORMAL),
                };
                ui.label(RichText::new(text).size(12.0).color(color));
            } else if kind.is_computer() {
                if let Some(t) = session.last_ai_time {
                    ui.label(
                        RichText::new(format!("Last move: {:.2}s", t.as_secs_f32()))
                            .size(10.0)
                            .color(TEXT_SECONDARY),
                    );
                }
            }
        });
    }

    /// Render game over card
    fn render_game_over_card(ui: &mut egui::Ui, text: &str) {
        Frame::new()
            .fill(GAME_OVER_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(WIN_HIGHLIGHT));
                    ui.add_space(6.0);
                    ui.label(RichText::new(text).size(13.0).strong().color(TEXT_PRIMARY));
                });
            });
    }

    /// Render status message card
    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(MESSAGE_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    /// Render the main board
    fn render_board(ctx: &Context, session: &mut Session, board_view: &mut BoardView) {
        CentralPanel::default().show(ctx, |ui| {
            let preview = if session.is_human_turn() && !session.is_ai_thinking() {
                session
                    .selected_letter
                    .map(|letter| (letter, session.game.current_side()))
            } else {
                None
            };

            let clicked = ui
                .vertical_centered(|ui| {
                    board_view.show(
                        ui,
                        &BoardFrame {
                            board: session.game.board(),
                            lines: session.game.lines(),
                            placed_by: &session.placed_by,
                            last_move: session.last_move,
                            preview,
                        },
                    )
                })
                .inner;

            if let Some(pos) = clicked {
                if let Err(msg) = session.try_place(pos) {
                    session.message = Some(msg);
                }
            } else if ui.input(|i| i.pointer.primary_clicked())
                && session.is_human_turn()
                && session.selected_letter.is_none()
                && ui.rect_contains_pointer(ui.min_rect())
            {
                session.message = Some("Please select a letter first (S or O)".to_string());
            }
        });
    }

    /// Handle keyboard shortcuts. Returns true when a new game was requested.
    fn handle_input(ctx: &Context, session: &mut Session) -> bool {
        ctx.input(|i| {
            let side = session.game.current_side();
            if i.key_pressed(egui::Key::S) {
                session.select_letter(side, Letter::S);
            }
            if i.key_pressed(egui::Key::O) {
                session.select_letter(side, Letter::O);
            }
            i.key_pressed(egui::Key::N)
        })
    }
}

impl eframe::App for SosApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let Screen::Playing(session) = &mut self.screen else {
            self.render_setup(ctx);
            return;
        };

        let mut new_game = Self::handle_input(ctx, session);

        // Check AI result
        session.check_ai_result();

        // Start AI thinking if needed
        if session.is_ai_turn() && !session.is_ai_thinking() {
            session.start_ai_thinking();
        }

        // Render UI
        new_game |= Self::render_menu_bar(ctx, session);
        new_game |= Self::render_status_bar(ctx, session);
        Self::render_side_panel(ctx, session, Side::Blue);
        Self::render_side_panel(ctx, session, Side::Red);
        Self::render_board(ctx, session, &mut self.board_view);

        // Keep polling while the AI is thinking
        if session.is_ai_thinking() {
            ctx.request_repaint();
        }

        if new_game {
            self.screen = Screen::Setup;
        }
    }
}
