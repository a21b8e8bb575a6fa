/// WorldState: everything the frame loop and renderer need.
///
/// Owns the navigator (scene + help panel), the round engine with its
/// scores, the result board, and the feedback animators. UI actions go
/// through the methods here and come back as `GameEvent`s.

use glam::Vec3;

use crate::config::{FeedbackConfig, GameConfig};
use crate::sim::board::ResultBoard;
use crate::sim::event::GameEvent;
use crate::sim::feedback::Feedback;
use crate::sim::menu::{MenuNavigator, Scene};
use crate::sim::round::{RoundEngine, RoundReport};

/// Main menu entries, top to bottom.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MenuItem {
    StartGame,
    HowToPlay,
    Quit,
}

pub const MENU_ITEMS: [MenuItem; 3] = [MenuItem::StartGame, MenuItem::HowToPlay, MenuItem::Quit];

impl MenuItem {
    pub fn label(self) -> &'static str {
        match self {
            MenuItem::StartGame => "Start Game",
            MenuItem::HowToPlay => "How To Play",
            MenuItem::Quit => "Quit",
        }
    }
}

/// Frames a status message stays on screen.
pub const MESSAGE_FRAMES: u32 = 90;

/// On-screen choice buttons. Names carry the move number the round engine parses.
pub const CHOICE_BUTTONS: [&str; 3] = ["btn1_rock", "btn2_paper", "btn3_scissors"];

pub struct WorldState {
    pub nav: MenuNavigator,
    pub engine: RoundEngine,
    pub board: ResultBoard,
    pub feedback: Feedback,
    feedback_cfg: FeedbackConfig,

    pub menu_cursor: usize,
    pub last_round: Option<RoundReport>,

    // ── UI ──
    pub message: String,
    pub message_timer: u32,
    pub anim_tick: u32,
}

// ── Construction ──

impl WorldState {
    pub fn new(config: &GameConfig) -> Self {
        let engine = RoundEngine::new(config.seed);
        let mut board = ResultBoard::bound();
        engine.start(&mut board);
        WorldState {
            nav: MenuNavigator::new(),
            engine,
            board,
            feedback: Feedback::from_config(&config.feedback),
            feedback_cfg: config.feedback.clone(),
            menu_cursor: 0,
            last_round: None,
            message: String::new(),
            message_timer: 0,
            anim_tick: 0,
        }
    }

    pub fn scene(&self) -> Scene {
        self.nav.scene()
    }

    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }

    /// Status line updates for events produced this frame.
    pub fn note_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::RoundPlayed { player, computer, .. } => {
                    let msg = format!("{} vs {}", player.name(), computer.name());
                    self.set_message(&msg, MESSAGE_FRAMES);
                }
                GameEvent::MoveRejected { button } => {
                    self.set_message(&format!("No such choice: {}", button), MESSAGE_FRAMES);
                }
                GameEvent::SceneLoaded(Scene::MainMenu) => {
                    self.message.clear();
                    self.message_timer = 0;
                }
                _ => {}
            }
        }
    }
}

// ── Scene / panel actions ──

impl WorldState {
    /// Enter the game scene with a fresh session.
    pub fn start_game(&mut self) -> Vec<GameEvent> {
        let mut events = vec![];
        if let Some(scene) = self.nav.start_game() {
            self.engine.reset(&mut self.board);
            self.feedback = Feedback::from_config(&self.feedback_cfg);
            self.board.set_result_scale(Vec3::ONE);
            self.last_round = None;
            self.message.clear();
            self.message_timer = 0;
            events.push(GameEvent::SceneLoaded(scene));
        }
        events
    }

    pub fn back_to_menu(&mut self) -> Vec<GameEvent> {
        let mut events = vec![];
        if let Some(scene) = self.nav.back_to_menu() {
            self.menu_cursor = 0;
            events.push(GameEvent::SceneLoaded(scene));
        }
        events
    }

    pub fn show_help(&mut self) -> Vec<GameEvent> {
        if self.nav.help_visible() {
            return vec![];
        }
        self.nav.show_help();
        vec![GameEvent::HelpShown]
    }

    pub fn toggle_help(&mut self) -> Vec<GameEvent> {
        self.nav.toggle_help();
        if self.nav.help_visible() {
            vec![GameEvent::HelpShown]
        } else {
            vec![GameEvent::HelpClosed]
        }
    }

    pub fn close_help(&mut self) -> Vec<GameEvent> {
        if self.nav.help_visible() {
            self.nav.close_help();
            vec![GameEvent::HelpClosed]
        } else {
            vec![]
        }
    }

    pub fn menu_up(&mut self) {
        self.menu_cursor = self.menu_cursor.saturating_sub(1);
    }

    pub fn menu_down(&mut self) {
        if self.menu_cursor + 1 < MENU_ITEMS.len() {
            self.menu_cursor += 1;
        }
    }

    pub fn selected_item(&self) -> MenuItem {
        MENU_ITEMS[self.menu_cursor.min(MENU_ITEMS.len() - 1)]
    }
}

// ── Game actions ──

impl WorldState {
    /// Press a named button in the game scene.
    pub fn press_button(&mut self, name: &str) -> Vec<GameEvent> {
        if self.scene() != Scene::Game {
            return vec![];
        }
        match self.engine.on_button(Some(name), &mut self.board) {
            Some(report) => {
                self.feedback.trigger(&mut self.board);
                self.last_round = Some(report);
                vec![GameEvent::RoundPlayed {
                    player: report.player,
                    computer: report.computer,
                    outcome: report.outcome,
                }]
            }
            None => vec![GameEvent::MoveRejected { button: name.to_string() }],
        }
    }

    pub fn reset_scores(&mut self) -> Vec<GameEvent> {
        if self.scene() != Scene::Game {
            return vec![];
        }
        self.engine.reset(&mut self.board);
        self.last_round = None;
        vec![GameEvent::ScoresReset]
    }

    /// Advance animations and timers by one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.anim_tick = self.anim_tick.wrapping_add(1);
        self.feedback.tick(dt, &mut self.board);
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::board::PROMPT_TEXT;

    fn world() -> WorldState {
        let mut cfg = GameConfig::default();
        cfg.seed = Some(5);
        WorldState::new(&cfg)
    }

    #[test]
    fn buttons_ignored_on_menu() {
        let mut w = world();
        assert!(w.press_button(CHOICE_BUTTONS[0]).is_empty());
        assert_eq!(w.engine.score().rounds(), 0);
    }

    #[test]
    fn round_in_game_scene() {
        let mut w = world();
        w.start_game();
        let events = w.press_button(CHOICE_BUTTONS[1]);
        assert!(matches!(events.as_slice(), [GameEvent::RoundPlayed { .. }]));
        assert!(w.last_round.is_some());
        assert!(w.feedback.is_animating());
        assert_eq!(w.engine.score().rounds(), 1);
    }

    #[test]
    fn rejected_button_reports_and_keeps_state() {
        let mut w = world();
        w.start_game();
        let before = w.board.clone();
        let events = w.press_button("btn7");
        assert_eq!(events, vec![GameEvent::MoveRejected { button: "btn7".into() }]);
        assert_eq!(w.board, before);
    }

    #[test]
    fn status_line_names_both_moves() {
        let mut w = world();
        w.start_game();
        let events = w.press_button(CHOICE_BUTTONS[1]);
        w.note_events(&events);
        let computer = w.last_round.map(|r| r.computer.name()).unwrap_or_default();
        assert_eq!(w.message, format!("Paper vs {}", computer));
        assert_eq!(w.message_timer, MESSAGE_FRAMES);

        let events = w.press_button("btn9");
        w.note_events(&events);
        assert_eq!(w.message, "No such choice: btn9");

        let events = w.back_to_menu();
        w.note_events(&events);
        assert!(w.message.is_empty());
    }

    #[test]
    fn entering_game_starts_fresh_session() {
        let mut w = world();
        w.start_game();
        for _ in 0..5 {
            w.press_button(CHOICE_BUTTONS[2]);
        }
        w.back_to_menu();
        w.start_game();
        assert_eq!(w.engine.score().rounds(), 0);
        assert_eq!(w.board.result_text(), Some(PROMPT_TEXT));
        assert!(w.last_round.is_none());
    }

    #[test]
    fn reset_clears_last_round() {
        let mut w = world();
        w.start_game();
        w.press_button(CHOICE_BUTTONS[0]);
        assert_eq!(w.reset_scores(), vec![GameEvent::ScoresReset]);
        assert!(w.last_round.is_none());
        assert_eq!(w.board.result_text(), Some(PROMPT_TEXT));
    }

    #[test]
    fn feedback_settles_after_ticks() {
        let mut w = world();
        w.start_game();
        w.press_button(CHOICE_BUTTONS[0]);
        for _ in 0..120 {
            w.tick(1.0 / 60.0);
        }
        assert!(!w.feedback.is_animating());
        assert_eq!(w.board.result_scale(), Some(Vec3::ONE));
    }

    #[test]
    fn menu_cursor_is_clamped() {
        let mut w = world();
        w.menu_up();
        assert_eq!(w.selected_item(), MenuItem::StartGame);
        for _ in 0..5 {
            w.menu_down();
        }
        assert_eq!(w.selected_item(), MenuItem::Quit);
    }

    #[test]
    fn help_toggle_events() {
        let mut w = world();
        assert_eq!(w.toggle_help(), vec![GameEvent::HelpShown]);
        assert_eq!(w.close_help(), vec![GameEvent::HelpClosed]);
        assert!(w.close_help().is_empty());
    }

    #[test]
    fn message_expires() {
        let mut w = world();
        w.set_message("hi", 2);
        w.tick(0.016);
        assert_eq!(w.message, "hi");
        w.tick(0.016);
        assert!(w.message.is_empty());
    }
}
