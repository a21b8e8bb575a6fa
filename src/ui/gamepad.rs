/// Gamepad input tracker using gilrs.
///
/// Button mapping is loaded from config.toml via `load_button_config()`.
/// Default mapping:
///   D-pad / Left Stick  →  Menu cursor
///   X / Y / B           →  Rock / Paper / Scissors
///   A / Start           →  Confirm
///   Select              →  Back / Quit
///   L1                  →  Help panel
///   R1                  →  Reset scores

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;

#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
const STICK_DEADZONE: f32 = 0.5;

/// Logical button identifiers (one per physical button).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,       // South
    B,       // East
    X,       // West
    Y,       // North
    L1,
    R1,
    Start,
    Select,
}

const BTN_COUNT: usize = 8;

impl Btn {
    fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH" => Some(Btn::A),
            "B" | "EAST" => Some(Btn::B),
            "X" | "WEST" => Some(Btn::X),
            "Y" | "NORTH" => Some(Btn::Y),
            "L1" | "LB" | "LEFTTRIGGER" => Some(Btn::L1),
            "R1" | "RB" | "RIGHTTRIGGER" => Some(Btn::R1),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South => Some(Btn::A),
            Button::East => Some(Btn::B),
            Button::West => Some(Btn::X),
            Button::North => Some(Btn::Y),
            Button::LeftTrigger => Some(Btn::L1),
            Button::RightTrigger => Some(Btn::R1),
            Button::Start => Some(Btn::Start),
            Button::Select => Some(Btn::Select),
            _ => None,
        }
    }
}

/// Action-to-button mapping (loaded from config).
struct ActionMap {
    rock: Vec<Btn>,
    paper: Vec<Btn>,
    scissors: Vec<Btn>,
    confirm: Vec<Btn>,
    cancel: Vec<Btn>,
    help: Vec<Btn>,
    reset: Vec<Btn>,
}

impl Default for ActionMap {
    fn default() -> Self {
        ActionMap {
            rock: vec![Btn::X],
            paper: vec![Btn::Y],
            scissors: vec![Btn::B],
            confirm: vec![Btn::A, Btn::Start],
            cancel: vec![Btn::Select],
            help: vec![Btn::L1],
            reset: vec![Btn::R1],
        }
    }
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    /// Edge flags for this frame, indexed by `Btn`.
    pressed: [bool; BTN_COUNT],
    up_pressed: bool,
    down_pressed: bool,

    // Stick latch: a push only counts again after returning to center.
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    stick_y: f32,
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    stick_latched: bool,

    action_map: ActionMap,

    #[allow(dead_code)]
    pub connected: bool,
}

impl GamepadState {
    pub fn new() -> Self {
        #[cfg(feature = "gamepad")]
        let (gilrs_opt, connected) = match Gilrs::new() {
            Ok(g) => {
                let has_pad = g.gamepads().next().is_some();
                (Some(g), has_pad)
            }
            Err(_) => (None, false),
        };
        #[cfg(not(feature = "gamepad"))]
        let connected = false;

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs: gilrs_opt,
            pressed: [false; BTN_COUNT],
            up_pressed: false,
            down_pressed: false,
            stick_y: 0.0,
            stick_latched: false,
            action_map: ActionMap::default(),
            connected,
        }
    }

    /// Load button mapping from config. Lists with no recognizable names
    /// keep the default binding.
    pub fn load_button_config(&mut self, cfg: &GamepadConfig) {
        fn apply(names: &[String], slot: &mut Vec<Btn>) {
            let parsed: Vec<Btn> = names.iter().filter_map(|s| Btn::from_name(s)).collect();
            if !parsed.is_empty() {
                *slot = parsed;
            }
        }
        let map = &mut self.action_map;
        apply(&cfg.rock, &mut map.rock);
        apply(&cfg.paper, &mut map.paper);
        apply(&cfg.scissors, &mut map.scissors);
        apply(&cfg.confirm, &mut map.confirm);
        apply(&cfg.cancel, &mut map.cancel);
        apply(&cfg.help, &mut map.help);
        apply(&cfg.reset, &mut map.reset);
    }

    pub fn update(&mut self) {
        self.pressed = [false; BTN_COUNT];
        self.up_pressed = false;
        self.down_pressed = false;

        #[cfg(feature = "gamepad")]
        self.poll_gilrs();
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self) {
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return,
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(btn, _) => {
                    self.connected = true;
                    match btn {
                        Button::DPadUp => self.up_pressed = true,
                        Button::DPadDown => self.down_pressed = true,
                        other => {
                            if let Some(b) = Btn::from_gilrs(other) {
                                self.pressed[b as usize] = true;
                            }
                        }
                    }
                }
                EventType::AxisChanged(Axis::LeftStickY, value, _) => {
                    self.connected = true;
                    self.stick_y = value;
                }
                EventType::Connected => self.connected = true,
                EventType::Disconnected => {
                    self.connected = false;
                    self.stick_y = 0.0;
                    self.stick_latched = false;
                }
                _ => {}
            }
        }

        if self.stick_y.abs() < STICK_DEADZONE {
            self.stick_latched = false;
        } else if !self.stick_latched {
            self.stick_latched = true;
            if self.stick_y > 0.0 {
                self.up_pressed = true;
            } else {
                self.down_pressed = true;
            }
        }
    }

    // ── Action queries (config-driven) ──

    fn any_pressed(&self, btns: &[Btn]) -> bool {
        btns.iter().any(|&b| self.pressed[b as usize])
    }

    /// Choice button pressed this frame, as an index into the choice row.
    pub fn choice_pressed(&self) -> Option<usize> {
        let map = &self.action_map;
        [&map.rock, &map.paper, &map.scissors]
            .iter()
            .position(|btns| self.any_pressed(btns))
    }

    pub fn confirm_pressed(&self) -> bool {
        self.any_pressed(&self.action_map.confirm)
    }
    pub fn cancel_pressed(&self) -> bool {
        self.any_pressed(&self.action_map.cancel)
    }
    pub fn help_pressed(&self) -> bool {
        self.any_pressed(&self.action_map.help)
    }
    pub fn reset_pressed(&self) -> bool {
        self.any_pressed(&self.action_map.reset)
    }
    pub fn up_pressed(&self) -> bool {
        self.up_pressed
    }
    pub fn down_pressed(&self) -> bool {
        self.down_pressed
    }
}
