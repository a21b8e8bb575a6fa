/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

use glam::Vec3;

use crate::domain::tween::PopSettings;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub feedback: FeedbackConfig,
    pub frame_ms: u64,
    pub seed: Option<u64>,
    pub log: LogConfig,
    pub gamepad: GamepadConfig,
}

#[derive(Clone, Debug)]
pub struct FeedbackConfig {
    /// true: play the named clip on the animator. false: code-driven pop.
    pub use_animator: bool,
    pub anim_state_name: String,
    pub pop: PopSettings,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub file: PathBuf,
    pub level: log::LevelFilter,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub rock: Vec<String>,
    pub paper: Vec<String>,
    pub scissors: Vec<String>,
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
    pub help: Vec<String>,
    pub reset: Vec<String>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    feedback: TomlFeedback,
    #[serde(default)]
    timing: TomlTiming,
    #[serde(default)]
    session: TomlSession,
    #[serde(default)]
    log: TomlLog,
    #[serde(default)]
    gamepad: TomlGamepad,
}

#[derive(Deserialize, Debug)]
struct TomlFeedback {
    #[serde(default = "default_use_animator")]
    use_animator: bool,
    #[serde(default = "default_anim_state")]
    anim_state_name: String,
    #[serde(default = "default_pop_duration")]
    pop_duration: f32,
    #[serde(default = "default_pop_start")]
    pop_start_scale: [f32; 3],
    #[serde(default = "default_pop_peak")]
    pop_peak_scale: [f32; 3],
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_frame_ms")]
    frame_ms: u64,
}

#[derive(Deserialize, Debug, Default)]
struct TomlSession {
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default = "default_log_file")]
    file: String,
    #[serde(default = "default_log_level")]
    level: String,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_rock")]
    rock: Vec<String>,
    #[serde(default = "default_paper")]
    paper: Vec<String>,
    #[serde(default = "default_scissors")]
    scissors: Vec<String>,
    #[serde(default = "default_confirm")]
    confirm: Vec<String>,
    #[serde(default = "default_cancel")]
    cancel: Vec<String>,
    #[serde(default = "default_help")]
    help: Vec<String>,
    #[serde(default = "default_reset")]
    reset: Vec<String>,
}

// ── Defaults ──

fn default_use_animator() -> bool { true }
fn default_anim_state() -> String { "TxtResult_Pop".into() }
fn default_pop_duration() -> f32 { 0.35 }
fn default_pop_start() -> [f32; 3] { [0.5, 0.5, 1.0] }
fn default_pop_peak() -> [f32; 3] { [1.25, 1.25, 1.0] }
fn default_frame_ms() -> u64 { 16 }  // ~60 fps
fn default_log_file() -> String { "rockpaper.log".into() }
fn default_log_level() -> String { "info".into() }

fn default_rock() -> Vec<String> { vec!["X".into()] }
fn default_paper() -> Vec<String> { vec!["Y".into()] }
fn default_scissors() -> Vec<String> { vec!["B".into()] }
fn default_confirm() -> Vec<String> { vec!["A".into(), "Start".into()] }
fn default_cancel() -> Vec<String> { vec!["Select".into()] }
fn default_help() -> Vec<String> { vec!["L1".into()] }
fn default_reset() -> Vec<String> { vec!["R1".into()] }

impl Default for TomlFeedback {
    fn default() -> Self {
        TomlFeedback {
            use_animator: default_use_animator(),
            anim_state_name: default_anim_state(),
            pop_duration: default_pop_duration(),
            pop_start_scale: default_pop_start(),
            pop_peak_scale: default_pop_peak(),
        }
    }
}

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming { frame_ms: default_frame_ms() }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog {
            file: default_log_file(),
            level: default_log_level(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            rock: default_rock(),
            paper: default_paper(),
            scissors: default_scissors(),
            confirm: default_confirm(),
            cancel: default_cancel(),
            help: default_help(),
            reset: default_reset(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default())
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        GameConfig::from_toml(load_toml(&search_dirs))
    }

    /// Parse a config document. Missing keys take their defaults.
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(GameConfig::from_toml)
    }

    fn from_toml(cfg: TomlConfig) -> Self {
        let level = cfg.log.level.parse::<log::LevelFilter>().unwrap_or_else(|_| {
            eprintln!("Warning: unknown log level {:?}, using info", cfg.log.level);
            log::LevelFilter::Info
        });

        GameConfig {
            feedback: FeedbackConfig {
                use_animator: cfg.feedback.use_animator,
                anim_state_name: cfg.feedback.anim_state_name,
                pop: PopSettings {
                    duration: finite_or("pop_duration", cfg.feedback.pop_duration, default_pop_duration()),
                    start_scale: scale_or("pop_start_scale", cfg.feedback.pop_start_scale, default_pop_start()),
                    peak_scale: scale_or("pop_peak_scale", cfg.feedback.pop_peak_scale, default_pop_peak()),
                },
            },
            frame_ms: cfg.timing.frame_ms.max(1),
            seed: cfg.session.seed,
            log: LogConfig {
                file: PathBuf::from(cfg.log.file),
                level,
            },
            gamepad: GamepadConfig {
                rock: cfg.gamepad.rock,
                paper: cfg.gamepad.paper,
                scissors: cfg.gamepad.scissors,
                confirm: cfg.gamepad.confirm,
                cancel: cfg.gamepad.cancel,
                help: cfg.gamepad.help,
                reset: cfg.gamepad.reset,
            },
        }
    }
}

/// Largest scale a pop may reach; the result line is a single terminal row.
const MAX_POP_SCALE: f32 = 4.0;

fn finite_or(key: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        eprintln!("Warning: {} = {} is not a finite number, using {}", key, value, fallback);
        fallback
    }
}

fn scale_or(key: &str, value: [f32; 3], fallback: [f32; 3]) -> Vec3 {
    let v = Vec3::from(value);
    if v.is_finite() && v.max_element() <= MAX_POP_SCALE && v.min_element() >= 0.0 {
        v
    } else {
        eprintln!("Warning: {} = {:?} is outside 0..={}, using {:?}", key, value, MAX_POP_SCALE, fallback);
        Vec3::from(fallback)
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}
