/// Entry point and frame loop.

mod config;
mod domain;
mod logging;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use log::info;

use config::GameConfig;
use domain::hand::Outcome;
use sim::event::GameEvent;
use sim::menu::Scene;
use sim::world::{MenuItem, WorldState, CHOICE_BUTTONS};
use ui::gamepad::GamepadState;
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

fn main() {
    let config = GameConfig::load();
    logging::init(&config.log);
    info!("starting, feedback via {}", if config.feedback.use_animator { "animator" } else { "tween" });

    let mut world = WorldState::new(&config);
    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = SoundEngine::new();

    let result = game_loop(&mut world, &mut renderer, sound.as_ref(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        log::error!("game loop failed: {e}");
        eprintln!("Game error: {e}");
    }

    let score = world.engine.score();
    println!();
    println!("Thanks for playing Rock Paper Scissors!");
    println!("Final Score: You {} - {} Computer ({} draws)", score.player, score.computer, score.draws);
}

fn game_loop(
    world: &mut WorldState,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);
    let frame = Duration::from_millis(config.frame_ms);
    let mut last_tick = Instant::now();

    loop {
        kb.drain_events();
        gp.update();

        if kb.ctrl_c_pressed() {
            break;
        }

        let mut events = Vec::new();
        let quit = match world.scene() {
            Scene::MainMenu => handle_menu(world, &kb, &gp, &mut events),
            Scene::Game => {
                handle_game(world, &kb, &gp, &mut events);
                false
            }
        };
        process_events(world, sound, &events);
        if quit {
            break;
        }

        let since = last_tick.elapsed();
        if since >= frame {
            world.tick(since.as_secs_f32());
            last_tick = Instant::now();
        }

        renderer.render(world)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

// ── Key Constants ──

const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_CONFIRM: &[KeyCode] = &[KeyCode::Enter, KeyCode::Char(' ')];
const KEYS_HELP: &[KeyCode] = &[KeyCode::Char('h'), KeyCode::Char('H'), KeyCode::F(1)];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Char('q'), KeyCode::Char('Q')];
const KEYS_RESET: &[KeyCode] = &[KeyCode::Char('0'), KeyCode::Backspace];
const KEYS_ROCK: &[KeyCode] = &[KeyCode::Char('r'), KeyCode::Char('R')];
const KEYS_PAPER: &[KeyCode] = &[KeyCode::Char('p'), KeyCode::Char('P')];
const KEYS_SCISSORS: &[KeyCode] = &[KeyCode::Char('s'), KeyCode::Char('S')];

/// Main menu input. Returns true when the player chose to quit.
fn handle_menu(world: &mut WorldState, kb: &InputState, gp: &GamepadState, events: &mut Vec<GameEvent>) -> bool {
    let esc = kb.any_pressed(&[KeyCode::Esc]) || gp.cancel_pressed();

    // Help panel is modal: only close keys respond
    if world.nav.help_visible() {
        if esc || kb.any_pressed(KEYS_HELP) || gp.help_pressed() || kb.any_pressed(KEYS_CONFIRM) {
            events.extend(world.close_help());
        }
        return false;
    }

    if kb.any_pressed(KEYS_UP) || gp.up_pressed() {
        world.menu_up();
    } else if kb.any_pressed(KEYS_DOWN) || gp.down_pressed() {
        world.menu_down();
    } else if kb.any_pressed(KEYS_HELP) || gp.help_pressed() {
        events.extend(world.toggle_help());
    } else if kb.any_pressed(KEYS_CONFIRM) || gp.confirm_pressed() {
        match world.selected_item() {
            MenuItem::StartGame => events.extend(world.start_game()),
            MenuItem::HowToPlay => events.extend(world.show_help()),
            MenuItem::Quit => return true,
        }
    } else if kb.any_pressed(KEYS_QUIT) || esc {
        return true;
    }
    false
}

fn handle_game(world: &mut WorldState, kb: &InputState, gp: &GamepadState, events: &mut Vec<GameEvent>) {
    let esc = kb.any_pressed(&[KeyCode::Esc]) || gp.cancel_pressed();

    if world.nav.help_visible() {
        if esc || kb.any_pressed(KEYS_HELP) || gp.help_pressed() {
            events.extend(world.close_help());
        }
        return;
    }

    if esc {
        events.extend(world.back_to_menu());
        return;
    }
    if kb.any_pressed(KEYS_HELP) || gp.help_pressed() {
        events.extend(world.toggle_help());
        return;
    }
    if kb.any_pressed(KEYS_RESET) || gp.reset_pressed() {
        events.extend(world.reset_scores());
        return;
    }

    // Digit keys press "btn<digit>"; only 1-3 exist, the rest are rejected downstream.
    let digits: Vec<char> = kb.digits().filter(|&c| c != '0').collect();
    if let Some(d) = digits.first() {
        events.extend(world.press_button(&format!("btn{}", d)));
        return;
    }

    let letter = if kb.any_pressed(KEYS_ROCK) {
        Some(0)
    } else if kb.any_pressed(KEYS_PAPER) {
        Some(1)
    } else if kb.any_pressed(KEYS_SCISSORS) {
        Some(2)
    } else {
        None
    };
    if let Some(i) = letter.or_else(|| gp.choice_pressed()) {
        events.extend(world.press_button(CHOICE_BUTTONS[i]));
    }
}

fn process_events(world: &mut WorldState, sound: Option<&SoundEngine>, events: &[GameEvent]) {
    world.note_events(events);

    let sfx = match sound {
        Some(s) => s,
        None => return,
    };
    for event in events {
        match event {
            GameEvent::RoundPlayed { outcome: Outcome::PlayerWin, .. } => sfx.play_win(),
            GameEvent::RoundPlayed { outcome: Outcome::ComputerWin, .. } => sfx.play_lose(),
            GameEvent::RoundPlayed { outcome: Outcome::Draw, .. } => sfx.play_draw(),
            GameEvent::MoveRejected { .. } => sfx.play_reject(),
            GameEvent::ScoresReset => sfx.play_reset(),
            GameEvent::SceneLoaded(_) | GameEvent::HelpShown | GameEvent::HelpClosed => sfx.play_select(),
        }
    }
}
