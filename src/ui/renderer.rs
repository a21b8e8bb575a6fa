/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// The renderer only reads the world: board slots, scene, help flag.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use glam::Vec3;

use crate::domain::hand::{Outcome, Sprite};
use crate::sim::board::TextSlot;
use crate::sim::menu::Scene;
use crate::sim::world::{WorldState, MENU_ITEMS};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit dark background for every cell, so the terminal's own
    /// default never shows through between rows.
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Sentinel cell used to invalidate the back buffer.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        let bg = match bg {
            Color::Reset => Self::BASE_BG,
            other => other,
        };
        Cell { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y). Each char occupies 1 column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width {
                break;
            }
            self.set(x + i, y, Cell::new(ch, fg, bg));
        }
    }

    /// Write a string horizontally centered on row y.
    fn put_centered(&mut self, y: usize, s: &str, fg: Color, bg: Color) {
        let len = s.chars().count();
        let x = self.width.saturating_sub(len) / 2;
        self.put_str(x, y, s, fg, bg);
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, bg: Color) {
        for row in y..y + h {
            for col in x..x + w {
                self.set(col, row, Cell::new(' ', Color::White, bg));
            }
        }
    }
}

// ── Palette ──

const GOLD: Color = Color::Rgb { r: 255, g: 200, b: 50 };
const GREEN: Color = Color::Rgb { r: 80, g: 255, b: 80 };
const RED: Color = Color::Rgb { r: 255, g: 80, b: 80 };
const CYAN: Color = Color::Rgb { r: 100, g: 200, b: 255 };
const PANEL_BG: Color = Color::Rgb { r: 40, g: 40, b: 55 };

// ── Sprites ──

const ART_W: usize = 18;

const ROCK_ART: [&str; 6] = [
    r"    _______",
    r"---'   ____)",
    r"      (_____)",
    r"      (_____)",
    r"      (____)",
    r"---.__(___)",
];

const PAPER_ART: [&str; 6] = [
    r"    _______",
    r"---'   ____)____",
    r"          ______)",
    r"          _______)",
    r"         _______)",
    r"---.__________)",
];

const SCISSORS_ART: [&str; 6] = [
    r"    _______",
    r"---'   ____)____",
    r"          ______)",
    r"       __________)",
    r"      (____)",
    r"---.__(___)",
];

fn sprite_art(sprite: Sprite) -> &'static [&'static str; 6] {
    match sprite {
        Sprite::Rock => &ROCK_ART,
        Sprite::Paper => &PAPER_ART,
        Sprite::Scissors => &SCISSORS_ART,
    }
}

/// Mirror a line of hand art so the computer's hand faces the player's.
fn mirror(line: &str, width: usize) -> String {
    let padded = format!("{:<width$}", line, width = width);
    padded
        .chars()
        .rev()
        .map(|c| match c {
            '(' => ')',
            ')' => '(',
            '/' => '\\',
            '\\' => '/',
            '\'' => '`',
            other => other,
        })
        .collect()
}

/// Widest gap between letters of a popped result.
const MAX_LETTER_GAP: usize = 8;

/// Spread text by its scale: above 1.0 letters gain gaps, below 0.85 the
/// text is drawn dim. Returns the laid-out string and whether it is shrunk.
fn scaled_text(text: &str, scale: Vec3) -> (String, bool) {
    let gap = (((scale.x - 1.0).max(0.0) * 4.0).round() as usize).min(MAX_LETTER_GAP);
    let shrunk = scale.x < 0.85;
    if gap == 0 {
        return (text.to_string(), shrunk);
    }
    let sep = " ".repeat(gap);
    let spread = text.chars().map(|c| c.to_string()).collect::<Vec<_>>().join(&sep);
    (spread, shrunk)
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_scene: Option<Scene>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_scene: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.writer, ResetColor, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, world: &WorldState) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        // Scene change → full repaint
        if self.last_scene != Some(world.scene()) {
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
            self.last_scene = Some(world.scene());
        }

        self.front.clear();

        match world.scene() {
            Scene::MainMenu => self.compose_menu(world),
            Scene::Game => self.compose_game(world),
        }
        if world.nav.help_visible() {
            self.compose_help_panel();
        }
        self.compose_message(world);

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut cursor_at: Option<(usize, usize)> = None;

        queue!(self.writer, SetForegroundColor(last_fg), SetBackgroundColor(last_bg))?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    continue;
                }
                if cursor_at != Some((x, y)) {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
                cursor_at = Some((x + 1, y));
            }
        }

        self.writer.flush()
    }

    // ── Compose: build front buffer content ──

    fn compose_menu(&mut self, w: &WorldState) {
        let title = [
            r"  ___         _       ___                      ___      _                      ",
            r" | _ \___  __| |__   | _ \__ _ _ __  ___ _ _  / __| __(_)______ ___ _ _ ___  ",
            r" |   / _ \/ _| / /   |  _/ _` | '_ \/ -_) '_| \__ \/ _| (_-<_-</ _ \ '_(_-<  ",
            r" |_|_\___/\__|_\_\   |_| \__,_| .__/\___|_|   |___/\__|_/__/__/\___/_| /__/  ",
            r"                              |_|                                            ",
        ];
        for (i, line) in title.iter().enumerate() {
            self.front.put_centered(2 + i, line, GOLD, Color::Reset);
        }
        self.front.put_centered(8, "━━━ Terminal Edition ━━━", Color::Rgb { r: 180, g: 140, b: 50 }, Color::Reset);

        let menu_base = 11;
        for (i, item) in MENU_ITEMS.iter().enumerate() {
            let selected = i == w.menu_cursor;
            let label = if selected {
                format!("▸ {} ◂", item.label())
            } else {
                format!("  {}  ", item.label())
            };
            let fg = if selected { GREEN } else { Color::White };
            self.front.put_centered(menu_base + i * 2, &label, fg, Color::Reset);
        }

        let footer = self.front.height.saturating_sub(3);
        if footer > menu_base + MENU_ITEMS.len() * 2 {
            self.front.put_centered(footer, "↑↓ Select   ENTER Confirm   H Help   Q Quit", Color::DarkGrey, Color::Reset);
        }
    }

    fn compose_game(&mut self, w: &WorldState) {
        let buf_w = self.front.width;
        let board = &w.board;

        // Scoreboard
        let you = board.score_you.as_ref().map(|s| s.text.as_str()).unwrap_or("-");
        let com = board.score_com.as_ref().map(|s| s.text.as_str()).unwrap_or("-");
        let header = format!("YOU  {:>3}   ◆   {:<3}  COMPUTER", you, com);
        self.front.put_centered(1, &header, GOLD, Color::Reset);

        // Hands
        let left_x = (buf_w / 4).saturating_sub(ART_W / 2);
        let right_x = (buf_w * 3 / 4).saturating_sub(ART_W / 2);
        let art_y = 4;
        let you_sprite = board.img_you.as_ref().and_then(|s| s.sprite);
        let com_sprite = board.img_com.as_ref().and_then(|s| s.sprite);
        self.compose_hand(left_x, art_y, you_sprite, false);
        self.compose_hand(right_x, art_y, com_sprite, true);

        // Result line
        if let Some(slot) = &board.result {
            let color = match w.last_round.map(|r| r.outcome) {
                Some(Outcome::PlayerWin) => GREEN,
                Some(Outcome::ComputerWin) => RED,
                Some(Outcome::Draw) => CYAN,
                None => Color::White,
            };
            self.compose_result(art_y + 8, slot, color);
        }

        // Choice buttons
        let buttons = ["[1] ROCK", "[2] PAPER", "[3] SCISSORS"];
        let row = art_y + 12;
        let total: usize = buttons.iter().map(|b| b.len() + 4).sum();
        let mut x = buf_w.saturating_sub(total) / 2;
        let highlight = w.last_round.map(|r| (r.player.code() - 1) as usize);
        for (i, label) in buttons.iter().enumerate() {
            let bg = if highlight == Some(i) { Color::Rgb { r: 60, g: 90, b: 60 } } else { PANEL_BG };
            self.front.put_str(x, row, &format!(" {} ", label), Color::White, bg);
            x += label.len() + 4;
        }

        let footer = self.front.height.saturating_sub(2);
        if footer > row + 1 {
            self.front.put_centered(footer, "1-3 / R P S Play   0 Reset   H Help   ESC Menu", Color::DarkGrey, Color::Reset);
        }
    }

    fn compose_hand(&mut self, x: usize, y: usize, sprite: Option<Sprite>, mirrored: bool) {
        let Some(sprite) = sprite else {
            self.front.put_str(x + ART_W / 2 - 1, y + 2, "?", Color::DarkGrey, Color::Reset);
            return;
        };
        for (i, line) in sprite_art(sprite).iter().enumerate() {
            let text = if mirrored { mirror(line, ART_W) } else { line.to_string() };
            self.front.put_str(x, y + i, &text, Color::White, Color::Reset);
        }
    }

    fn compose_result(&mut self, y: usize, slot: &TextSlot, color: Color) {
        let (text, shrunk) = scaled_text(&slot.text, slot.scale);
        let fg = if shrunk { Color::DarkGrey } else { color };
        self.front.put_centered(y, &text, fg, Color::Reset);
        // Taller scale grows a rule above and below the text.
        if slot.scale.y >= 1.15 {
            let rule = "─".repeat(text.chars().count());
            self.front.put_centered(y.saturating_sub(1), &rule, fg, Color::Reset);
            self.front.put_centered(y + 1, &rule, fg, Color::Reset);
        }
    }

    fn compose_help_panel(&mut self) {
        let lines = [
            "HOW TO PLAY",
            "",
            "Pick Rock, Paper or Scissors.",
            "The computer picks at random.",
            "",
            "  Rock     beats  Scissors",
            "  Scissors beats  Paper",
            "  Paper    beats  Rock",
            "",
            "Each win scores a point.",
            "",
            "H / ESC  Close",
        ];
        let box_w = 36_usize.min(self.front.width);
        let box_h = (lines.len() + 2).min(self.front.height);
        let box_x = self.front.width.saturating_sub(box_w) / 2;
        let box_y = self.front.height.saturating_sub(box_h) / 2;

        self.front.fill_rect(box_x, box_y, box_w, box_h, PANEL_BG);
        for (i, line) in lines.iter().enumerate() {
            let fg = if i == 0 { GOLD } else { Color::White };
            self.front.put_str(box_x + 3, box_y + 1 + i, line, fg, PANEL_BG);
        }
    }

    fn compose_message(&mut self, w: &WorldState) {
        if w.message.is_empty() || self.front.height == 0 {
            return;
        }
        let row = self.front.height - 1;
        let bar = Color::Rgb { r: 200, g: 180, b: 50 };
        self.front.fill_rect(0, row, self.front.width, 1, bar);
        self.front.put_str(0, row, &format!(" ◈ {} ", w.message), Color::Black, bar);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_scale_leaves_text() {
        assert_eq!(scaled_text("You WIN!", Vec3::ONE), ("You WIN!".to_string(), false));
    }

    #[test]
    fn peak_scale_spreads_letters() {
        let (s, shrunk) = scaled_text("WIN", Vec3::new(1.25, 1.25, 1.0));
        assert_eq!(s, "W I N");
        assert!(!shrunk);
    }

    #[test]
    fn huge_scale_gap_is_bounded() {
        let gap = " ".repeat(MAX_LETTER_GAP);
        let expected = format!("W{gap}I{gap}N");
        assert_eq!(scaled_text("WIN", Vec3::new(1e20, 1e20, 1.0)).0, expected);
        assert_eq!(scaled_text("WIN", Vec3::splat(f32::INFINITY)).0, expected);
        assert_eq!(scaled_text("WIN", Vec3::splat(f32::NAN)).0, "WIN");
    }

    #[test]
    fn small_scale_is_dim() {
        let (_, shrunk) = scaled_text("WIN", Vec3::new(0.5, 0.5, 1.0));
        assert!(shrunk);
    }

    #[test]
    fn mirror_flips_parens() {
        assert_eq!(mirror("(_)", 4), " (_)");
        assert_eq!(mirror("---'", 4), "`---");
    }

    #[test]
    fn art_fits_width() {
        for art in [&ROCK_ART, &PAPER_ART, &SCISSORS_ART] {
            assert!(art.iter().all(|l| l.chars().count() <= ART_W));
        }
    }
}
