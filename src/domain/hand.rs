/// Hand signs and the round rule.
///
/// Moves are encoded 1..=3 at the UI boundary (Rock, Paper, Scissors).
/// Each move beats the one before it, cyclically:
///   Paper(2) beats Rock(1), Scissors(3) beats Paper(2), Rock(1) beats Scissors(3).

use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    PlayerWin,
    ComputerWin,
    Draw,
}

/// Visual shown in an image slot for a move.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Sprite {
    Rock,
    Paper,
    Scissors,
}

/// The only error the round logic knows about.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum InvalidMoveInput {
    /// A number was found but it is not 1, 2 or 3.
    OutOfRange(i32),
    /// The source identifier was empty or contained no digit.
    Unparseable(String),
}

impl fmt::Display for InvalidMoveInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidMoveInput::OutOfRange(n) => write!(f, "move code {} is not in 1..=3", n),
            InvalidMoveInput::Unparseable(src) => write!(f, "no move code in {:?}", src),
        }
    }
}

impl std::error::Error for InvalidMoveInput {}

impl Move {
    pub fn from_code(code: i32) -> Result<Move, InvalidMoveInput> {
        match code {
            1 => Ok(Move::Rock),
            2 => Ok(Move::Paper),
            3 => Ok(Move::Scissors),
            n => Err(InvalidMoveInput::OutOfRange(n)),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Move::Rock => 1,
            Move::Paper => 2,
            Move::Scissors => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
        }
    }

    pub fn sprite(self) -> Sprite {
        match self {
            Move::Rock => Sprite::Rock,
            Move::Paper => Sprite::Paper,
            Move::Scissors => Sprite::Scissors,
        }
    }
}

/// Round rule. A pure function of both moves.
pub fn decide(player: Move, computer: Move) -> Outcome {
    match (player.code() - computer.code()).rem_euclid(3) {
        0 => Outcome::Draw,
        1 => Outcome::PlayerWin,
        _ => Outcome::ComputerWin,
    }
}

impl Outcome {
    /// User-visible result line. Other components key off these exact strings.
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Draw => "It's a Draw!",
            Outcome::PlayerWin => "You WIN!",
            Outcome::ComputerWin => "Computer WINS!",
        }
    }
}

/// Extract the first ASCII digit of a button name, e.g. `"btn2_paper"` → 2.
pub fn parse_button_number(name: &str) -> Option<i32> {
    name.chars()
        .find(|c| c.is_ascii_digit())
        .and_then(|c| c.to_digit(10))
        .map(|d| d as i32)
}

/// Resolve a button name straight to a move.
pub fn move_from_button(name: &str) -> Result<Move, InvalidMoveInput> {
    match parse_button_number(name) {
        Some(code) => Move::from_code(code),
        None => Err(InvalidMoveInput::Unparseable(name.to_string())),
    }
}

#[cfg(test)]
impl Move {
    /// Does `self` beat `other`?
    pub fn beats(self, other: Move) -> bool {
        decide(self, other) == Outcome::PlayerWin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_move() -> impl Strategy<Value = Move> {
        prop_oneof![Just(Move::Rock), Just(Move::Paper), Just(Move::Scissors)]
    }

    #[test]
    fn cyclic_beats() {
        assert!(Move::Rock.beats(Move::Scissors));
        assert!(Move::Paper.beats(Move::Rock));
        assert!(Move::Scissors.beats(Move::Paper));
        assert!(!Move::Scissors.beats(Move::Rock));
    }

    #[test]
    fn example_rounds() {
        assert_eq!(decide(Move::Rock, Move::Scissors), Outcome::PlayerWin);
        assert_eq!(decide(Move::Paper, Move::Paper), Outcome::Draw);
        assert_eq!(decide(Move::Scissors, Move::Rock), Outcome::ComputerWin);
    }

    #[test]
    fn messages_are_verbatim() {
        assert_eq!(Outcome::Draw.message(), "It's a Draw!");
        assert_eq!(Outcome::PlayerWin.message(), "You WIN!");
        assert_eq!(Outcome::ComputerWin.message(), "Computer WINS!");
    }

    #[test]
    fn codes_outside_range_rejected() {
        for code in [0, 4, 5, -1, i32::MAX] {
            assert_eq!(Move::from_code(code), Err(InvalidMoveInput::OutOfRange(code)));
        }
    }

    #[test]
    fn sprite_mapping() {
        let sprite = |code| Move::from_code(code).ok().map(Move::sprite);
        assert_eq!(sprite(1), Some(Sprite::Rock));
        assert_eq!(sprite(2), Some(Sprite::Paper));
        assert_eq!(sprite(3), Some(Sprite::Scissors));
        assert_eq!(sprite(0), None);
        assert_eq!(sprite(7), None);
    }

    #[test]
    fn button_number_uses_first_digit() {
        assert_eq!(parse_button_number("btn2_paper"), Some(2));
        assert_eq!(parse_button_number("Choice31"), Some(3));
        assert_eq!(parse_button_number("rock"), None);
        assert_eq!(parse_button_number(""), None);
    }

    #[test]
    fn button_resolution() {
        assert_eq!(move_from_button("btn1_rock"), Ok(Move::Rock));
        assert_eq!(move_from_button("btn5"), Err(InvalidMoveInput::OutOfRange(5)));
        assert_eq!(move_from_button("btn0"), Err(InvalidMoveInput::OutOfRange(0)));
        assert!(matches!(move_from_button("paper"), Err(InvalidMoveInput::Unparseable(_))));
    }

    proptest! {
        #[test]
        fn draw_iff_equal(a in any_move(), b in any_move()) {
            prop_assert_eq!(decide(a, b) == Outcome::Draw, a == b);
        }

        #[test]
        fn antisymmetric(a in any_move(), b in any_move()) {
            prop_assume!(a != b);
            let ab = decide(a, b);
            let ba = decide(b, a);
            prop_assert_ne!(ab, Outcome::Draw);
            prop_assert_eq!(ab == Outcome::PlayerWin, ba == Outcome::ComputerWin);
        }

        #[test]
        fn matches_legacy_difference_rule(a in any_move(), b in any_move()) {
            let k = a.code() - b.code();
            let expected = if k == 0 {
                Outcome::Draw
            } else if k == 1 || k == -2 {
                Outcome::PlayerWin
            } else {
                Outcome::ComputerWin
            };
            prop_assert_eq!(decide(a, b), expected);
        }
    }
}
