/// RoundEngine: one player move against a random computer move.
///
/// Owns the session's `ScoreState` and RNG. Writes images, result text and
/// score texts into a `ResultBoard`. Invalid input never reaches the score:
/// it is logged and dropped.

use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::hand::{self, Move, Outcome};
use crate::domain::score::ScoreState;
use crate::sim::board::{ResultBoard, PROMPT_TEXT};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RoundReport {
    pub player: Move,
    pub computer: Move,
    pub outcome: Outcome,
}

pub struct RoundEngine {
    score: ScoreState,
    rng: ChaCha8Rng,
}

impl RoundEngine {
    /// `seed = None` draws from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        RoundEngine { score: ScoreState::new(), rng }
    }

    pub fn score(&self) -> ScoreState {
        self.score
    }

    /// Scene entry: prompt text, current scores, empty images.
    pub fn start(&self, board: &mut ResultBoard) {
        board.set_result(PROMPT_TEXT);
        board.set_scores(self.score.player, self.score.computer);
        board.set_images(None, None);
    }

    /// UI entry point: resolve a button name and play it.
    /// Returns `None` (and changes nothing) for absent or invalid buttons.
    pub fn on_button(&mut self, name: Option<&str>, board: &mut ResultBoard) -> Option<RoundReport> {
        let name = match name {
            Some(n) if !n.is_empty() => n,
            _ => {
                warn!("button press without a source name ignored");
                return None;
            }
        };
        match hand::move_from_button(name) {
            Ok(player) => Some(self.play(player, board)),
            Err(e) => {
                warn!("rejected button {:?}: {}", name, e);
                None
            }
        }
    }

    /// Play against a uniformly drawn computer move.
    pub fn play(&mut self, player: Move, board: &mut ResultBoard) -> RoundReport {
        let code = self.rng.gen_range(1..4);
        let computer = Move::from_code(code).unwrap_or(Move::Rock);
        self.play_against(player, computer, board)
    }

    /// Deterministic core of a round.
    pub fn play_against(&mut self, player: Move, computer: Move, board: &mut ResultBoard) -> RoundReport {
        board.set_images(Some(player.sprite()), Some(computer.sprite()));

        let outcome = hand::decide(player, computer);
        self.score.record(outcome);
        board.set_result(outcome.message());
        board.set_scores(self.score.player, self.score.computer);

        debug!(
            "round {}: {} vs {} -> {:?} ({}-{})",
            self.score.rounds(),
            player.name(),
            computer.name(),
            outcome,
            self.score.player,
            self.score.computer,
        );

        RoundReport { player, computer, outcome }
    }

    /// Zero both counters and put the board back to its prompt state.
    pub fn reset(&mut self, board: &mut ResultBoard) {
        self.score.reset();
        board.set_scores(0, 0);
        board.set_result(PROMPT_TEXT);
        board.set_images(None, None);
        info!("scores reset");
    }
}
