/// Session score counters.
///
/// Counters only grow until `reset()`. Draws are tracked so that
/// `player + computer + draws` always equals the number of rounds played.

use super::hand::Outcome;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ScoreState {
    pub player: u32,
    pub computer: u32,
    pub draws: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::PlayerWin => self.player += 1,
            Outcome::ComputerWin => self.computer += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub fn rounds(&self) -> u32 {
        self.player + self.computer + self.draws
    }

    pub fn reset(&mut self) {
        *self = ScoreState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_outcome() -> impl Strategy<Value = Outcome> {
        prop_oneof![
            Just(Outcome::PlayerWin),
            Just(Outcome::ComputerWin),
            Just(Outcome::Draw),
        ]
    }

    #[test]
    fn draw_leaves_displayed_counters() {
        let mut s = ScoreState::new();
        s.record(Outcome::Draw);
        assert_eq!((s.player, s.computer), (0, 0));
        assert_eq!(s.rounds(), 1);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut s = ScoreState { player: 3, computer: 2, draws: 1 };
        s.reset();
        assert_eq!(s, ScoreState::default());
        s.reset();
        assert_eq!(s, ScoreState::default());
    }

    proptest! {
        #[test]
        fn counters_sum_to_rounds(outcomes in prop::collection::vec(any_outcome(), 0..64)) {
            let mut s = ScoreState::new();
            let mut prev = s;
            for o in &outcomes {
                s.record(*o);
                prop_assert!(s.player >= prev.player);
                prop_assert!(s.computer >= prev.computer);
                prev = s;
            }
            prop_assert_eq!(s.rounds() as usize, outcomes.len());
        }
    }
}
