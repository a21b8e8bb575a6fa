/// Events emitted by world actions.
/// The presentation layer consumes these for sound and status messages.

use crate::domain::hand::{Move, Outcome};
use crate::sim::menu::Scene;

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    RoundPlayed { player: Move, computer: Move, outcome: Outcome },
    MoveRejected { button: String },
    ScoresReset,
    SceneLoaded(Scene),
    HelpShown,
    HelpClosed,
}
