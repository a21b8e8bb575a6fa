/// Pure game logic: hand signs, round rule, scores, tweening.

pub mod hand;
pub mod score;
pub mod tween;
