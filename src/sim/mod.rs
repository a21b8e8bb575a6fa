/// Session state: board, round engine, feedback, navigation.

pub mod board;
pub mod event;
pub mod feedback;
pub mod menu;
pub mod round;
pub mod world;
