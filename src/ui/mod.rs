/// Terminal presentation and input devices.

pub mod gamepad;
pub mod input;
pub mod renderer;
pub mod sound;
