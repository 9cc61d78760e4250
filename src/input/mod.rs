pub mod handler;

pub use handler::{handle_input, Control, InputState};
