// Default grid: an 800px window split into 40px cells.
pub const DEFAULT_BOARD_WIDTH: usize = 20;
pub const DEFAULT_BOARD_HEIGHT: usize = 20;

pub const DEFAULT_TICKS_PER_SECOND: u32 = 5;

// How long the front-end waits for a key event before checking the tick clock (milliseconds)
pub const INPUT_POLL_INTERVAL: u64 = 16;
