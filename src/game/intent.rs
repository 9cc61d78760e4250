/// A player request applied during the intent phase of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    MoveDown,
    RotateCw,
}

impl Intent {
    /// Translation for move intents, `None` for rotation.
    pub fn offset(self) -> Option<(i32, i32)> {
        match self {
            Intent::MoveLeft => Some((-1, 0)),
            Intent::MoveRight => Some((1, 0)),
            Intent::MoveDown => Some((0, 1)),
            Intent::RotateCw => None,
        }
    }
}
