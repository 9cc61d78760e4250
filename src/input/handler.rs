use blockfall::game::Intent;
use crossterm::event::{KeyCode, KeyEventKind};

/// Front-end commands that never reach the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Quit,
    Restart,
}

/// Holds the intent for the next tick.
///
/// Keys pressed between two ticks are coalesced: the latest one wins and
/// earlier ones are dropped.
#[derive(Debug, Default)]
pub struct InputState {
    pending: Option<Intent>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, intent: Intent) {
        self.pending = Some(intent);
    }

    /// Hands the pending intent to a tick, leaving nothing behind.
    pub fn take(&mut self) -> Option<Intent> {
        self.pending.take()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

fn key_intent(key_code: KeyCode) -> Option<Intent> {
    match key_code {
        KeyCode::Left => Some(Intent::MoveLeft),
        KeyCode::Right => Some(Intent::MoveRight),
        KeyCode::Down => Some(Intent::MoveDown),
        KeyCode::Up => Some(Intent::RotateCw),
        _ => None,
    }
}

pub fn handle_input(
    state: &mut InputState,
    key_code: KeyCode,
    kind: KeyEventKind,
) -> Option<Control> {
    if kind == KeyEventKind::Release {
        return None;
    }
    if let Some(intent) = key_intent(key_code) {
        state.push(intent);
        return None;
    }
    match key_code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Control::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Control::Restart),
        _ => None,
    }
}
