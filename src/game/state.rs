use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, trace};

use crate::config::{ConfigError, GameConfig};
use crate::game::board::{Board, BoardError};
use crate::game::intent::Intent;
use crate::game::piece::Piece;
use crate::game::shape::random_shape;

/// Board coordinates of the falling piece's top-left local origin.
pub type Position = (i32, i32);

#[derive(Clone, Copy, PartialEq, Eq, Debug, derive_more::IsVariant)]
pub enum Status {
    Playing,
    Lost,
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SessionError {
    #[display("invalid configuration: {_0}")]
    Config(ConfigError),
    #[display("invalid board: {_0}")]
    Board(BoardError),
    #[display("board is {actual_width}x{actual_height}, configuration expects {width}x{height}")]
    #[from(ignore)]
    BoardMismatch {
        width: usize,
        height: usize,
        actual_width: usize,
        actual_height: usize,
    },
    #[display("piece collides with the board at ({}, {})", _0.0, _0.1)]
    #[from(ignore)]
    PieceCollides(#[error(not(source))] Position),
}

/// Read-only snapshot handed to the caller after every tick.
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    pub board: &'a Board,
    pub piece: &'a Piece,
    pub position: Position,
    pub score: u32,
    pub lost: bool,
}

/// One game: board, falling piece, score and the terminal lost flag.
///
/// Driven one tick at a time by the caller. Each tick runs, in order:
/// intent, gravity, lock and spawn (on landing), line clear.
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    board: Board,
    piece: Piece,
    position: Position,
    score: u32,
    status: Status,
    rng: StdRng,
}

impl Session {
    pub fn new(config: GameConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let board = Board::new(config.width, config.height)?;
        let mut rng = Self::make_rng(&config);
        let piece = Piece::from(random_shape(&mut rng));
        let position = spawn_position(config.width, &piece);
        debug!(width = config.width, height = config.height, seed = ?config.seed, "new session");
        Ok(Self {
            board,
            config,
            piece,
            position,
            score: 0,
            status: Status::Playing,
            rng,
        })
    }

    /// Starts a session from an explicit board and falling piece.
    pub fn with_state(
        config: GameConfig,
        board: Board,
        piece: Piece,
        position: Position,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        if board.width() != config.width || board.height() != config.height {
            return Err(SessionError::BoardMismatch {
                width: config.width,
                height: config.height,
                actual_width: board.width(),
                actual_height: board.height(),
            });
        }
        if board.collides(&piece, position.0, position.1) {
            return Err(SessionError::PieceCollides(position));
        }
        Ok(Self {
            rng: Self::make_rng(&config),
            config,
            board,
            piece,
            position,
            score: 0,
            status: Status::Playing,
        })
    }

    fn make_rng(config: &GameConfig) -> StdRng {
        match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Clears the board and score and spawns a fresh piece. The random
    /// stream continues rather than restarting from the seed.
    pub fn restart(&mut self) {
        self.board.clear();
        self.score = 0;
        self.status = Status::Playing;
        self.spawn_piece();
        debug!("session restarted");
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_lost(&self) -> bool {
        self.status.is_lost()
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            board: &self.board,
            piece: &self.piece,
            position: self.position,
            score: self.score,
            lost: self.status.is_lost(),
        }
    }

    /// Advances the session by one fixed time step.
    ///
    /// Once the session is lost, ticks change nothing.
    pub fn tick(&mut self, intent: Option<Intent>) -> SessionView<'_> {
        if self.status.is_lost() {
            return self.view();
        }

        if let Some(intent) = intent {
            self.apply_intent(intent);
        }

        let (x, y) = self.position;
        if self.board.collides(&self.piece, x, y + 1) {
            if self.board.collides(&self.piece, x, y) {
                // Spawned over locked cells and cannot fall clear of them.
                self.status = Status::Lost;
                info!(score = self.score, "game over: piece stuck at spawn");
                return self.view();
            }
            // Landed: lock at the last validated position, not the rejected row below.
            self.lock_and_spawn();
            if self.status.is_lost() {
                return self.view();
            }
        } else {
            self.position = (x, y + 1);
        }

        let cleared = self.board.clear_full_rows();
        if cleared > 0 {
            self.score = self.score.saturating_add(cleared);
            info!(rows = cleared, score = self.score, "cleared rows");
        }

        self.view()
    }

    fn apply_intent(&mut self, intent: Intent) {
        let applied = match intent.offset() {
            Some((dx, dy)) => self.try_move(dx, dy),
            None => self.try_rotate(),
        };
        if !applied {
            trace!(%intent, position = ?self.position, "intent rejected");
        }
    }

    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let (x, y) = (self.position.0 + dx, self.position.1 + dy);
        if self.board.collides(&self.piece, x, y) {
            return false;
        }
        self.position = (x, y);
        true
    }

    fn try_rotate(&mut self) -> bool {
        let (x, y) = self.position;
        self.piece.rotate_clockwise();
        if self.board.collides(&self.piece, x, y) {
            // Three more quarter turns restore the starting orientation.
            for _ in 0..3 {
                self.piece.rotate_clockwise();
            }
            return false;
        }
        true
    }

    fn lock_and_spawn(&mut self) {
        let (x, y) = self.position;
        self.board.lock(&self.piece, x, y);
        debug!(kind = %self.piece.kind, x, y, "locked piece");
        self.spawn_piece();
    }

    fn spawn_piece(&mut self) {
        self.piece = Piece::from(random_shape(&mut self.rng));
        self.position = spawn_position(self.config.width, &self.piece);
        let (x, y) = self.position;
        debug!(kind = %self.piece.kind, x, y, "spawned piece");

        if self.board.is_loss() {
            self.status = Status::Lost;
            info!(score = self.score, "game over");
        }
    }
}

/// Column `width / 2` on the top row, moved left only as far as needed to
/// keep a wide piece inside the right wall.
pub fn spawn_position(width: usize, piece: &Piece) -> Position {
    let x = (width / 2).min(width.saturating_sub(piece.width()));
    (x as i32, 0)
}
