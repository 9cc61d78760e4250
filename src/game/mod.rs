pub mod board;
pub mod intent;
pub mod piece;
pub mod shape;
pub mod state;

pub use board::{Board, BoardError, Cell};
pub use intent::Intent;
pub use piece::Piece;
pub use shape::{all_shapes, random_shape, Shape, ShapeKind};
pub use state::{spawn_position, Position, Session, SessionError, SessionView, Status};
