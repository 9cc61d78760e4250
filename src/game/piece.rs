use ratatui::style::Color;

use crate::game::shape::{Shape, ShapeKind};

/// The falling piece. Its board position is owned by the session.
#[derive(Clone, PartialEq, Debug)]
pub struct Piece {
    pub kind: ShapeKind,
    pub shape: Vec<Vec<bool>>,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: ShapeKind) -> Self {
        Self::from(Shape::from(kind))
    }

    /// Rotates 90 degrees clockwise in place: transpose, then reverse each row.
    ///
    /// No bounds checking happens here; the board decides whether the new
    /// orientation is legal.
    pub fn rotate_clockwise(&mut self) {
        let rows = self.shape.len();
        let cols = self.width();
        let mut rotated = vec![vec![false; rows]; cols];

        for (i, row) in self.shape.iter().enumerate() {
            for (j, &cell) in row.iter().enumerate() {
                rotated[j][rows - 1 - i] = cell;
            }
        }

        self.shape = rotated;
    }

    pub fn width(&self) -> usize {
        self.shape.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.shape.len()
    }

    /// Occupied cells in the piece's local frame, as `(row, col)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.shape.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &cell)| cell)
                .map(move |(c, _)| (r, c))
        })
    }

    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    /// Absolute board coordinates `(x, y)` of every occupied cell with the
    /// local origin placed at `(x, y)`.
    pub fn blocks_at(&self, x: i32, y: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells()
            .map(move |(r, c)| (x + c as i32, y + r as i32))
    }
}

impl From<Shape> for Piece {
    fn from(shape: Shape) -> Self {
        Self {
            kind: shape.kind,
            shape: shape.matrix,
            color: shape.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::shape::all_shapes;

    #[test]
    fn test_rotation_has_period_four() {
        for shape in all_shapes() {
            let mut piece = Piece::from(shape.clone());
            for _ in 0..4 {
                piece.rotate_clockwise();
            }
            assert_eq!(piece.shape, shape.matrix, "{} did not return", shape.kind);
        }
    }

    #[test]
    fn test_rotate_i_becomes_vertical() {
        let mut piece = Piece::new(ShapeKind::I);
        piece.rotate_clockwise();
        assert_eq!(piece.shape, vec![vec![true]; 4]);
        assert_eq!((piece.width(), piece.height()), (1, 4));
    }

    #[test]
    fn test_rotate_t_clockwise() {
        // ###      .#
        // .#.  ->  ##
        //          .#
        let mut piece = Piece::new(ShapeKind::T);
        piece.rotate_clockwise();
        assert_eq!(
            piece.shape,
            vec![
                vec![false, true],
                vec![true, true],
                vec![false, true],
            ]
        );
    }

    #[test]
    fn test_rotation_preserves_cell_count_and_color() {
        let mut piece = Piece::new(ShapeKind::L);
        let color = piece.color;
        piece.rotate_clockwise();
        assert_eq!(piece.cell_count(), 4);
        assert_eq!(piece.color, color);
    }

    #[test]
    fn test_blocks_at_offsets_cells() {
        let piece = Piece::new(ShapeKind::O);
        let blocks: Vec<_> = piece.blocks_at(3, 5).collect();
        assert_eq!(blocks, vec![(3, 5), (4, 5), (3, 6), (4, 6)]);
    }
}
