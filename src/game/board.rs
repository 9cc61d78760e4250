//! The persistent grid of locked cells.
//!
//! Cells are stored row-major in a single `Vec`, indexed by `y * width + x`.
//! Row 0 is the top (spawn side), row `height - 1` is the floor.

use ratatui::style::Color;

use crate::game::piece::Piece;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_filled(self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    #[display("board needs at least one row and one column, got {width}x{height}")]
    Empty { width: usize, height: usize },
    #[display("board has no rows")]
    NoRows,
    #[display("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
}

#[derive(Clone, PartialEq, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board. Both dimensions must be non-zero.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::Empty { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        })
    }

    /// Builds a board from explicit rows, top row first.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, BoardError> {
        let expected = rows.first().ok_or(BoardError::NoRows)?.len();
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != expected || cells.is_empty())
        {
            return Err(BoardError::RaggedRow {
                row,
                len: cells.len(),
                expected,
            });
        }
        Ok(Self {
            width: expected,
            height: rows.len(),
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Returns `None` when `(x, y)` lies outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Returns false if out of bounds.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Empties every cell, keeping the dimensions.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    /// True if any occupied cell of `piece`, with its origin at `(x, y)`,
    /// falls outside the grid (above row 0 included) or onto a filled cell.
    ///
    /// This one predicate decides both move legality and landing.
    pub fn collides(&self, piece: &Piece, x: i32, y: i32) -> bool {
        piece
            .blocks_at(x, y)
            .any(|(bx, by)| self.get(bx, by).map_or(true, Cell::is_filled))
    }

    /// Writes the piece's color into the board at `(x, y)`, which must be
    /// the last position that passed [`Board::collides`].
    pub fn lock(&mut self, piece: &Piece, x: i32, y: i32) {
        debug_assert!(
            !self.collides(piece, x, y),
            "locking {} at colliding position ({x}, {y})",
            piece.kind
        );
        for (bx, by) in piece.blocks_at(x, y) {
            self.set(bx, by, Cell::Filled(piece.color));
        }
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.height && self.row(y).iter().all(|cell| cell.is_filled())
    }

    /// Deletes row `y` and inserts an empty row at the top, shifting every
    /// row above `y` down by one.
    fn remove_row(&mut self, y: usize) {
        let width = self.width;
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(Cell::Empty);
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows are scanned top to bottom. Removing row `y` only moves rows
    /// that were already scanned, so the live index never skips a row.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        for y in 0..self.height {
            if self.is_row_full(y) {
                self.remove_row(y);
                cleared += 1;
            }
        }
        cleared
    }

    /// True if anything occupies the top row.
    pub fn is_loss(&self) -> bool {
        self.row(0).iter().any(|cell| cell.is_filled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::shape::ShapeKind;

    const F: Cell = Cell::Filled(Color::Gray);
    const E: Cell = Cell::Empty;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(10, 20).unwrap();
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 20);
        assert_eq!(board.occupied_count(), 0);
        assert_eq!(board.rows().count(), 20);
        assert!(!board.is_loss());
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        for (width, height) in [(5, 0), (0, 5), (0, 0)] {
            assert_eq!(
                Board::new(width, height),
                Err(BoardError::Empty { width, height })
            );
        }
        let board = Board::new(1, 1).unwrap();
        assert_eq!(board.rows().count(), 1);
        assert!(!board.is_loss());
    }

    #[test]
    fn test_clear_empties_cells() {
        let mut board = Board::new(4, 4).unwrap();
        board.set(1, 2, F);
        board.set(0, 0, F);
        board.clear();
        assert_eq!(board, Board::new(4, 4).unwrap());
    }

    #[test]
    fn test_get_out_of_bounds() {
        let board = Board::new(4, 4).unwrap();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(4, 0), None);
        assert_eq!(board.get(0, 4), None);
        assert_eq!(board.get(3, 3), Some(Cell::Empty));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert_eq!(Board::from_rows(vec![]), Err(BoardError::NoRows));
        assert_eq!(
            Board::from_rows(vec![vec![E, E], vec![E]]),
            Err(BoardError::RaggedRow {
                row: 1,
                len: 1,
                expected: 2
            })
        );
    }

    #[test]
    fn test_collides_out_of_bounds_everywhere() {
        let board = Board::new(6, 6).unwrap();
        for kind in ShapeKind::ALL {
            let piece = Piece::new(kind);
            let (w, h) = (piece.width() as i32, piece.height() as i32);
            for y in -h - 1..=6 + 1 {
                for x in -w - 1..=6 + 1 {
                    let out = piece
                        .blocks_at(x, y)
                        .any(|(bx, by)| bx < 0 || bx >= 6 || by < 0 || by >= 6);
                    if out {
                        assert!(board.collides(&piece, x, y), "{kind} at ({x}, {y})");
                    } else {
                        assert!(!board.collides(&piece, x, y), "{kind} at ({x}, {y})");
                    }
                }
            }
        }
    }

    #[test]
    fn test_collides_with_filled_cell() {
        let mut board = Board::new(6, 6).unwrap();
        board.set(2, 3, F);
        let piece = Piece::new(ShapeKind::O);
        assert!(board.collides(&piece, 1, 2));
        assert!(board.collides(&piece, 2, 3));
        assert!(!board.collides(&piece, 3, 3));
        assert!(!board.collides(&piece, 0, 0));
    }

    #[test]
    fn test_lock_writes_exactly_piece_cells() {
        let mut board = Board::new(6, 6).unwrap();
        board.set(0, 5, F);
        let piece = Piece::new(ShapeKind::T);
        let before = board.occupied_count();

        board.lock(&piece, 2, 4);

        assert_eq!(board.occupied_count(), before + piece.cell_count());
        for (x, y) in piece.blocks_at(2, 4) {
            assert_eq!(board.get(x, y), Some(Cell::Filled(piece.color)));
        }
        assert_eq!(board.get(0, 5), Some(F));
    }

    #[test]
    fn test_clear_full_rows_non_adjacent() {
        // rows 2, 5 and 7 are full; the others carry a unique marker column
        let width = 4;
        let rows: Vec<Vec<Cell>> = (0..9)
            .map(|y| {
                if [2, 5, 7].contains(&y) {
                    vec![F; width]
                } else {
                    let mut row = vec![E; width];
                    row[y % width] = F;
                    row
                }
            })
            .collect();
        let survivors: Vec<Vec<Cell>> = rows
            .iter()
            .enumerate()
            .filter(|(y, _)| ![2, 5, 7].contains(y))
            .map(|(_, row)| row.clone())
            .collect();
        let mut board = Board::from_rows(rows).unwrap();

        assert_eq!(board.clear_full_rows(), 3);

        for y in 0..3 {
            assert!(board.row(y).iter().all(|c| *c == E), "row {y} should be empty");
        }
        let remaining: Vec<Vec<Cell>> = board.rows().skip(3).map(<[Cell]>::to_vec).collect();
        assert_eq!(remaining, survivors);
    }

    #[test]
    fn test_clear_adjacent_rows_at_floor() {
        let mut board = Board::from_rows(vec![
            vec![E, E, E, E],
            vec![F, E, E, E],
            vec![F, F, F, F],
            vec![F, F, F, F],
        ])
        .unwrap();

        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.row(3), &[F, E, E, E]);
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_clear_without_full_rows_is_noop() {
        let mut board = Board::new(4, 4).unwrap();
        board.set(1, 3, F);
        let before = board.clone();
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_is_loss_only_checks_top_row() {
        let mut board = Board::new(4, 4).unwrap();
        board.set(3, 1, F);
        assert!(!board.is_loss());
        board.set(2, 0, F);
        assert!(board.is_loss());
    }
}
