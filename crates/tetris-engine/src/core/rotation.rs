use super::{
    board::Board,
    piece::{MAX_SHAPE_SIZE, Piece, Shape},
};

/// Offsets tried, in order, when a rotated piece does not fit where it is.
///
/// The first offset that yields a valid position wins.
pub const KICK_OFFSETS: [(i32, i32); 6] = [(0, 0), (-1, 0), (1, 0), (0, -1), (-1, -1), (1, -1)];

impl Shape {
    /// Returns the shape rotated 90° clockwise inside its bounding box.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let size = self.size();
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in cells.iter_mut().enumerate().take(size) {
            for (x, cell) in row.iter_mut().enumerate().take(size) {
                *cell = self.is_occupied(y, size - 1 - x);
            }
        }
        Self::from_cells(size, cells)
    }
}

impl Piece {
    /// Returns the piece rotated clockwise in place, without any collision check.
    #[must_use]
    pub fn rotated(&self) -> Self {
        self.with_shape(self.shape().rotated_clockwise())
    }

    /// Rotates clockwise and searches [`KICK_OFFSETS`] for a position that fits `board`.
    ///
    /// Returns `None` when no offset works, in which case the rotation is rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use tetris_engine::{Board, Piece, PieceKind, PiecePosition};
    ///
    /// let board = Board::new();
    /// // Vertical T hugging the left wall
    /// let piece = Piece::spawn(PieceKind::T)
    ///     .rotated()
    ///     .with_position(PiecePosition::new(-1, 5));
    ///
    /// let kicked = piece.wall_kicked(&board).unwrap();
    /// assert_eq!(kicked.position(), PiecePosition::new(0, 5));
    /// ```
    #[must_use]
    pub fn wall_kicked(&self, board: &Board) -> Option<Self> {
        let rotated = self.rotated();
        KICK_OFFSETS.iter().find_map(|&(dx, dy)| {
            let position = rotated.position().offset(dx, dy);
            board
                .is_valid_position(&rotated, position)
                .then(|| rotated.with_position(position))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Block, PieceKind, PiecePosition};

    fn cells(piece: &Piece) -> Vec<(usize, usize)> {
        piece.shape().occupied_cells().collect()
    }

    #[test]
    fn test_o_rotation_is_fixed_point() {
        let piece = Piece::spawn(PieceKind::O);
        assert_eq!(piece.rotated(), piece);
    }

    #[test]
    fn test_four_rotations_return_to_start() {
        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind);
            let rotated = piece.rotated().rotated().rotated().rotated();
            assert_eq!(rotated, piece, "{kind:?}");
        }
    }

    #[test]
    fn test_rotation_is_clockwise() {
        // T pointing up becomes T pointing right
        let piece = Piece::spawn(PieceKind::T).rotated();
        assert_eq!(cells(&piece), vec![(1, 0), (1, 1), (2, 1), (1, 2)]);

        // Horizontal I (second row) becomes vertical I in the third column
        let piece = Piece::spawn(PieceKind::I).rotated();
        assert_eq!(cells(&piece), vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_rotation_keeps_kind_and_position() {
        let piece = Piece::spawn(PieceKind::J).moved(2, 7);
        let rotated = piece.rotated();
        assert_eq!(rotated.kind(), PieceKind::J);
        assert_eq!(rotated.position(), piece.position());
    }

    #[test]
    fn test_wall_kick_prefers_no_offset() {
        let board = Board::new();
        let piece = Piece::spawn(PieceKind::T).moved(0, 5);
        let kicked = piece.wall_kicked(&board).unwrap();
        assert_eq!(kicked.position(), piece.position());
        assert_eq!(kicked, piece.rotated());
    }

    #[test]
    fn test_wall_kick_off_left_wall() {
        let board = Board::new();
        let piece = Piece::spawn(PieceKind::T)
            .rotated()
            .with_position(PiecePosition::new(-1, 5));
        assert!(board.can_place(&piece));

        // Pointing down needs column -1, so (0, 0) and (-1, 0) fail and (+1, 0) wins
        let kicked = piece.wall_kicked(&board).unwrap();
        assert_eq!(kicked.position(), PiecePosition::new(0, 5));
        assert_eq!(kicked.shape(), piece.rotated().shape());
    }

    #[test]
    fn test_wall_kick_off_right_wall() {
        let board = Board::new();
        // T pointing left: column 2 of the box is empty
        let piece = Piece::spawn(PieceKind::T)
            .rotated()
            .rotated()
            .rotated()
            .with_position(PiecePosition::new(8, 5));
        assert!(board.can_place(&piece));

        let kicked = piece.wall_kicked(&board).unwrap();
        assert_eq!(kicked.position(), PiecePosition::new(7, 5));
    }

    #[test]
    fn test_wall_kick_upward() {
        let mut board = Board::new();
        // Floor under a flat I so that only the upward kick fits the vertical I
        for x in 0..Board::WIDTH {
            board.fill_block_at(x, 19, Block::Piece(PieceKind::Z));
        }
        for x in [4, 6] {
            board.fill_block_at(x, 18, Block::Piece(PieceKind::Z));
        }
        let piece = Piece::spawn(PieceKind::I).with_position(PiecePosition::new(3, 16));
        assert!(board.can_place(&piece));

        // Vertical I at x = 3 covers column 5, rows 16..=19 -> row 19 blocked.
        // Columns 4 and 6 are blocked at row 18, so only (0, -1) fits.
        let kicked = piece.wall_kicked(&board).unwrap();
        assert_eq!(kicked.position(), PiecePosition::new(3, 15));
    }

    #[test]
    fn test_wall_kick_rejected_when_nothing_fits() {
        let piece = Piece::spawn(PieceKind::T).moved(0, 5);
        // Every cell except the ones the T occupies is filled
        let mut board = Board::new();
        for y in 0..Board::HEIGHT {
            for x in 0..Board::WIDTH {
                board.fill_block_at(x, y, Block::Piece(PieceKind::S));
            }
        }
        board.fill_piece_as(&piece, Block::Empty);
        assert!(board.can_place(&piece));

        assert_eq!(piece.wall_kicked(&board), None);
    }
}
