use super::{
    board::{BOARD_HEIGHT, BOARD_WIDTH, Block, Board},
    piece::{Piece, PiecePosition},
};

impl Board {
    /// Checks whether `piece`'s shape fits at `position`.
    ///
    /// A position is invalid when any filled cell lies left of column 0, right of the
    /// last column, at or below the bottom row, or on top of a filled board cell.
    /// Cells above the board (negative `y`) are only subject to the horizontal bounds.
    #[must_use]
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn is_valid_position(&self, piece: &Piece, position: PiecePosition) -> bool {
        piece.occupied_positions_at(position).all(|(x, y)| {
            if !(0..BOARD_WIDTH as i32).contains(&x) || y >= BOARD_HEIGHT as i32 {
                return false;
            }
            y < 0 || self.block_at(x, y) == Some(Block::Empty)
        })
    }

    /// Checks whether `piece` fits at its own position.
    #[must_use]
    pub fn can_place(&self, piece: &Piece) -> bool {
        self.is_valid_position(piece, piece.position())
    }

    /// Returns a copy of the board with `piece` written in its color.
    ///
    /// Cells outside the board are dropped; `self` is left untouched.
    #[must_use]
    pub fn placed(&self, piece: &Piece) -> Self {
        let mut board = self.clone();
        board.fill_piece(piece);
        board
    }

    /// Returns the lowest position `piece` can fall to straight down from where it is.
    #[must_use]
    pub fn ghost_position(&self, piece: &Piece) -> PiecePosition {
        let mut position = piece.position();
        while self.is_valid_position(piece, position.offset(0, 1)) {
            position = position.offset(0, 1);
        }
        position
    }
}

impl Piece {
    /// Returns this piece moved to its landing spot on `board`.
    #[must_use]
    pub fn dropped(&self, board: &Board) -> Self {
        self.with_position(board.ghost_position(self))
    }
}
