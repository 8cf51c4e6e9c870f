use arrayvec::ArrayVec;

use super::piece::{Piece, PieceKind};

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows on the board.
pub const BOARD_HEIGHT: usize = 20;

/// A single cell of the board.
///
/// [`Block::Ghost`] only ever appears on boards built for display; the engine's
/// own board holds [`Block::Empty`] and [`Block::Piece`] cells exclusively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Ghost piece preview (shows where the falling piece will land).
    Ghost,
    /// Locked cell colored after a piece kind.
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Block::Empty)
    }

    /// Returns the numeric cell tag: `0` for empty, `-1` for ghost, `1..=7` for piece colors.
    #[must_use]
    #[expect(clippy::cast_possible_wrap)]
    pub const fn tag(self) -> i8 {
        match self {
            Block::Empty => 0,
            Block::Ghost => -1,
            Block::Piece(kind) => kind.color() as i8,
        }
    }
}

/// Rows removed by a line clear.
///
/// Row indices refer to the board *before* the clear and are listed bottom to top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineClear {
    rows: ArrayVec<usize, BOARD_HEIGHT>,
}

impl LineClear {
    /// Returns the number of rows removed.
    #[must_use]
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the removed row indices, bottom to top.
    #[must_use]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }
}

/// The 10×20 playfield.
///
/// Row `0` is the top of the board. Coordinates passed to the lookup methods are signed
/// so that pieces hanging above the board (negative `y`) can be handled without casts
/// at every call site.
///
/// # Example
///
/// ```
/// use tetris_engine::{Block, Board, Piece, PieceKind};
///
/// let mut board = Board::new();
/// board.fill_piece(&Piece::spawn(PieceKind::O).moved(0, 18));
///
/// assert_eq!(board.block_at(4, 19), Some(Block::Piece(PieceKind::O)));
/// assert_eq!(board.block_at(-1, 19), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [[Block; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    const EMPTY_ROW: [Block; BOARD_WIDTH] = [Block::Empty; BOARD_WIDTH];

    pub const EMPTY: Self = Self {
        rows: [Self::EMPTY_ROW; BOARD_HEIGHT],
    };

    /// Creates a board with every cell empty.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Returns the rows of the board, top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[[Block; BOARD_WIDTH]; BOARD_HEIGHT] {
        &self.rows
    }

    /// Returns the cell at `(x, y)`, or `None` when the coordinate lies off the board.
    #[must_use]
    pub fn block_at(&self, x: i32, y: i32) -> Option<Block> {
        let (x, y) = Self::index(x, y)?;
        Some(self.rows[y][x])
    }

    fn index(x: i32, y: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|&x| x < BOARD_WIDTH)?;
        let y = usize::try_from(y).ok().filter(|&y| y < BOARD_HEIGHT)?;
        Some((x, y))
    }

    /// Sets a single cell.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies off the board.
    pub fn fill_block_at(&mut self, x: usize, y: usize, block: Block) {
        self.rows[y][x] = block;
    }

    /// Writes the piece's cells in its own color. Cells outside the board are dropped.
    pub fn fill_piece(&mut self, piece: &Piece) {
        self.fill_piece_as(piece, Block::Piece(piece.kind()));
    }

    /// Writes the piece's cells with a specific block, e.g. [`Block::Ghost`] for previews.
    ///
    /// Cells outside the board are dropped.
    pub fn fill_piece_as(&mut self, piece: &Piece, block: Block) {
        for (x, y) in piece.occupied_positions() {
            if let Some((x, y)) = Self::index(x, y) {
                self.rows[y][x] = block;
            }
        }
    }

    /// Returns `true` when every cell in row `y` is filled.
    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows[y].iter().all(|block| !block.is_empty())
    }

    /// Removes every full row and returns the compacted board together with the removed rows.
    ///
    /// Rows are scanned bottom to top. Surviving rows keep their relative order and
    /// slide down to close the gaps; the same number of empty rows appear at the top.
    #[must_use]
    pub fn clear_full_rows(&self) -> (Self, LineClear) {
        let mut board = self.clone();
        let mut cleared = LineClear::default();
        for y in (0..BOARD_HEIGHT).rev() {
            if self.is_row_full(y) {
                cleared.rows.push(y);
                continue;
            }
            let shift = cleared.count();
            if shift > 0 {
                board.rows[y + shift] = self.rows[y];
            }
        }
        board.rows[..cleared.count()].fill(Self::EMPTY_ROW);
        (board, cleared)
    }
}
