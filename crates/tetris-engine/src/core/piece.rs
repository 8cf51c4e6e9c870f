use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::board::BOARD_WIDTH;

/// Side length of the largest bounding box (the I-piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Tetromino type.
///
/// The discriminant doubles as the piece's color tag on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 1,
    /// O-piece.
    O = 2,
    /// T-piece.
    T = 3,
    /// S-piece.
    S = 4,
    /// Z-piece.
    Z = 5,
    /// J-piece.
    J = 6,
    /// L-piece.
    L = 7,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in color order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Returns the color tag (1 to 7) written to the board for this kind.
    #[must_use]
    pub const fn color(self) -> u8 {
        self as u8
    }

    /// Returns the spawn-orientation shape.
    #[must_use]
    pub const fn shape(self) -> Shape {
        match self {
            PieceKind::I => Shape::I,
            PieceKind::O => Shape::O,
            PieceKind::T => Shape::T,
            PieceKind::S => Shape::S,
            PieceKind::Z => Shape::Z,
            PieceKind::J => Shape::J,
            PieceKind::L => Shape::L,
        }
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }
}

/// Occupancy grid of a piece inside its square bounding box.
///
/// Only the top-left `size × size` corner of `cells` is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    size: usize,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    const I: Self = Self::from_rows(
        4,
        [
            [0, 0, 0, 0], //
            [1, 1, 1, 1],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ],
    );
    const O: Self = Self::from_rows(
        2,
        [
            [1, 1, 0, 0], //
            [1, 1, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ],
    );
    const T: Self = Self::from_rows(
        3,
        [
            [0, 1, 0, 0], //
            [1, 1, 1, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ],
    );
    const S: Self = Self::from_rows(
        3,
        [
            [0, 1, 1, 0], //
            [1, 1, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ],
    );
    const Z: Self = Self::from_rows(
        3,
        [
            [1, 1, 0, 0], //
            [0, 1, 1, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ],
    );
    const J: Self = Self::from_rows(
        3,
        [
            [1, 0, 0, 0], //
            [1, 1, 1, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ],
    );
    const L: Self = Self::from_rows(
        3,
        [
            [0, 0, 1, 0], //
            [1, 1, 1, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ],
    );

    const fn from_rows(size: usize, rows: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < MAX_SHAPE_SIZE {
            let mut x = 0;
            while x < MAX_SHAPE_SIZE {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self { size, cells }
    }

    pub(super) const fn from_cells(
        size: usize,
        cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    ) -> Self {
        Self { size, cells }
    }

    /// Returns the side length of the bounding box.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the cell at `(x, y)` of the bounding box is filled.
    #[must_use]
    pub const fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.cells[y][x]
    }

    /// Returns the filled `(x, y)` cells relative to the bounding box, row by row.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size).flat_map(move |y| {
            (0..self.size).filter_map(move |x| self.is_occupied(x, y).then_some((x, y)))
        })
    }
}

/// Board-relative position of a piece's bounding-box top-left corner.
///
/// `y` may be negative while a piece hangs above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PiecePosition {
    pub x: i32,
    pub y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Spawn position for a shape: horizontally centered, touching the top row.
    #[must_use]
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub const fn spawn_for(shape: &Shape) -> Self {
        let x = (BOARD_WIDTH / 2) as i32 - (shape.size() / 2) as i32;
        Self { x, y: 0 }
    }

    /// Position a piece returns to when it leaves or enters the hold slot.
    ///
    /// Unlike [`spawn_for`](Self::spawn_for) this column is the same for every shape.
    #[must_use]
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub const fn hold_spawn() -> Self {
        Self {
            x: (BOARD_WIDTH / 2) as i32 - 1,
            y: 0,
        }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A tetromino with its current shape and position.
///
/// Pieces are immutable values: moving or rotating returns a new `Piece`.
/// Whether the result fits on a board is the board's call, see
/// [`Board::is_valid_position`](super::Board::is_valid_position).
///
/// # Example
///
/// ```
/// use tetris_engine::{Piece, PieceKind, PiecePosition};
///
/// let piece = Piece::spawn(PieceKind::T);
/// assert_eq!(piece.position(), PiecePosition::new(4, 0));
///
/// let moved = piece.moved(-1, 2);
/// assert_eq!(moved.position(), PiecePosition::new(3, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    position: PiecePosition,
}

impl Piece {
    /// Creates a piece of `kind` in spawn orientation at its spawn position.
    #[must_use]
    pub const fn spawn(kind: PieceKind) -> Self {
        let shape = kind.shape();
        Self {
            kind,
            shape,
            position: PiecePosition::spawn_for(&shape),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub const fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub const fn with_position(self, position: PiecePosition) -> Self {
        Self { position, ..self }
    }

    #[must_use]
    pub(super) const fn with_shape(self, shape: Shape) -> Self {
        Self { shape, ..self }
    }

    #[must_use]
    pub const fn moved(self, dx: i32, dy: i32) -> Self {
        self.with_position(self.position.offset(dx, dy))
    }

    /// Moves the piece to [`PiecePosition::hold_spawn`], keeping its orientation.
    #[must_use]
    pub const fn respawned(self) -> Self {
        self.with_position(PiecePosition::hold_spawn())
    }

    /// Returns the board coordinates covered by the piece at its current position.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.occupied_positions_at(self.position)
    }

    /// Returns the board coordinates the piece would cover at `position`.
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn occupied_positions_at(
        &self,
        position: PiecePosition,
    ) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied_cells()
            .map(move |(dx, dy)| (position.x + dx as i32, position.y + dy as i32))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.shape().occupied_cells().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_shape_sizes() {
        assert_eq!(PieceKind::I.shape().size(), 4);
        assert_eq!(PieceKind::O.shape().size(), 2);
        for kind in [
            PieceKind::T,
            PieceKind::S,
            PieceKind::Z,
            PieceKind::J,
            PieceKind::L,
        ] {
            assert_eq!(kind.shape().size(), 3, "{kind:?}");
        }
    }

    #[test]
    fn test_colors_match_discriminants() {
        let colors: Vec<_> = PieceKind::ALL.iter().map(|kind| kind.color()).collect();
        assert_eq!(colors, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_spawn_positions() {
        assert_eq!(
            Piece::spawn(PieceKind::I).position(),
            PiecePosition::new(3, 0)
        );
        for kind in PieceKind::ALL.into_iter().skip(1) {
            assert_eq!(
                Piece::spawn(kind).position(),
                PiecePosition::new(4, 0),
                "{kind:?}"
            );
        }
    }

    #[test]
    fn test_i_piece_occupies_second_row() {
        let cells: Vec<_> = Piece::spawn(PieceKind::I).occupied_positions().collect();
        assert_eq!(cells, vec![(3, 1), (4, 1), (5, 1), (6, 1)]);
    }

    #[test]
    fn test_chars() {
        let chars: String = PieceKind::ALL.iter().map(|kind| kind.as_char()).collect();
        assert_eq!(chars, "IOTSZJL");
    }

    #[test]
    fn test_random_draws_cover_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..500 {
            let kind: PieceKind = rng.random();
            seen[kind.color() as usize - 1] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_respawned_keeps_shape() {
        let piece = Piece::spawn(PieceKind::L).rotated().moved(3, 10);
        let respawned = piece.respawned();
        assert_eq!(respawned.shape(), piece.shape());
        assert_eq!(respawned.position(), PiecePosition::new(4, 0));
    }

    #[test]
    fn test_respawned_column_is_shared_by_all_kinds() {
        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind).moved(2, 5).respawned();
            assert_eq!(piece.position(), PiecePosition::new(4, 0), "{kind:?}");
        }
    }
}
