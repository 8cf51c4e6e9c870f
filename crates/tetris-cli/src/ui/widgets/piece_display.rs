use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tetris_engine::{Block, MAX_SHAPE_SIZE, Piece};

use super::BlockDisplay;

#[allow(clippy::cast_possible_truncation)]
const PREVIEW_SIZE: u16 = MAX_SHAPE_SIZE as u16;

/// A single piece preview (next or held), trimmed to its filled cells and centered.
#[derive(Debug, Default)]
pub struct PieceDisplay<'a> {
    piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: Piece) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        PREVIEW_SIZE * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        PREVIEW_SIZE * BlockDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Returns the `(x, y)` offset and `(width, height)` of the filled part of `piece`'s box.
fn filled_bounds(piece: &Piece) -> ((usize, usize), (usize, usize)) {
    let mut cells = piece.shape().occupied_cells();
    let Some((x, y)) = cells.next() else {
        return ((0, 0), (0, 0));
    };
    let (min_x, min_y, max_x, max_y) = cells.fold((x, y, x, y), |(x0, y0, x1, y1), (x, y)| {
        (x0.min(x), y0.min(y), x1.max(x), y1.max(y))
    });
    ((min_x, min_y), (max_x - min_x + 1, max_y - min_y + 1))
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    #[expect(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(piece) = self.piece else {
            return;
        };
        let ((offset_x, offset_y), (width, height)) = filled_bounds(&piece);
        let piece_area = area.centered(
            Constraint::Length(width as u16 * BlockDisplay::width()),
            Constraint::Length(height as u16 * BlockDisplay::height()),
        );

        let col_constraints = (0..width).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..height).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let empty_block = BlockDisplay::from_block(Block::Empty, false);
        let occupied_block = BlockDisplay::from_block(Block::Piece(piece.kind()), false);
        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                if piece.shape().is_occupied(x + offset_x, y + offset_y) {
                    Widget::render(&occupied_block, grid_cell, buf);
                } else {
                    Widget::render(&empty_block, grid_cell, buf);
                }
            }
        }
    }
}
