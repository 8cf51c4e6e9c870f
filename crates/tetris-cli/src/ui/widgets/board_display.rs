use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tetris_engine::{Board, LineClear};

use super::BlockDisplay;

/// The playfield, with an optional highlight over rows that were just cleared.
///
/// The highlight marks row positions: the cleared rows are already gone from `board`,
/// so every cell drawn at those positions, whatever it now holds, is flashed.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: Board,
    flash: Option<&'a LineClear>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    /// Creates a display of `board`, already composed with the falling piece and ghost.
    pub fn new(board: Board) -> Self {
        Self {
            board,
            flash: None,
            block: None,
        }
    }

    pub fn flash(self, line_clear: &'a LineClear) -> Self {
        Self {
            flash: Some(line_clear),
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
        u16::try_from(Board::WIDTH).unwrap_or(u16::MAX) * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(Board::HEIGHT).unwrap_or(u16::MAX) * BlockDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }

    fn is_flashing(&self, y: usize) -> bool {
        self.flash.is_some_and(|line_clear| line_clear.rows().contains(&y))
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..Board::WIDTH).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..Board::HEIGHT).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<{ Board::HEIGHT }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ Board::WIDTH }>(&horizontal));

        for (y, (grid_row, row)) in iter::zip(grid_cells, self.board.rows()).enumerate() {
            let flashing = self.is_flashing(y);
            for (grid_cell, block) in iter::zip(grid_row, row) {
                let block_display = if flashing {
                    BlockDisplay::flash()
                } else {
                    BlockDisplay::from_block(*block, true)
                };
                block_display.render(grid_cell, buf);
            }
        }
    }
}
