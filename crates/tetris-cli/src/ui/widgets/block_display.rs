use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};
use tetris_engine::{Block, PieceKind};

use super::style;

/// One board cell, drawn two terminal columns wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub const fn width() -> u16 {
        2
    }

    pub const fn height() -> u16 {
        1
    }

    pub const fn from_block(block: Block, show_dots: bool) -> Self {
        match block {
            Block::Empty if show_dots => Self::new(style::EMPTY_DOT, "."),
            Block::Empty => Self::new(style::EMPTY, ""),
            Block::Ghost => Self::new(style::GHOST, "[]"),
            Block::Piece(kind) => Self::new(piece_style(kind), ""),
        }
    }

    /// Cell of a row that was just cleared.
    pub const fn flash() -> Self {
        Self::new(style::FLASH, "")
    }
}

const fn piece_style(kind: PieceKind) -> Style {
    match kind {
        PieceKind::I => style::I_BLOCK,
        PieceKind::O => style::O_BLOCK,
        PieceKind::T => style::T_BLOCK,
        PieceKind::S => style::S_BLOCK,
        PieceKind::Z => style::Z_BLOCK,
        PieceKind::J => style::J_BLOCK,
        PieceKind::L => style::L_BLOCK,
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Paragraph fills the whole area, not just the cells with the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_distinct_style() {
        for (i, a) in PieceKind::ALL.iter().enumerate() {
            for b in &PieceKind::ALL[i + 1..] {
                assert_ne!(piece_style(*a), piece_style(*b), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_empty_dots() {
        assert_eq!(BlockDisplay::from_block(Block::Empty, true).symbol, ".");
        assert_eq!(BlockDisplay::from_block(Block::Empty, false).symbol, "");
        assert_eq!(BlockDisplay::from_block(Block::Ghost, false).symbol, "[]");
    }

    #[test]
    fn test_render_fills_area() {
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        BlockDisplay::from_block(Block::Piece(PieceKind::I), false).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].bg, style::I_BLOCK.bg.unwrap());
        assert_eq!(buf[(1, 0)].bg, style::I_BLOCK.bg.unwrap());
    }
}
