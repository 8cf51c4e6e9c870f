use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    block_display::*, board_display::*, game_display::*, game_stats_display::*,
    key_binding_display::*, piece_display::*,
};

mod block_display;
mod board_display;
mod game_display;
mod game_stats_display;
mod key_binding_display;
mod piece_display;

mod color {
    use ratatui::style::Color;

    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const ORANGE: Color = Color::Rgb(255, 127, 0);
    pub const MAGENTA: Color = Color::Rgb(255, 0, 255);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::Rgb(63, 63, 63);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

mod style {
    use ratatui::style::{Color, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const MUTED: Style = fg_bg(color::GRAY, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::DARK_GRAY, color::BLACK);
    pub const GHOST: Style = fg_bg(color::GRAY, color::BLACK);
    pub const FLASH: Style = bg_only(color::WHITE);

    pub const I_BLOCK: Style = bg_only(color::CYAN);
    pub const O_BLOCK: Style = bg_only(color::YELLOW);
    pub const S_BLOCK: Style = bg_only(color::GREEN);
    pub const Z_BLOCK: Style = bg_only(color::RED);
    pub const J_BLOCK: Style = bg_only(color::BLUE);
    pub const L_BLOCK: Style = bg_only(color::ORANGE);
    pub const T_BLOCK: Style = bg_only(color::MAGENTA);
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let outer = Rect::new(0, 0, 100, 100);
    let inner = block.map_or(outer, |block| block.inner(outer));
    outer.height - inner.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let outer = Rect::new(0, 0, 100, 100);
    let inner = block.map_or(outer, |block| block.inner(outer));
    outer.width - inner.width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_margins() {
        assert_eq!(block_vertical_margin(None), 0);
        assert_eq!(block_horizontal_margin(None), 0);

        let bordered = BlockWidget::bordered();
        assert_eq!(block_vertical_margin(Some(&bordered)), 2);
        assert_eq!(block_horizontal_margin(Some(&bordered)), 2);
    }
}
