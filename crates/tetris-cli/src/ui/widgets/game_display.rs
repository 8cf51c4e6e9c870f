use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use tetris_engine::{Board, GameSession, GameStatus};

use super::{BoardDisplay, GameStatsDisplay, PieceDisplay, color, style};

/// Full game screen: hold and stats on the left, the board, and the next piece on the right.
#[derive(Debug)]
pub struct GameDisplay<'a> {
    session: &'a GameSession,
    show_ghost: bool,
    flash: bool,
    muted: bool,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> GameDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            show_ghost: true,
            flash: false,
            muted: false,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    pub fn show_ghost(self, show_ghost: bool) -> Self {
        Self { show_ghost, ..self }
    }

    /// Highlights the rows of the pending line clear.
    pub fn flash(self, flash: bool) -> Self {
        Self { flash, ..self }
    }

    pub fn muted(self, muted: bool) -> Self {
        Self { muted, ..self }
    }

    pub fn height(&self) -> u16 {
        BoardDisplay::new(Board::new())
            .block(Block::bordered())
            .height()
    }

    fn panel(&self, title: &'a str, border_style: Color) -> Block<'a> {
        Block::bordered()
            .title(Line::from(title).centered())
            .padding(Padding::symmetric(
                self.horizontal_padding,
                self.vertical_padding,
            ))
            .border_style(border_style)
            .style(style::DEFAULT)
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let state = self.session.state();
        let border_style = match state.status() {
            GameStatus::Playing => color::WHITE,
            GameStatus::Paused => color::YELLOW,
            GameStatus::GameOver => color::RED,
        };

        let game_board = {
            let widget = BoardDisplay::new(state.render_board(self.show_ghost)).block(
                Block::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
            match state.last_line_clear() {
                Some(line_clear) if self.flash => widget.flash(line_clear),
                _ => widget,
            }
        };
        let hold_panel = {
            let panel = PieceDisplay::new().block(self.panel("HOLD", border_style));
            match state.hold_piece() {
                Some(piece) => panel.piece(*piece),
                None => panel,
            }
        };
        let next_panel = {
            let panel = PieceDisplay::new().block(self.panel("NEXT", border_style));
            match state.next_piece() {
                Some(piece) => panel.piece(*piece),
                None => panel,
            }
        };
        let stats_title = if self.muted { "STATS (MUTED)" } else { "STATS" };
        let game_stats =
            GameStatsDisplay::new(self.session).block(self.panel(stats_title, border_style));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(u16::max(hold_panel.width(), game_stats.width())),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [hold_area, stats_area] = Layout::vertical([
            Constraint::Length(hold_panel.height()),
            Constraint::Length(game_stats.height()),
        ])
        .spacing(1)
        .areas(left_column);
        let hold_area = hold_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(hold_panel.width())]).flex(Flex::End),
        )[0];
        let stats_area = stats_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(game_stats.width())]).flex(Flex::End),
        )[0];

        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        hold_panel.render(hold_area, buf);
        game_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        let popup = match state.status() {
            GameStatus::Playing => None,
            GameStatus::Paused => {
                Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW)))
            }
            GameStatus::GameOver => {
                Some(("GAME OVER!!", Style::new().fg(color::WHITE).bg(color::RED)))
            }
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use tetris_engine::{Command, PieceSeed};

    use super::*;

    fn render(display: &GameDisplay<'_>) -> Buffer {
        let area = Rect::new(0, 0, 80, display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        buf
    }

    fn contains(buf: &Buffer, needle: &str) -> bool {
        let area = buf.area;
        (0..area.height).any(|y| {
            let row: String = (0..area.width).map(|x| buf[(x, y)].symbol()).collect();
            row.contains(needle)
        })
    }

    fn session() -> GameSession {
        GameSession::with_seed(PieceSeed::from_bytes([5; 16]))
    }

    #[test]
    fn test_height_fits_board() {
        let session = session();
        assert_eq!(GameDisplay::new(&session).height(), 22);
    }

    #[test]
    fn test_panels_are_titled() {
        let session = session();
        let buf = render(&GameDisplay::new(&session));
        assert!(contains(&buf, "HOLD"));
        assert!(contains(&buf, "NEXT"));
        assert!(contains(&buf, "STATS"));
        assert!(!contains(&buf, "PAUSED"));
    }

    #[test]
    fn test_muted_title() {
        let session = session();
        let buf = render(&GameDisplay::new(&session).muted(true));
        assert!(contains(&buf, "STATS (MUTED)"));
    }

    #[test]
    fn test_paused_popup() {
        let mut session = session();
        session.dispatch(Command::TogglePause).unwrap();
        let buf = render(&GameDisplay::new(&session));
        assert!(contains(&buf, "PAUSED"));
    }
}
