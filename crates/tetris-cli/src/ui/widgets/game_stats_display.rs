use std::{iter, time::Duration};

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tetris_engine::GameSession;

use super::style;

pub struct GameStatsDisplay<'a> {
    session: &'a GameSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> GameStatsDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(ROWS.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(&GameSession) -> String),
    LabelValue(&'static str, &'static dyn Fn(&GameSession) -> String),
}

fn format_play_time(time: Duration) -> String {
    format!(
        "{}:{:0>2}.{:0>2}",
        time.as_secs() / 60,
        time.as_secs() % 60,
        time.subsec_millis() / 10
    )
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|session| session.state().score().to_string()),
    Row::FullLabel("TIME:"),
    Row::FullValue(&|session| format_play_time(session.play_time())),
    Row::Empty,
    Row::LabelValue("LEVEL:", &|session| session.state().level().to_string()),
    Row::LabelValue("LINES:", &|session| session.state().lines().to_string()),
    Row::Empty,
    Row::LabelValue("PIECES:", &|session| {
        session.state().stats().completed_pieces().to_string()
    }),
    Row::LabelValue("SINGLES:", &|session| {
        session.state().stats().line_cleared_counter()[1].to_string()
    }),
    Row::LabelValue("DOUBLES:", &|session| {
        session.state().stats().line_cleared_counter()[2].to_string()
    }),
    Row::LabelValue("TRIPLES:", &|session| {
        session.state().stats().line_cleared_counter()[3].to_string()
    }),
    Row::LabelValue("TETRIS:", &|session| {
        session.state().stats().line_cleared_counter()[4].to_string()
    }),
];

impl Widget for GameStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.session), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.session), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
