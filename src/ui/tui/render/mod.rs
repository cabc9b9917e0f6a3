mod cards;
mod charts;
mod footer;
mod header;
mod news;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::ui::AppState;
use crate::ui::ui_manager::RenderState;

use self::cards::render_metric_cards;
use self::charts::{render_correlation_chart, render_sentiment_chart};
use self::footer::render_footer;
use self::header::render_header;
use self::news::render_news_feed;

pub(super) fn render_root(frame: &mut Frame<'_>, app: &mut AppState, render_state: &RenderState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Min(12),
            Constraint::Length(8),
            Constraint::Length(3),
        ])
        .split(frame.size());

    render_header(frame, chunks[0], app, render_state);
    render_metric_cards(frame, chunks[1], app);

    let chart_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    render_sentiment_chart(frame, chart_chunks[0], app);
    render_correlation_chart(frame, chart_chunks[1], app);

    render_news_feed(frame, chunks[3], app);
    render_footer(frame, chunks[4], app);
}
