use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};

use crate::api::types::Sentiment;
use crate::ui::AppState;

pub(super) fn render_news_feed(frame: &mut Frame<'_>, area: Rect, app: &AppState) {
    let block = Block::default()
        .title(format!(" News Feed ({}) ", app.news.len()))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let items: Vec<ListItem> = if app.news.is_empty() {
        vec![ListItem::new(Span::styled(
            "No news items",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.news
            .iter()
            .take(inner.height as usize)
            .map(|item| {
                let (badge, badge_color) = match item.sentiment {
                    Sentiment::Positive => ("▲", app.palette.success),
                    Sentiment::Neutral => ("●", Color::Gray),
                    Sentiment::Negative => ("▼", app.palette.secondary),
                };

                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", badge), Style::default().fg(badge_color)),
                    Span::raw(item.title.clone()),
                    Span::styled(
                        format!("  {} • {}", item.source, item.time),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect()
    };

    frame.render_widget(List::new(items), inner);
}
