use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use std::time::Instant;

use crate::ui::AppState;

pub(super) fn render_footer(frame: &mut Frame<'_>, area: Rect, app: &AppState) {
    let refresh_label = if app.is_loading || !app.refresh_control_ready(Instant::now()) {
        Span::styled(
            "[r] Refreshing...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::DIM),
        )
    } else {
        Span::styled("[r] Refresh", Style::default().fg(Color::White))
    };

    let line = Line::from(vec![
        refresh_label,
        separator(),
        Span::raw(format!("[d] Range: {}d", app.date_range_days)),
        separator(),
        Span::raw(format!("[s] Source: {}", app.data_source_display())),
        separator(),
        Span::styled("[Ctrl+R] Force refresh", Style::default().fg(Color::Gray)),
        separator(),
        Span::styled("[q] Quit", Style::default().fg(Color::Gray)),
    ]);

    let block = Block::default().borders(Borders::ALL).title(" Controls ");
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn separator() -> Span<'static> {
    Span::styled("  |  ", Style::default().fg(Color::DarkGray))
}
