use chrono::Utc;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::analytics::format_time_ago;
use crate::api::types::ConnectionStatus;
use crate::ui::AppState;
use crate::ui::ui_manager::RenderState;

pub(super) fn render_header(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &AppState,
    render_state: &RenderState,
) {
    let title = Span::styled(
        " MarketMood Sentiment Dashboard ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let status = match app.connection_status {
        ConnectionStatus::Connected => {
            Span::styled("● Connected ", Style::default().fg(Color::Green))
        }
        ConnectionStatus::Loading => {
            Span::styled("● Loading ", Style::default().fg(Color::Yellow))
        }
        ConnectionStatus::Disconnected => {
            Span::styled("● Disconnected ", Style::default().fg(Color::Red))
        }
    };

    let updated = match app.last_update {
        Some(at) => format!("Updated: {} ", format_time_ago(at, Utc::now())),
        None => "Updated: never ".to_string(),
    };

    let mut spans = vec![
        title,
        Span::raw(" "),
        status,
        Span::raw(" "),
        Span::styled(updated, Style::default().fg(Color::Gray)),
    ];

    if let Some(error) = &render_state.error_message {
        spans.push(Span::styled(
            format!(" {}", error),
            Style::default().fg(Color::Red),
        ));
    } else if let Some(info) = &render_state.info_message {
        spans.push(Span::styled(
            format!(" {}", info),
            Style::default().fg(Color::LightBlue),
        ));
    }

    let block = Block::default().borders(Borders::ALL).title(" Status ");
    let paragraph = Paragraph::new(vec![Line::from(spans)])
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
