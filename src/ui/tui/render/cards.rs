use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::analytics::{fear_index_label, format_sentiment_score};
use crate::ui::AppState;

pub(super) fn render_metric_cards(frame: &mut Frame<'_>, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    render_sentiment_card(frame, chunks[0], app);
    render_fear_index_card(frame, chunks[1], app);
    render_correlation_card(frame, chunks[2], app);
    render_pipeline_card(frame, chunks[3], app);
}

fn render_sentiment_card(frame: &mut Frame<'_>, area: Rect, app: &AppState) {
    let block = Block::default()
        .title(" Current Sentiment ")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();

    if let Some(summary) = &app.sentiment {
        let value_color = if summary.current_sentiment >= 0.0 {
            app.palette.success
        } else {
            app.palette.secondary
        };
        lines.push(Line::from(Span::styled(
            format_sentiment_score(summary.current_sentiment),
            Style::default()
                .fg(value_color)
                .add_modifier(Modifier::BOLD),
        )));

        let counts = &summary.sentiment_counts;
        lines.push(Line::from(vec![
            Span::styled(
                format!("▲ {}", counts.positive),
                Style::default().fg(app.palette.success),
            ),
            Span::raw("  "),
            Span::styled(
                format!("● {}", counts.neutral),
                Style::default().fg(Color::Gray),
            ),
            Span::raw("  "),
            Span::styled(
                format!("▼ {}", counts.negative),
                Style::default().fg(app.palette.secondary),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("{} articles", counts.total()),
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(placeholder_line());
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn render_fear_index_card(frame: &mut Frame<'_>, area: Rect, app: &AppState) {
    let block = Block::default().title(" Fear Index ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();

    if let Some(correlation) = &app.correlation {
        let fear = correlation.fear_index;
        let color = if fear >= 60 {
            app.palette.secondary
        } else if fear >= 40 {
            app.palette.warning
        } else {
            app.palette.success
        };

        lines.push(Line::from(Span::styled(
            format!("{}", fear),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            fear_index_label(fear),
            Style::default().fg(Color::Gray),
        )));
    } else {
        lines.push(placeholder_line());
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn render_correlation_card(frame: &mut Frame<'_>, area: Rect, app: &AppState) {
    let block = Block::default()
        .title(" Correlation ")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();

    if let Some(correlation) = &app.correlation {
        lines.push(Line::from(Span::styled(
            format!("{}%", correlation.correlation_percentage),
            Style::default()
                .fg(app.palette.primary)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("{} matched days", correlation.matches.len()),
            Style::default().fg(Color::Gray),
        )));
    } else {
        lines.push(placeholder_line());
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn render_pipeline_card(frame: &mut Frame<'_>, area: Rect, app: &AppState) {
    let block = Block::default().title(" Pipeline ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();

    if let Some(metrics) = &app.performance {
        lines.push(Line::from(vec![
            Span::styled("Articles: ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{}", metrics.articles_analyzed)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Speed: ", Style::default().fg(Color::Gray)),
            Span::raw(metrics.processing_speed.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Sources: ", Style::default().fg(Color::Gray)),
            Span::raw(metrics.active_sources.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Updated: ", Style::default().fg(Color::Gray)),
            Span::raw(metrics.last_update.clone()),
        ]));
    } else {
        lines.push(placeholder_line());
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn placeholder_line() -> Line<'static> {
    Line::from(Span::styled("--", Style::default().fg(Color::DarkGray)))
}
