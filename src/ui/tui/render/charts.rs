use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use crate::analytics::{format_percent, format_sentiment_score};
use crate::ui::AppState;
use crate::ui::charts::CorrelationChartState;

pub(super) fn render_sentiment_chart(frame: &mut Frame<'_>, area: Rect, app: &AppState) {
    let block = Block::default()
        .title(" Sentiment Over Time ")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(chart_state) = app.charts.sentiment() else {
        render_chart_placeholder(frame, inner);
        return;
    };

    if chart_state.sentiment.is_empty() || inner.width < 12 || inner.height < 4 {
        render_chart_placeholder(frame, inner);
        return;
    }

    let points: Vec<(f64, f64)> = chart_state
        .sentiment
        .iter()
        .enumerate()
        .map(|(idx, value)| (idx as f64, *value))
        .collect();

    let mut min_y = chart_state
        .sentiment
        .iter()
        .cloned()
        .fold(f64::INFINITY, f64::min);
    let mut max_y = chart_state
        .sentiment
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    if (max_y - min_y).abs() < f64::EPSILON {
        min_y -= 0.5;
        max_y += 0.5;
    } else {
        let padding = (max_y - min_y) * 0.1;
        min_y -= padding;
        max_y += padding;
    }

    let max_x = (chart_state.sentiment.len() - 1).max(1) as f64;

    let datasets = vec![
        Dataset::default()
            .name("Sentiment Score")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.palette.primary))
            .data(&points),
    ];

    let first_label = chart_state.labels.first().cloned().unwrap_or_default();
    let last_label = chart_state.labels.last().cloned().unwrap_or_default();

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_x])
                .labels(vec![Span::raw(first_label), Span::raw(last_label)]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([min_y, max_y])
                .labels(vec![
                    Span::raw(format_sentiment_score(min_y)),
                    Span::raw(format_sentiment_score((min_y + max_y) / 2.0)),
                    Span::raw(format_sentiment_score(max_y)),
                ]),
        );

    frame.render_widget(chart, inner);
}

pub(super) fn render_correlation_chart(frame: &mut Frame<'_>, area: Rect, app: &AppState) {
    let block = Block::default()
        .title(" Sentiment vs S&P 500 ")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(chart_state) = app.charts.correlation() else {
        render_chart_placeholder(frame, inner);
        return;
    };

    if chart_state.sentiment.is_empty() || inner.width < 16 || inner.height < 6 {
        render_chart_placeholder(frame, inner);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    render_legend(frame, chunks[0], app);
    draw_grouped_bars(frame, chunks[1], chunks[2], chart_state, app);
    render_latest_values(frame, chunks[3], chart_state);
}

fn render_legend(frame: &mut Frame<'_>, area: Rect, app: &AppState) {
    let legend = Line::from(vec![
        Span::styled("█ Sentiment", Style::default().fg(app.palette.primary)),
        Span::raw("   "),
        Span::styled(
            "█ S&P 500 Return (%)",
            Style::default().fg(app.palette.secondary),
        ),
    ]);
    frame.render_widget(Paragraph::new(legend), area);
}

/// Two bars per day around a shared zero axis, one group per label
fn draw_grouped_bars(
    frame: &mut Frame<'_>,
    area: Rect,
    label_area: Rect,
    chart_state: &CorrelationChartState,
    app: &AppState,
) {
    const GROUP_WIDTH: u16 = 5;

    if area.width < GROUP_WIDTH || area.height < 3 {
        return;
    }

    let visible = ((area.width / GROUP_WIDTH) as usize).min(chart_state.sentiment.len());
    if visible == 0 {
        return;
    }
    let offset = chart_state.sentiment.len() - visible;

    let sentiment = &chart_state.sentiment[offset..];
    let sp500 = &chart_state.sp500[offset..];
    let labels = &chart_state.labels[offset..];

    let max_abs = sentiment
        .iter()
        .chain(sp500.iter())
        .fold(0.0_f64, |acc, value| acc.max(value.abs()))
        .max(f64::EPSILON);

    let axis_y = area.y + area.height / 2;
    let half_span = (area.height / 2).max(1) as f64;

    let buffer = frame.buffer_mut();

    // zero axis
    for x in area.x..area.x + area.width {
        buffer
            .get_mut(x, axis_y)
            .set_style(Style::default().fg(Color::DarkGray))
            .set_symbol("─");
    }

    for (idx, (score, ret)) in sentiment.iter().zip(sp500.iter()).enumerate() {
        let group_x = area.x + idx as u16 * GROUP_WIDTH;

        draw_bar(
            buffer,
            area,
            axis_y,
            group_x,
            *score,
            max_abs,
            half_span,
            Style::default().fg(app.palette.primary),
        );
        draw_bar(
            buffer,
            area,
            axis_y,
            group_x + 2,
            *ret,
            max_abs,
            half_span,
            Style::default().fg(app.palette.secondary),
        );

        // day label centered under the group
        if label_area.height > 0 {
            let label = labels.get(idx).map(String::as_str).unwrap_or("");
            let label: String = label.chars().take(GROUP_WIDTH as usize).collect();
            if group_x + label.len() as u16 <= label_area.x + label_area.width {
                buffer.set_string(
                    group_x,
                    label_area.y,
                    label,
                    Style::default().fg(Color::Gray),
                );
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_bar(
    buffer: &mut ratatui::buffer::Buffer,
    area: Rect,
    axis_y: u16,
    x: u16,
    value: f64,
    max_abs: f64,
    half_span: f64,
    style: Style,
) {
    let magnitude = ((value.abs() / max_abs) * (half_span - 1.0)).round() as u16;
    if magnitude == 0 {
        return;
    }

    for step in 1..=magnitude {
        let y = if value >= 0.0 {
            axis_y.saturating_sub(step)
        } else {
            axis_y + step
        };

        for col in [x, x + 1] {
            if within(area, col, y) {
                buffer.get_mut(col, y).set_style(style).set_symbol("█");
            }
        }
    }
}

fn render_latest_values(frame: &mut Frame<'_>, area: Rect, chart_state: &CorrelationChartState) {
    let text = match (chart_state.sentiment.last(), chart_state.sp500.last()) {
        (Some(score), Some(ret)) => format!(
            "Latest — Sentiment: {}  S&P 500: {}",
            format_sentiment_score(*score),
            format_percent(*ret)
        ),
        _ => String::new(),
    };

    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        area,
    );
}

fn within(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

fn render_chart_placeholder(frame: &mut Frame<'_>, area: Rect) {
    frame.render_widget(
        Paragraph::new("Collecting sentiment data...")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        area,
    );
}
