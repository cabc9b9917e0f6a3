//! Simple CLI output implementation
//!
//! Provides welcome/overview output for dry-run mode and the demo
//! command's plain-text dashboard rendering.

use colored::Colorize;

use crate::AppResult;
use crate::analytics::{fear_index_label, format_percent, format_sentiment_score};
use crate::api::types::DashboardBundle;
use crate::config::Config;

/// Display the welcome page
pub fn display_welcome_page() -> AppResult<()> {
    println!();
    println!("┌─ MarketMood Sentiment Dashboard ───────────────────────────────────┐");
    println!("│                                                                     │");
    println!("│   News sentiment and market returns, side by side.                  │");
    println!("│   Press 'r' to refresh, 'd'/'s' to change range and source.         │");
    println!("│                                                                     │");
    println!("└─────────────────────────────────────────────────────────────────────┘");
    println!();
    Ok(())
}

/// Display configuration overview for dry-run mode
pub fn display_config_overview(config: &Config) -> AppResult<()> {
    println!("┌─ Configuration Overview ───────────────────────────────────────────┐");
    println!("│                                                                     │");
    println!("│   Configuration loaded successfully!                                │");
    println!("│                                                                     │");
    println!("│   Date range: {} days", config.date_range_days);
    println!("│   Data source: {}", config.data_source);
    println!("│   News limit: {}", config.news_limit);
    println!("│   Log level: {}", config.log_level);
    println!("│                                                                     │");
    println!("│   Backend API:");
    println!("│   • Base URL: {}", config.api.base_url);
    println!("│   • Timeout: {}s", config.api.timeout_seconds);
    println!("│                                                                     │");
    println!("│   Refresh:");
    println!(
        "│   • Auto refresh: {}",
        if config.refresh.auto_refresh {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!(
        "│   • Refresh on focus: {}",
        if config.refresh.refresh_on_focus {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!(
        "│   • Intervals: metrics {}ms, full {}ms, news {}ms",
        config.refresh.real_time_ms, config.refresh.metrics_ms, config.refresh.news_feed_ms
    );
    println!(
        "│   • Retry: {} attempts, {}ms delay",
        config.refresh.retry_attempts, config.refresh.retry_delay_ms
    );
    println!("│                                                                     │");
    println!("│   Sources: {} mapped", config.sources.len());
    println!(
        "│   Sentiment scores: {}",
        config
            .sentiment_scores
            .iter()
            .map(|(label, score)| format!("{}={}", label, score))
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("│                                                                     │");
    println!("└────────────────────────────────────────────────────────────────────┘");
    println!();

    Ok(())
}

/// Print one refresh cycle's results in plain text (demo command)
pub fn display_demo_bundle(bundle: &DashboardBundle, config: &Config) -> AppResult<()> {
    println!("{}", "MarketMood demo refresh".bold());
    println!();

    if let Some(summary) = &bundle.sentiment {
        println!(
            "Current sentiment: {}",
            format_sentiment_score(summary.current_sentiment).green()
        );
        let counts = &summary.sentiment_counts;
        println!(
            "Distribution: {} positive / {} neutral / {} negative",
            counts.positive, counts.neutral, counts.negative
        );
        println!(
            "Timeline: {} days ({} .. {})",
            summary.timeline.len(),
            summary.timeline.labels.first().cloned().unwrap_or_default(),
            summary.timeline.labels.last().cloned().unwrap_or_default()
        );
    } else {
        println!("Current sentiment: unavailable");
    }

    if let Some(correlation) = &bundle.correlation {
        println!(
            "Correlation: {}%  Fear index: {} ({})",
            correlation.correlation_percentage,
            correlation.fear_index,
            fear_index_label(correlation.fear_index)
        );
        if let (Some(score), Some(ret)) = (
            correlation.matches.sentiment.last(),
            correlation.matches.sp500.last(),
        ) {
            println!(
                "Latest matched day: sentiment {} vs return {}",
                format_sentiment_score(*score),
                format_percent(*ret)
            );
        }
    }

    if let Some(metrics) = &bundle.performance {
        println!(
            "Pipeline: {} articles, {} speed, sources {}",
            metrics.articles_analyzed, metrics.processing_speed, metrics.active_sources
        );
    }

    println!();
    println!("{}", "Recent news".bold());
    if bundle.news.is_empty() {
        println!("  (no news items)");
    } else {
        for item in &bundle.news {
            let badge = match item.sentiment {
                crate::api::types::Sentiment::Positive => "+".green(),
                crate::api::types::Sentiment::Neutral => "•".normal(),
                crate::api::types::Sentiment::Negative => "-".red(),
            };
            println!(
                "  {} {} ({} • {})",
                badge,
                item.title,
                config.source_display_name(&item.source),
                item.time
            );
        }
    }

    Ok(())
}
