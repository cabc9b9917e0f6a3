use std::sync::Arc;

use marketmood::api::{ApiClient, DataFeed, RestFeed, SampleFeed, types::DashboardBundle};
use marketmood::cli::{Cli, Commands};
use marketmood::config::Config;
use marketmood::dashboard::{ChannelPresenter, DashboardOrchestrator};
use marketmood::ui::ui_manager::UiManager;
use marketmood::{AppResult, init_logging, ui};

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse_args();

    // Load configuration
    let config = Config::load_or_default(&cli.config_file);

    // Initialize logging
    let _log_guard = init_logging(&cli.effective_log_level(), &config.log.file_path)?;

    tracing::info!("MarketMood Sentiment Dashboard starting...");
    tracing::debug!("CLI arguments: {:?}", cli);

    match cli.command() {
        Commands::Config { action } => {
            Config::handle_command(&action)?;
            return Ok(());
        }
        Commands::Demo => {
            return run_demo(&config).await;
        }
        Commands::Dashboard => {}
    }

    if cli.is_dry_run_mode() {
        ui::cli::display_welcome_page()?;
        ui::cli::display_config_overview(&config)?;
        println!("Dry-run mode configuration:");
        println!("Config file: {}", cli.config_file);
        println!("Log level: {}", cli.effective_log_level());
        return Ok(());
    }

    run_dashboard(&cli, config).await
}

/// Wire the feed, orchestrator, and UI together and run until shutdown
async fn run_dashboard(cli: &Cli, config: Config) -> AppResult<()> {
    let feed: Arc<dyn DataFeed> = if cli.live {
        tracing::info!("Using live backend feed at {}", config.api.base_url);
        Arc::new(RestFeed::new(ApiClient::new(&config.api)))
    } else {
        tracing::info!("Using built-in sample feed");
        Arc::new(SampleFeed::new())
    };

    let mut ui_manager = UiManager::new(&config);
    let presenter = Box::new(ChannelPresenter::new(ui_manager.surface_sender()));

    let mut orchestrator = DashboardOrchestrator::new(config, feed, presenter);
    orchestrator.attach_surface(ui_manager.surface_sender());
    ui_manager.attach_dashboard(orchestrator.event_sender());

    orchestrator.initialize()?;

    // Run the UI loop alongside the orchestrator event loop
    let ui_task = tokio::spawn(async move {
        if let Err(e) = ui_manager.run().await {
            tracing::error!("UI manager error: {}", e);
        }
    });

    orchestrator.run().await?;
    ui_task.await?;

    tracing::info!("MarketMood shut down cleanly");
    Ok(())
}

/// Run one sample refresh cycle and print the results
async fn run_demo(config: &Config) -> AppResult<()> {
    let feed = SampleFeed::new();

    let (sentiment, correlation, news, performance) = tokio::try_join!(
        feed.fetch_sentiment_summary(config.date_range_days, &config.data_source),
        feed.fetch_correlation_data(config.date_range_days),
        feed.fetch_recent_news(config.news_limit, &config.data_source),
        feed.fetch_performance_metrics(),
    )?;

    let bundle = DashboardBundle {
        sentiment,
        correlation,
        news,
        performance,
    };

    ui::cli::display_demo_bundle(&bundle, config)?;
    Ok(())
}
