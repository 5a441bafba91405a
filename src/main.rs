use meetup_votes::shell::config::AppConfig;
use meetup_votes::shell::logging;
use meetup_votes::shell::state::AppState;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init(&AppConfig::log_filter_from_env())?;
    let config = AppConfig::from_env()?;

    let (state, dispatcher) = AppState::build(&config);
    let dispatcher = dispatcher.spawn();
    info!(
        dispatch_queue_capacity = config.dispatch_queue_capacity,
        mailbox_capacity = config.mailbox_capacity,
        max_query_results = config.max_query_results,
        weekday_offset = %config.weekday_offset,
        "meetup votes core started"
    );

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    drop(state);
    dispatcher.await?;
    Ok(())
}
