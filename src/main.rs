use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prestige_rental::{build_router, cache, config::Config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "prestige_rental=info,tower_http=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(backend = %config.backend_api_url, "Using rental backend");

    let state = AppState::new(config.clone())?;
    tokio::spawn(cache::start_cache_warmer(
        state.catalog.clone(),
        config.cache_warm_interval,
    ));

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
