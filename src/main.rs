use actix_web::{App, HttpServer};
use anyhow::Context;
use payrelay::config::{AppConfig, Config};
use payrelay::middleware::{build_cors, RequestId};
use payrelay::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    init_tracing(&config.app);

    tracing::info!("Starting PayRelay payment relay");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Gateway strategy: {}", config.gateway.strategy());
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let state = AppState::from_config(&config).context("Failed to build application state")?;

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let allowed_origins = config.cors.allowed_origins.clone();
    let server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(build_cors(&allowed_origins))
            .wrap(RequestId)
            .configure(move |cfg| state.configure(cfg))
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await.context("Server terminated with an error")
}

fn init_tracing(app: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("payrelay={},actix_web=info", app.log_level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if app.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
