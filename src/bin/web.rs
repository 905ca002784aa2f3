use clap::Parser;
use clinic_finder::config::web::WebConfig;
use clinic_finder::utils::{logger, validation::Validate};
use clinic_finder::web::{router, AppState};
use clinic_finder::ApiConfig;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = WebConfig::parse();

    logger::init_web_logger();

    if let Err(e) = options.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    // Refuse to start without a credential rather than failing on the
    // first form submission.
    let api = match ApiConfig::from_env() {
        Ok(api) => api,
        Err(e) => {
            tracing::error!("❌ Configuration loading failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(3);
        }
    };

    let bind = options.bind.clone();
    let state = AppState {
        api: Arc::new(api),
        options: Arc::new(options),
    };

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;

    Ok(())
}
