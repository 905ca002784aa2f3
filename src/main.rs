use clap::Parser;
use clinic_finder::utils::{logger, validation::Validate};
use clinic_finder::{
    ApiConfig, CliConfig, LocalStorage, PlacesClient, SearchEngine, SearchPipeline,
};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting clinic-finder CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    // The API credential is a startup requirement: without it there is
    // nothing to search.
    let api = match ApiConfig::from_env() {
        Ok(api) => api,
        Err(e) => {
            tracing::error!("❌ Configuration loading failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(3);
        }
    };

    let output_dir = config.output_path.clone();
    let client = PlacesClient::new(&api)?;
    let storage = LocalStorage::new(output_dir.clone());
    let pipeline = SearchPipeline::new(storage, config, client);

    let engine = SearchEngine::new(pipeline);

    match engine.run().await {
        Ok(file_name) => {
            let full_path = Path::new(&output_dir).join(&file_name);
            tracing::info!("✅ Export completed successfully!");
            println!("✅ Export completed successfully!");
            println!("📁 Output saved to: {}", full_path.display());
        }
        Err(e) => {
            tracing::error!(
                "❌ Export failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                clinic_finder::utils::error::ErrorSeverity::Low => 0,
                clinic_finder::utils::error::ErrorSeverity::Medium => 2,
                clinic_finder::utils::error::ErrorSeverity::High => 1,
                clinic_finder::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
