use crate::core::Pipeline;
use crate::utils::error::Result;

/// Drives one search-to-export run through its three stages and reports
/// progress. The engine owns no logic beyond sequencing.
pub struct SearchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SearchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Fetching listings...");
        let raw_listings = self.pipeline.extract().await?;
        tracing::info!("Fetched {} listings", raw_listings.len());

        tracing::info!("Normalizing and building spreadsheet...");
        let result = self.pipeline.transform(raw_listings).await?;
        tracing::info!("Normalized {} records", result.records.len());

        tracing::info!("Writing spreadsheet...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
