use crate::domain::model::{Area, RawListing, Specialty, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn areas(&self) -> &[Area];
    /// Empty slice means "any specialty" (one unfiltered query per area).
    fn specialties(&self) -> &[Specialty];
    fn max_results(&self) -> usize;
    fn fetch_details(&self) -> bool;
    fn file_name(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawListing>>;
    async fn transform(&self, data: Vec<RawListing>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
