use crate::core::normalize::normalize;
use crate::core::places::PlacesClient;
use crate::core::query::SearchQuery;
use crate::core::{export, ConfigProvider, Pipeline, RawListing, Storage, TransformResult};
use crate::utils::error::Result;

/// The whole fetch-and-export flow as one pipeline: extract walks every
/// (area, specialty) combination against the Places API, transform
/// normalizes and renders the workbook, load persists it.
pub struct SearchPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: PlacesClient,
}

impl<S: Storage, C: ConfigProvider> SearchPipeline<S, C> {
    pub fn new(storage: S, config: C, client: PlacesClient) -> Self {
        Self {
            storage,
            config,
            client,
        }
    }

    fn queries(&self) -> Vec<SearchQuery> {
        let specialties: Vec<Option<_>> = if self.config.specialties().is_empty() {
            vec![None]
        } else {
            self.config.specialties().iter().copied().map(Some).collect()
        };

        let mut queries = Vec::new();
        for area in self.config.areas() {
            for specialty in &specialties {
                queries.push(SearchQuery::new(*area, *specialty));
            }
        }
        queries
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SearchPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawListing>> {
        let mut raw = Vec::new();

        for query in self.queries() {
            let text = query.text();
            tracing::info!("Searching: {}", text);

            // A failed text search aborts the whole run so a broken
            // credential cannot silently produce an empty spreadsheet.
            let places = self
                .client
                .search_text(&text, self.config.max_results())
                .await?;

            tracing::debug!("Query '{}' returned {} places", text, places.len());

            for place in places.into_iter().take(self.config.max_results()) {
                let Some(place_id) = place.id.clone() else {
                    continue;
                };

                let details = if self.config.fetch_details() {
                    match self.client.place_details(&place_id).await {
                        Ok(details) => details,
                        Err(e) => {
                            // One broken listing should not sink the run.
                            tracing::warn!("Details lookup failed for {}: {}", place_id, e);
                            continue;
                        }
                    }
                } else {
                    place.into_details()
                };

                raw.push(RawListing {
                    area: query.area,
                    specialty: query.specialty,
                    place: details,
                });
            }
        }

        Ok(raw)
    }

    async fn transform(&self, data: Vec<RawListing>) -> Result<TransformResult> {
        let records: Vec<_> = data.iter().map(normalize).collect();
        let workbook = export::to_xlsx_bytes(&records)?;

        Ok(TransformResult { records, workbook })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let file_name = self.config.file_name();

        tracing::debug!(
            "Writing workbook ({} bytes, {} records) to storage",
            result.workbook.len(),
            result.records.len()
        );
        self.storage.write_file(file_name, &result.workbook).await?;

        Ok(file_name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::domain::model::{Area, Specialty};
    use crate::utils::error::FinderError;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                FinderError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        areas: Vec<Area>,
        specialties: Vec<Specialty>,
        max_results: usize,
        fetch_details: bool,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                areas: vec![Area::Aundh],
                specialties: vec![Specialty::Cardiologist],
                max_results: 15,
                fetch_details: true,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn areas(&self) -> &[Area] {
            &self.areas
        }

        fn specialties(&self) -> &[Specialty] {
            &self.specialties
        }

        fn max_results(&self) -> usize {
            self.max_results
        }

        fn fetch_details(&self) -> bool {
            self.fetch_details
        }

        fn file_name(&self) -> &str {
            "pune_doctors.xlsx"
        }
    }

    fn pipeline_for(
        server: &MockServer,
        storage: MockStorage,
        config: MockConfig,
    ) -> SearchPipeline<MockStorage, MockConfig> {
        let api = ApiConfig::new("test-key".to_string(), server.base_url());
        let client = PlacesClient::new(&api).unwrap();
        SearchPipeline::new(storage, config, client)
    }

    fn search_body() -> serde_json::Value {
        serde_json::json!({
            "places": [
                {"id": "p1", "displayName": {"text": "Dr. A"}, "formattedAddress": "Aundh"},
                {"id": "p2", "displayName": {"text": "Dr. B"}, "formattedAddress": "Aundh"}
            ]
        })
    }

    #[tokio::test]
    async fn test_extract_enriches_each_place_with_details() {
        let server = MockServer::start();
        let search_mock = server.mock(|when, then| {
            when.method(POST).path("/v1/places:searchText");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(search_body());
        });
        let details_mock = server.mock(|when, then| {
            when.method(GET).path_contains("/v1/places/p");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "displayName": {"text": "Dr. Enriched"},
                    "formattedAddress": "12 DP Road, Aundh, Pune",
                    "internationalPhoneNumber": "+91 20 1234 5678"
                }));
        });

        let pipeline = pipeline_for(&server, MockStorage::new(), MockConfig::new());
        let raw = pipeline.extract().await.unwrap();

        search_mock.assert();
        details_mock.assert_hits(2);
        assert_eq!(raw.len(), 2);
        assert_eq!(
            raw[0].place.international_phone_number.as_deref(),
            Some("+91 20 1234 5678")
        );
        assert_eq!(raw[0].specialty, Some(Specialty::Cardiologist));
    }

    #[tokio::test]
    async fn test_extract_skips_places_whose_details_fail() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/places:searchText");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(search_body());
        });
        server.mock(|when, then| {
            when.method(GET).path("/v1/places/p1");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"displayName": {"text": "Dr. A"}}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/v1/places/p2");
            then.status(404).body("NOT_FOUND");
        });

        let pipeline = pipeline_for(&server, MockStorage::new(), MockConfig::new());
        let raw = pipeline.extract().await.unwrap();

        assert_eq!(raw.len(), 1);
    }

    #[tokio::test]
    async fn test_extract_without_details_uses_search_fields() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/places:searchText");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(search_body());
        });

        let mut config = MockConfig::new();
        config.fetch_details = false;
        let pipeline = pipeline_for(&server, MockStorage::new(), config);
        let raw = pipeline.extract().await.unwrap();

        // No details mock registered: a details call would 404 and drop rows.
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].place.display_name.as_ref().unwrap().text, "Dr. A");
    }

    #[tokio::test]
    async fn test_extract_caps_results_per_query() {
        let server = MockServer::start();
        let many: Vec<_> = (0..5)
            .map(|i| serde_json::json!({"id": format!("p{}", i)}))
            .collect();
        server.mock(|when, then| {
            when.method(POST).path("/v1/places:searchText");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({ "places": many }));
        });

        let mut config = MockConfig::new();
        config.max_results = 3;
        config.fetch_details = false;
        let pipeline = pipeline_for(&server, MockStorage::new(), config);
        let raw = pipeline.extract().await.unwrap();

        assert_eq!(raw.len(), 3);
    }

    #[tokio::test]
    async fn test_extract_aborts_on_search_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/places:searchText");
            then.status(403).body("PERMISSION_DENIED");
        });

        let pipeline = pipeline_for(&server, MockStorage::new(), MockConfig::new());
        let err = pipeline.extract().await.unwrap_err();

        assert!(matches!(err, FinderError::ApiStatus { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_extract_runs_one_query_per_area_specialty_pair() {
        let server = MockServer::start();
        let search_mock = server.mock(|when, then| {
            when.method(POST).path("/v1/places:searchText");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"places": []}));
        });

        let config = MockConfig {
            areas: vec![Area::Aundh, Area::Baner],
            specialties: vec![Specialty::Cardiologist, Specialty::Dermatologist],
            max_results: 15,
            fetch_details: true,
        };
        let pipeline = pipeline_for(&server, MockStorage::new(), config);
        let raw = pipeline.extract().await.unwrap();

        search_mock.assert_hits(4); // 2 areas x 2 specialties
        assert!(raw.is_empty());
    }

    #[tokio::test]
    async fn test_transform_normalizes_and_renders_workbook() {
        let server = MockServer::start();
        let pipeline = pipeline_for(&server, MockStorage::new(), MockConfig::new());

        let raw = vec![RawListing {
            area: Area::Aundh,
            specialty: Some(Specialty::Cardiologist),
            place: serde_json::from_value(serde_json::json!({
                "displayName": {"text": "Dr. A"},
                "formattedAddress": "Aundh, Pune"
            }))
            .unwrap(),
        }];

        let result = pipeline.transform(raw).await.unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].name, "Dr. A");
        assert_eq!(result.records[0].specialty, "Cardiologist");
        assert!(!result.workbook.is_empty());
    }

    #[tokio::test]
    async fn test_transform_empty_input_still_renders_workbook() {
        let server = MockServer::start();
        let pipeline = pipeline_for(&server, MockStorage::new(), MockConfig::new());

        let result = pipeline.transform(Vec::new()).await.unwrap();
        assert!(result.records.is_empty());
        assert!(!result.workbook.is_empty()); // header-only workbook
    }

    #[tokio::test]
    async fn test_load_writes_workbook_to_storage() {
        let server = MockServer::start();
        let storage = MockStorage::new();
        let pipeline = pipeline_for(&server, storage.clone(), MockConfig::new());

        let result = TransformResult {
            records: Vec::new(),
            workbook: vec![1, 2, 3],
        };
        let path = pipeline.load(result).await.unwrap();

        assert_eq!(path, "pune_doctors.xlsx");
        assert_eq!(
            storage.get_file("pune_doctors.xlsx").await,
            Some(vec![1, 2, 3])
        );
    }
}
