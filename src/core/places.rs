use crate::config::ApiConfig;
use crate::domain::model::{PlaceDetails, PlaceSummary, TextSearchResponse};
use crate::utils::error::{FinderError, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;

// Field masks are mandatory on Places v1; anything not listed here is never
// returned, so these track the ListingRecord schema.
const TEXT_SEARCH_FIELDS: &str =
    "places.id,places.displayName,places.formattedAddress,places.rating,places.userRatingCount";
const DETAIL_FIELDS: &str = "id,displayName,formattedAddress,websiteUri,\
nationalPhoneNumber,internationalPhoneNumber,rating,userRatingCount";

pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: String,
    retry_attempts: u32,
}

impl PlacesClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry_attempts: config.retry_attempts.max(1),
        })
    }

    /// Text search for one composed query. `page_size` is clamped to the
    /// 1..=50 range the API accepts.
    pub async fn search_text(&self, query: &str, page_size: usize) -> Result<Vec<PlaceSummary>> {
        let page_size = page_size.clamp(1, 50) as u32;
        let url = format!("{}/v1/places:searchText", self.base_url);
        let payload = serde_json::json!({ "textQuery": query, "pageSize": page_size });

        let response = self
            .send_with_retry(|| {
                self.client
                    .post(&url)
                    .header("Content-Type", "application/json")
                    .header("X-Goog-Api-Key", self.api_key.as_str())
                    .header("X-Goog-FieldMask", TEXT_SEARCH_FIELDS)
                    .json(&payload)
            })
            .await?;

        let body: TextSearchResponse = response.json().await?;
        Ok(body.places)
    }

    /// Details lookup for one place id; fills in phone, website and rating
    /// fields the search response does not carry.
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetails> {
        let url = format!("{}/v1/places/{}", self.base_url, place_id);

        let response = self
            .send_with_retry(|| {
                self.client
                    .get(&url)
                    .header("X-Goog-Api-Key", self.api_key.as_str())
                    .header("X-Goog-FieldMask", DETAIL_FIELDS)
            })
            .await?;

        let details: PlaceDetails = response.json().await?;
        Ok(details)
    }

    /// Bounded retry: transient statuses and transport failures are retried
    /// up to `retry_attempts` total tries with a linear backoff; everything
    /// else surfaces immediately with the upstream body preserved.
    async fn send_with_retry(
        &self,
        build: impl Fn() -> RequestBuilder,
    ) -> Result<reqwest::Response> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match build().send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }
                    if is_retryable_status(status) && attempt < self.retry_attempts {
                        tracing::warn!(
                            "Places API returned {}, retrying ({}/{})",
                            status,
                            attempt,
                            self.retry_attempts
                        );
                        tokio::time::sleep(backoff(attempt)).await;
                        continue;
                    }
                    let message = response.text().await.unwrap_or_default();
                    return Err(FinderError::ApiStatus {
                        status: status.as_u16(),
                        message,
                    });
                }
                Err(e) => {
                    if (e.is_timeout() || e.is_connect()) && attempt < self.retry_attempts {
                        tracing::warn!(
                            "Request failed ({}), retrying ({}/{})",
                            e,
                            attempt,
                            self.retry_attempts
                        );
                        tokio::time::sleep(backoff(attempt)).await;
                        continue;
                    }
                    return Err(FinderError::Http(e));
                }
            }
        }
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
}

fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(1250 * attempt as u64)
}
