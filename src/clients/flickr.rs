use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{PhotoSearch, SearchError};
use crate::config::FlickrConfig;
use crate::constants::api::PER_PAGE;
use crate::models::photo::Photo;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    photos: Option<PhotoPage>,
}

#[derive(Debug, Deserialize)]
struct PhotoPage {
    #[serde(default)]
    photo: Vec<PhotoRecord>,
}

/// Wire shape of one photo record. Every field is optional because the API
/// omits fields on some records; validation happens in [`Self::into_photo`].
#[derive(Debug, Deserialize)]
struct PhotoRecord {
    farm: Option<u32>,
    server: Option<String>,
    id: Option<String>,
    secret: Option<String>,
}

impl PhotoRecord {
    /// Validates the record into a [`Photo`]. Empty strings count as missing:
    /// they would format into a URL that can never resolve.
    fn into_photo(self) -> Option<Photo> {
        let farm_id = self.farm?;
        let server_id = self.server.filter(|s| !s.is_empty())?;
        let photo_id = self.id.filter(|s| !s.is_empty())?;
        let secret_token = self.secret.filter(|s| !s.is_empty())?;

        Some(Photo {
            farm_id,
            server_id,
            photo_id,
            secret_token,
        })
    }
}

fn photos_from_body(body: &str) -> Result<Vec<Photo>, SearchError> {
    let parsed: SearchResponse =
        serde_json::from_str(body).map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

    let page = parsed
        .photos
        .ok_or_else(|| SearchError::InvalidResponse("missing photo list".to_string()))?;

    Ok(page
        .photo
        .into_iter()
        .filter_map(PhotoRecord::into_photo)
        .collect())
}

/// Client for the Flickr photo-search endpoint.
///
/// Stateless across invocations: one `search` call performs exactly one
/// network request and remembers nothing about pages or queries.
#[derive(Clone)]
pub struct FlickrClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FlickrClient {
    #[must_use]
    pub fn new(config: &FlickrConfig) -> Self {
        Self::with_shared_client(Client::new(), config)
    }

    /// Reuse an externally built client so all HTTP callers share one
    /// connection pool and timeout policy.
    #[must_use]
    pub fn with_shared_client(client: Client, config: &FlickrConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn search_url(&self, text: &str, page: u32) -> String {
        format!(
            "{}?method=flickr.photos.search&api_key={}&text={}&page={}&format=json&nojsoncallback=1&per_page={}",
            self.base_url,
            self.api_key,
            urlencoding::encode(text),
            page,
            PER_PAGE
        )
    }
}

#[async_trait]
impl PhotoSearch for FlickrClient {
    async fn search(&self, text: &str, page: u32) -> Result<Vec<Photo>, SearchError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SearchError::InvalidQuery);
        }

        let url = self.search_url(text, page);
        debug!(page, "searching photos");

        let response =
            self.client
                .get(&url)
                .send()
                .await
                .map_err(|e| SearchError::RequestFailed {
                    status: None,
                    message: e.to_string(),
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::RequestFailed {
                status: Some(status.as_u16()),
                message: format!("status {status}"),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::RequestFailed {
                status: None,
                message: e.to_string(),
            })?;

        photos_from_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> FlickrClient {
        FlickrClient::new(&FlickrConfig {
            base_url: "https://api.example.com/rest/".to_string(),
            api_key: "key123".to_string(),
            request_timeout_seconds: 30,
        })
    }

    #[test]
    fn search_url_encodes_text_and_fixes_page_size() {
        let url = test_client().search_url("hurricane irma", 2);
        assert_eq!(
            url,
            "https://api.example.com/rest/?method=flickr.photos.search&api_key=key123&text=hurricane%20irma&page=2&format=json&nojsoncallback=1&per_page=10"
        );
    }

    #[test]
    fn body_with_valid_records_maps_to_photos() {
        let body = r#"{
            "photos": {
                "photo": [
                    {"farm": 65, "server": "55", "id": "12345", "secret": "abcdef"},
                    {"farm": 2, "server": "s2", "id": "99", "secret": "deadbeef"}
                ]
            }
        }"#;

        let photos = photos_from_body(body).unwrap();
        assert_eq!(photos.len(), 2);
        assert_eq!(
            photos[0].image_url(),
            "https://farm65.staticflickr.com/55/12345_abcdef.jpg"
        );
    }

    #[test]
    fn incomplete_records_are_dropped() {
        let body = r#"{
            "photos": {
                "photo": [
                    {"farm": 65, "server": "55", "id": "12345", "secret": "abcdef"},
                    {"farm": 65, "server": "55", "id": "missing-secret"},
                    {"farm": 65, "server": "", "id": "empty-server", "secret": "x"}
                ]
            }
        }"#;

        let photos = photos_from_body(body).unwrap();
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].photo_id, "12345");
    }

    #[test]
    fn empty_photo_list_is_not_an_error() {
        let body = r#"{"photos": {"photo": []}}"#;
        assert!(photos_from_body(body).unwrap().is_empty());
    }

    #[test]
    fn body_without_photo_list_is_invalid() {
        let body = r#"{"stat": "fail", "code": 100, "message": "Invalid API Key"}"#;
        assert!(matches!(
            photos_from_body(body),
            Err(SearchError::InvalidResponse(_))
        ));
    }

    #[test]
    fn unparseable_body_is_invalid() {
        assert!(matches!(
            photos_from_body("<html>gateway error</html>"),
            Err(SearchError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn whitespace_query_short_circuits_without_network() {
        let result = test_client().search("   ", 1).await;
        assert_eq!(result, Err(SearchError::InvalidQuery));
    }
}
