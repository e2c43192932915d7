//! HTTP client for the Graph API
//!
//! Thin wrapper around [`reqwest::Client`] that joins paths onto the
//! configured base URL, decodes JSON bodies and turns non-success
//! responses into [`Error::Graph`] values.

use crate::{Error, Result, config::Settings};
use reqwest::{Client, Response, header::CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;

/// Client for Graph API requests
///
/// Holds the shared [`reqwest::Client`] plus the request defaults taken
/// from [`Settings`] at construction. Cheap to share behind an `Arc`;
/// every method takes `&self`.
#[derive(Debug)]
pub struct GraphClient {
    /// HTTP client for requests
    client: Client,
    /// Base URL for the Graph API
    base_url: String,
    /// How many times to probe a processing media container
    status_poll_attempts: u32,
    /// Delay before each status probe
    status_poll_interval: Duration,
}

impl GraphClient {
    /// Creates a new Graph API client from the given settings.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use graph_page_relay::config::Settings;
    /// use graph_page_relay::graph::GraphClient;
    ///
    /// let settings = Settings::default();
    /// let client = GraphClient::new(&settings);
    /// ```
    pub fn new(settings: &Settings) -> Self {
        let client = Client::builder()
            .user_agent(&settings.graph.user_agent)
            .connect_timeout(Duration::from_secs(settings.graph.connect_timeout))
            .timeout(Duration::from_secs(settings.graph.request_timeout))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: settings.graph.base_url.trim_end_matches('/').to_string(),
            status_poll_attempts: settings.graph.status_poll_attempts,
            status_poll_interval: settings.graph.status_poll_interval,
        }
    }

    /// Base URL the client sends requests to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// How many times a processing media container is probed
    pub fn status_poll_attempts(&self) -> u32 {
        self.status_poll_attempts
    }

    /// Delay before each status probe
    pub fn status_poll_interval(&self) -> Duration {
        self.status_poll_interval
    }

    /// Join a path onto the base URL
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a GET request and decode the JSON response
    pub(crate) async fn get<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .get(self.endpoint(path))
            .query(query)
            .send()
            .await?;
        decode_response(response).await
    }

    /// Send a form-encoded POST request and decode the JSON response
    pub(crate) async fn post_form<B, T>(&self, path: &str, form: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint(path))
            .form(form)
            .send()
            .await?;
        decode_response(response).await
    }

    /// Send a JSON POST request and decode the JSON response
    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await?;
        decode_response(response).await
    }

    /// Send a POST request carrying its parameters in the query string
    ///
    /// The comments edge takes its message this way rather than in the
    /// request body.
    pub(crate) async fn post_query<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint(path))
            .query(query)
            .send()
            .await?;
        decode_response(response).await
    }

    /// Fetch media bytes from an absolute URL
    ///
    /// Source videos live outside the Graph API, typically on object
    /// storage, so the URL is used as-is.
    pub(crate) async fn download(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Downloading media from {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Error::media_upload(
                "video download",
                format!("source returned status {}", response.status()),
            ));
        }

        let bytes = response.bytes().await?;
        debug!("Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    /// Push video bytes to a resumable upload URL
    ///
    /// The upload host authenticates with an `OAuth` scheme header and
    /// expects the transfer offset and total size as plain headers.
    pub(crate) async fn upload_video(
        &self,
        upload_url: &str,
        access_token: &str,
        data: Vec<u8>,
    ) -> Result<()> {
        let file_size = data.len();
        debug!("Uploading {} bytes to {}", file_size, upload_url);

        let response = self
            .client
            .post(upload_url)
            .header("Authorization", format!("OAuth {}", access_token))
            .header("offset", "0")
            .header("file_size", file_size.to_string())
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(data)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::graph_failure(status.as_u16(), &body));
        }

        Ok(())
    }
}

/// Decode a JSON response, mapping non-success statuses to [`Error::Graph`]
async fn decode_response<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::graph_failure(status.as_u16(), &body));
    }

    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let settings = Settings::default();
        let client = GraphClient::new(&settings);
        assert_eq!(client.base_url(), "https://graph.facebook.com");
        assert_eq!(client.status_poll_attempts(), 50);
        assert_eq!(client.status_poll_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_endpoint_joins_path() {
        let settings = Settings::default();
        let client = GraphClient::new(&settings);
        assert_eq!(
            client.endpoint("12345/photos"),
            "https://graph.facebook.com/12345/photos"
        );
    }

    #[test]
    fn test_endpoint_strips_duplicate_slashes() {
        let mut settings = Settings::default();
        settings.graph.base_url = "http://localhost:9000/".to_string();
        let client = GraphClient::new(&settings);
        assert_eq!(
            client.endpoint("/oauth/access_token"),
            "http://localhost:9000/oauth/access_token"
        );
    }

    #[test]
    fn test_poll_parameters_follow_settings() {
        let mut settings = Settings::default();
        settings.graph.status_poll_attempts = 3;
        settings.graph.status_poll_interval = Duration::from_millis(10);
        let client = GraphClient::new(&settings);
        assert_eq!(client.status_poll_attempts(), 3);
        assert_eq!(client.status_poll_interval(), Duration::from_millis(10));
    }
}
