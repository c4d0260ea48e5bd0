use reqwest::Client;

use super::error::{classify_error, YouTubeError};
use super::types::{SearchItem, SearchListResponse, VideoListResponse};
use crate::traits::{VideoCandidate, VideoService};

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Pick the credential for a request: a per-request override wins over the
/// process-wide default. Blank values count as absent.
pub fn resolve_credential<'a>(
    override_key: Option<&'a str>,
    default_key: Option<&'a str>,
) -> Result<&'a str, YouTubeError> {
    override_key
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .or_else(|| default_key.map(str::trim).filter(|k| !k.is_empty()))
        .ok_or(YouTubeError::NoCredential)
}

/// YouTube Data API v3 client.
///
/// Built once with the process-wide default key; [`YouTubeClient::with_override`]
/// yields a request-scoped copy sharing the same connection pool.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    default_key: Option<String>,
    override_key: Option<String>,
    base_url: String,
    http: Client,
}

impl YouTubeClient {
    pub fn new(default_key: Option<String>) -> Self {
        Self {
            default_key,
            override_key: None,
            base_url: BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Point the client at a different API root (proxies, local fakes).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Copy of this client that prefers `key` over the default credential.
    pub fn with_override(&self, key: Option<String>) -> Self {
        Self {
            override_key: key,
            ..self.clone()
        }
    }

    /// The credential this client would send, or `NoCredential`.
    pub fn api_key(&self) -> Result<&str, YouTubeError> {
        resolve_credential(self.override_key.as_deref(), self.default_key.as_deref())
    }

    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, YouTubeError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            let err = classify_error(status, &body);
            tracing::warn!(status, error = %err, "YouTube API error");
            Err(err)
        }
    }
}

impl VideoService for YouTubeClient {
    async fn list_videos(&self, ids: &[String]) -> Result<Vec<VideoCandidate>, YouTubeError> {
        let key = self.api_key()?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids.join(",");
        tracing::debug!(count = ids.len(), "videos.list");

        let resp = self
            .http
            .get(format!("{}/videos", self.base_url))
            .query(&[("part", "snippet"), ("id", joined.as_str()), ("key", key)])
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let body: VideoListResponse = resp
            .json()
            .await
            .map_err(|e| YouTubeError::Transient(format!("malformed videos.list response: {e}")))?;

        Ok(body.items.into_iter().map(VideoCandidate::from).collect())
    }

    async fn search_videos(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<VideoCandidate>, YouTubeError> {
        let key = self.api_key()?;
        let max_results = limit.to_string();
        tracing::debug!(query, limit, "search.list");

        let resp = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("q", query),
                ("key", key),
            ])
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let body: SearchListResponse = resp
            .json()
            .await
            .map_err(|e| YouTubeError::Transient(format!("malformed search.list response: {e}")))?;

        Ok(body
            .items
            .into_iter()
            .filter_map(SearchItem::into_candidate)
            .collect())
    }
}
