//! HTTP source — `GET {base_url}/today` against a daily-picks API.
//!
//! Plain HTTP only; the API is expected to sit next to the app (same host or
//! private network). The whole request, body included, runs under a single
//! timeout.

use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::{StatusCode, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use pokesrc_core::DailyPicks;

use crate::{DailySource, FeedError};

#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    timeout: Duration,
    client: Client<HttpConnector, Empty<Bytes>>,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
            client: Client::builder(TokioExecutor::new()).build_http(),
        }
    }

    /// The endpoint this source fetches from.
    pub fn today_uri(&self) -> Result<Uri, FeedError> {
        let raw = format!("{}/today", self.base_url.trim_end_matches('/'));
        let uri: Uri = raw.parse().map_err(|_| FeedError::InvalidUrl(raw.clone()))?;
        if uri.scheme_str() != Some("http") || uri.host().is_none() {
            return Err(FeedError::InvalidUrl(raw));
        }
        Ok(uri)
    }

    async fn request(&self, uri: Uri) -> Result<DailyPicks, FeedError> {
        let response = self.client.get(uri).await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FeedError::Status(status));
        }
        let body = response.into_body().collect().await?.to_bytes();
        Ok(DailyPicks::from_slice(&body)?)
    }
}

impl DailySource for HttpSource {
    async fn fetch(&self) -> Result<DailyPicks, FeedError> {
        let uri = self.today_uri()?;
        tracing::debug!(%uri, "fetching daily picks");
        tokio::time::timeout(self.timeout, self.request(uri))
            .await
            .map_err(|_| FeedError::Timeout(self.timeout))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_today_uri() {
        let source = HttpSource::new("http://127.0.0.1:3000/", Duration::from_secs(1));
        assert_eq!(source.today_uri().unwrap().to_string(), "http://127.0.0.1:3000/today");

        let source = HttpSource::new("http://api.internal/v1", Duration::from_secs(1));
        assert_eq!(source.today_uri().unwrap().path(), "/v1/today");
    }

    #[test]
    fn rejects_unsupported_urls() {
        for bad in ["https://pokeapi.co", "not a url", "/relative"] {
            let source = HttpSource::new(bad, Duration::from_secs(1));
            assert!(
                matches!(source.today_uri(), Err(FeedError::InvalidUrl(_))),
                "{bad} should be rejected"
            );
        }
    }
}
