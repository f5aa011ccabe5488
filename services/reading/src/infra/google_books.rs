use std::time::Duration;

use anyhow::Context as _;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tracing::warn;

use crate::domain::repository::CatalogPort;
use crate::domain::types::CatalogVolume;
use crate::error::ReadingServiceError;

/// Google Books volumes API client.
#[derive(Clone)]
pub struct GoogleBooksClient {
    http: reqwest::Client,
    base_url: Url,
    lang_restrict: Option<String>,
}

impl GoogleBooksClient {
    /// `base_url` is the volumes collection, e.g. `https://www.googleapis.com/books/v1/volumes`.
    pub fn new(
        base_url: &str,
        lang_restrict: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url).context("invalid Google Books base url")?;
        anyhow::ensure!(
            !base_url.cannot_be_a_base(),
            "Google Books base url must be hierarchical"
        );
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build Google Books HTTP client")?;
        Ok(Self {
            http,
            base_url,
            lang_restrict,
        })
    }

    fn volume_url(&self, google_book_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(google_book_id);
        }
        url
    }
}

#[derive(Deserialize)]
struct VolumeList {
    items: Option<Vec<Volume>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    id: String,
    #[serde(default)]
    volume_info: VolumeInfo,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    image_links: Option<ImageLinks>,
    description: Option<String>,
    publisher: Option<String>,
    published_date: Option<String>,
    page_count: Option<u32>,
}

#[derive(Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

impl From<Volume> for CatalogVolume {
    fn from(volume: Volume) -> Self {
        let info = volume.volume_info;
        Self {
            google_book_id: volume.id,
            title: info.title.unwrap_or_default(),
            authors: info.authors.map(|a| a.join(", ")),
            thumbnail_url: info.image_links.and_then(|l| l.thumbnail),
            description: info.description,
            publisher: info.publisher,
            published_date: info.published_date,
            page_count: info.page_count,
        }
    }
}

fn upstream_status(status: StatusCode) -> ReadingServiceError {
    let reason = status.canonical_reason().unwrap_or("unexpected status");
    warn!(%status, "Google Books API returned an error");
    ReadingServiceError::GoogleBooksApi(format!("Google Books API error: {reason}"))
}

fn transport(err: reqwest::Error) -> ReadingServiceError {
    warn!(error = %err, timeout = err.is_timeout(), "Google Books API request failed");
    ReadingServiceError::GoogleBooksApi(format!("Google Books API error: {err}"))
}

impl CatalogPort for GoogleBooksClient {
    async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<CatalogVolume>, ReadingServiceError> {
        let mut params = vec![
            ("q", query.to_owned()),
            ("maxResults", max_results.to_string()),
            ("printType", "books".to_owned()),
        ];
        if let Some(lang) = &self.lang_restrict {
            params.push(("langRestrict", lang.clone()));
        }

        let response = self
            .http
            .get(self.base_url.clone())
            .query(&params)
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(upstream_status(response.status()));
        }
        let list: VolumeList = response.json().await.map_err(transport)?;
        Ok(list
            .items
            .unwrap_or_default()
            .into_iter()
            .map(CatalogVolume::from)
            .collect())
    }

    async fn get(&self, google_book_id: &str) -> Result<Option<CatalogVolume>, ReadingServiceError> {
        if google_book_id.trim().is_empty() {
            return Ok(None);
        }
        let response = self
            .http
            .get(self.volume_url(google_book_id))
            .send()
            .await
            .map_err(transport)?;
        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            status if !status.is_success() => return Err(upstream_status(status)),
            _ => {}
        }
        let volume: Volume = response.json().await.map_err(transport)?;
        Ok(Some(volume.into()))
    }
}
