//! Jikan (MyAnimeList) client for manga metadata.
//!
//! Only two read endpoints are used: keyword search and the top-ranked
//! list. [`MalManga::into_new_manga`] turns an API item into a draft the
//! collection store can ingest.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::JikanConfig;
use crate::constants::labels;
use crate::domain::Status;
use crate::models::{ExternalFields, NewManga};

pub const JIKAN_API: &str = "https://api.jikan.moe/v4";

#[derive(Debug, Deserialize)]
struct JikanResponse<T> {
    data: T,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MalManga {
    pub title: Option<String>,
    pub title_japanese: Option<String>,
    pub authors: Option<Vec<MalNamed>>,
    pub genres: Option<Vec<MalNamed>>,
    pub published: Option<Published>,
    pub status: Option<String>,
    pub volumes: Option<u32>,
    pub chapters: Option<u32>,
    pub synopsis: Option<String>,
    pub images: Option<MalImages>,
    pub score: Option<f64>,
    pub members: Option<u64>,
    pub favorites: Option<u64>,
    pub url: Option<String>,
    pub rank: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MalNamed {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Published {
    pub from: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MalImages {
    pub jpg: Option<MalImageSet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MalImageSet {
    pub image_url: Option<String>,
}

impl MalManga {
    /// Year part of `published.from`, e.g. `"1989"` for
    /// `"1989-08-25T00:00:00+00:00"`.
    #[must_use]
    pub fn published_year(&self) -> Option<&str> {
        let from = self.published.as_ref()?.from.as_deref()?;
        let date = from.split('T').next()?;
        let year = date.split('-').next()?;
        (!year.is_empty() && year.chars().all(|c| c.is_ascii_digit())).then_some(year)
    }

    /// Maps an API item onto a collection draft.
    ///
    /// Missing values become the localized placeholders; the status is
    /// normalized so that no raw Jikan vocabulary reaches the store.
    #[must_use]
    pub fn into_new_manga(self) -> NewManga {
        let year = self
            .published_year()
            .map_or_else(|| labels::UNKNOWN.to_string(), str::to_string);

        let status = Status::normalize_opt(self.status.as_deref());

        let image_url = self
            .images
            .and_then(|i| i.jpg)
            .and_then(|jpg| jpg.image_url)
            .unwrap_or_default();

        NewManga {
            title: self.title.unwrap_or_else(|| labels::NO_TITLE.to_string()),
            title_japanese: self
                .title_japanese
                .unwrap_or_else(|| labels::NO_JAPANESE_TITLE.to_string()),
            author: join_names(self.authors.as_deref()),
            year,
            genres: join_names(self.genres.as_deref()),
            status: status.label().to_string(),
            volumes: count_or_unknown(self.volumes),
            chapters: count_or_unknown(self.chapters),
            rating: self
                .score
                .map_or_else(|| labels::NOT_RATED.to_string(), format_score),
            synopsis: self
                .synopsis
                .unwrap_or_else(|| labels::NO_SYNOPSIS.to_string()),
            image_url,
            external: ExternalFields {
                members: Some(self.members.unwrap_or(0)),
                favorites: Some(self.favorites.unwrap_or(0)),
                source: Some(labels::JIKAN_SOURCE.to_string()),
                url: Some(self.url.unwrap_or_default()),
                rank: None,
            },
        }
    }

    /// Same as [`MalManga::into_new_manga`], keeping the list position
    /// reported by the top endpoint.
    #[must_use]
    pub fn into_ranked_manga(self) -> NewManga {
        let rank = self.rank;
        let mut manga = self.into_new_manga();
        manga.external.rank = rank;
        manga
    }
}

fn join_names(items: Option<&[MalNamed]>) -> String {
    let names: Vec<&str> = items
        .unwrap_or_default()
        .iter()
        .map(|n| n.name.as_deref().unwrap_or(labels::UNKNOWN))
        .collect();

    if names.is_empty() {
        labels::UNKNOWN.to_string()
    } else {
        names.join(", ")
    }
}

fn count_or_unknown(count: Option<u32>) -> String {
    count.map_or_else(|| labels::UNKNOWN.to_string(), |c| c.to_string())
}

/// Scores keep one decimal for whole numbers ("9.0", not "9").
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.1}")
    } else {
        score.to_string()
    }
}

#[derive(Clone)]
pub struct JikanClient {
    client: Client,
    base_url: String,
}

impl JikanClient {
    /// Creates a client against `base_url` with a request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mangashelf/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &JikanConfig) -> Result<Self> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}/{}", self.base_url, path))
            .with_context(|| format!("Invalid Jikan URL: {}/{}", self.base_url, path))
    }

    /// `GET <base>/manga?q=<query>&limit=<n>`
    pub async fn search_manga(&self, query: &str, limit: u32) -> Result<Vec<MalManga>> {
        let mut url = self.endpoint("manga")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", &limit.to_string());

        self.fetch_list(url).await
    }

    /// `GET <base>/top/manga?limit=<n>`
    pub async fn top_manga(&self, limit: u32) -> Result<Vec<MalManga>> {
        let mut url = self.endpoint("top/manga")?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());

        self.fetch_list(url).await
    }

    async fn fetch_list(&self, url: Url) -> Result<Vec<MalManga>> {
        debug!(url = %url, "Requesting Jikan");
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Jikan API error: {} - {}", status, body));
        }

        let response: JikanResponse<Vec<MalManga>> = response.json().await?;

        Ok(response.data)
    }
}
