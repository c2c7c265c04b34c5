// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::ApiError;
use crate::http::HttpClient;
use crate::progress::{ProgressEvent, SharedProgressReporter};

use super::types::{Show, ShowPreview};

/// Public podcast catalog API
pub const DEFAULT_API_BASE: &str = "https://podcast-api.netlify.app";

/// Typed client for the podcast catalog API
pub struct CatalogClient<C> {
    client: C,
    base: Url,
    reporter: SharedProgressReporter,
}

impl<C: HttpClient> CatalogClient<C> {
    /// Create a client for the API rooted at `base`
    pub fn new(client: C, base: &str, reporter: SharedProgressReporter) -> Result<Self, ApiError> {
        let mut base = Url::parse(base)?;

        // Url::join replaces the last segment unless the path ends in a slash
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            client,
            base,
            reporter,
        })
    }

    /// URL of the catalog listing
    pub fn shows_url(&self) -> Result<Url, ApiError> {
        Ok(self.base.join("shows")?)
    }

    /// URL of a single show's details
    pub fn show_url(&self, id: u64) -> Result<Url, ApiError> {
        Ok(self.base.join(&format!("id/{id}"))?)
    }

    /// Fetch the full show catalog
    pub async fn fetch_shows(&self) -> Result<Vec<ShowPreview>, ApiError> {
        let url = self.shows_url()?;
        self.reporter.report(ProgressEvent::FetchingCatalog {
            url: url.to_string(),
        });

        let shows: Vec<ShowPreview> = self.get_json(&url).await?;

        self.reporter.report(ProgressEvent::CatalogLoaded {
            show_count: shows.len(),
        });
        Ok(shows)
    }

    /// Fetch one show including its seasons and episodes
    pub async fn fetch_show(&self, id: u64) -> Result<Show, ApiError> {
        let url = self.show_url(id)?;
        self.reporter.report(ProgressEvent::FetchingShow {
            url: url.to_string(),
            show_id: id,
        });

        let show: Show = self.get_json(&url).await?;

        self.reporter.report(ProgressEvent::ShowLoaded {
            show_title: show.title.clone(),
            season_count: show.seasons.len(),
            episode_count: show.episode_count(),
        });
        Ok(show)
    }

    /// The reporter events are sent to
    pub fn reporter(&self) -> &SharedProgressReporter {
        &self.reporter
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, ApiError> {
        let result = self.try_get_json(url).await;

        if let Err(e) = &result {
            warn!(url = %url, error = %e, "catalog request failed");
            self.reporter.report(ProgressEvent::FetchFailed {
                url: url.to_string(),
                error: e.to_string(),
            });
        }

        result
    }

    async fn try_get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, ApiError> {
        let response = self
            .client
            .get(url.as_str())
            .await
            .map_err(|e| ApiError::FetchFailed {
                url: url.to_string(),
                source: e,
            })?;

        if !response.is_success() {
            return Err(ApiError::HttpStatus {
                url: url.to_string(),
                status: response.status,
            });
        }

        debug!(url = %url, bytes = response.body.len(), "catalog response received");

        serde_json::from_slice(&response.body).map_err(|e| ApiError::DecodeFailed {
            url: url.to_string(),
            source: e,
        })
    }
}

/// Loads show details, discarding responses that were overtaken.
///
/// Every call to [`DetailLoader::load`] takes a new generation number. When
/// the response arrives and a later call has started in the meantime, the
/// result is dropped and `Ok(None)` is returned, so rapid navigation
/// between shows never displays an older show over a newer one.
pub struct DetailLoader<C> {
    api: CatalogClient<C>,
    generation: AtomicU64,
}

impl<C: HttpClient> DetailLoader<C> {
    pub fn new(api: CatalogClient<C>) -> Self {
        Self {
            api,
            generation: AtomicU64::new(0),
        }
    }

    /// Fetch a show; `Ok(None)` means a newer request superseded this one
    pub async fn load(&self, id: u64) -> Result<Option<Show>, ApiError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.api.fetch_show(id).await;

        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!(show_id = id, ticket, "discarding stale show response");
            self.api
                .reporter()
                .report(ProgressEvent::StaleShowDiscarded { show_id: id });
            return Ok(None);
        }

        result.map(Some)
    }

    /// The underlying API client
    pub fn api(&self) -> &CatalogClient<C> {
        &self.api
    }
}
