// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use crate::api::ShowPreview;

use super::query::{Page, QueryState, apply};

struct CacheEntry {
    shows: Arc<[ShowPreview]>,
    query: QueryState,
    page_size: usize,
    page: Page,
}

/// Remembers the last catalog query and its result.
///
/// The catalog is identified by pointer, so a re-fetched catalog always
/// recomputes even if it happens to hold the same shows.
#[derive(Default)]
pub struct QueryCache {
    last: Option<CacheEntry>,
    computations: usize,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Result of [`apply`], recomputed only when an input changed
    pub fn get(&mut self, shows: &Arc<[ShowPreview]>, query: &QueryState, page_size: usize) -> &Page {
        let entry = match self.last.take() {
            Some(entry)
                if Arc::ptr_eq(&entry.shows, shows)
                    && entry.query == *query
                    && entry.page_size == page_size =>
            {
                entry
            }
            _ => {
                self.computations += 1;
                CacheEntry {
                    shows: Arc::clone(shows),
                    query: query.clone(),
                    page_size,
                    page: apply(shows, query, page_size),
                }
            }
        };

        &self.last.insert(entry).page
    }

    /// How many times the pipeline actually ran
    pub fn computations(&self) -> usize {
        self.computations
    }

    /// Forget the cached result
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}
