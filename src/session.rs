// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use tracing::warn;

use crate::catalog::{GenreFilter, QueryState, SortOrder};
use crate::error::StoreError;
use crate::storage::SharedStore;

pub const SEARCH_KEY: &str = "searchLetters";
pub const GENRE_KEY: &str = "selectedGenre";
pub const SORT_KEY: &str = "sortOrder";
pub const PAGE_KEY: &str = "currentPage";

/// Mirrors the catalog query into session-scoped storage so that the
/// next invocation picks up where the last one left off.
pub struct QuerySession {
    store: SharedStore,
}

impl QuerySession {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// The saved query; missing or unreadable values fall back to defaults
    pub fn restore(&self) -> QueryState {
        let defaults = QueryState::default();

        QueryState {
            search_text: self.read(SEARCH_KEY).unwrap_or(defaults.search_text),
            genre_filter: self.read_parsed::<GenreFilter>(GENRE_KEY).unwrap_or(defaults.genre_filter),
            sort_order: self.read_parsed::<SortOrder>(SORT_KEY).unwrap_or(defaults.sort_order),
            current_page: self
                .read_parsed::<usize>(PAGE_KEY)
                .filter(|page| *page >= 1)
                .unwrap_or(defaults.current_page),
        }
    }

    /// Save `query`; values equal to their defaults are removed instead
    pub fn save(&self, query: &QueryState) -> Result<(), StoreError> {
        let defaults = QueryState::default();

        self.write(
            SEARCH_KEY,
            (query.search_text != defaults.search_text).then(|| query.search_text.clone()),
        )?;
        self.write(
            GENRE_KEY,
            (query.genre_filter != defaults.genre_filter).then(|| query.genre_filter.to_string()),
        )?;
        self.write(
            SORT_KEY,
            (query.sort_order != defaults.sort_order).then(|| query.sort_order.to_string()),
        )?;
        self.write(
            PAGE_KEY,
            (query.current_page > 1).then(|| query.current_page.to_string()),
        )
    }

    /// Forget the saved query
    pub fn clear(&self) -> Result<(), StoreError> {
        for key in [SEARCH_KEY, GENRE_KEY, SORT_KEY, PAGE_KEY] {
            self.store.remove(key)?;
        }
        Ok(())
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value.filter(|v| v != "undefined"),
            Err(e) => {
                warn!(key, error = %e, "could not read session value");
                None
            }
        }
    }

    fn read_parsed<T>(&self, key: &str) -> Option<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let value = self.read(key)?;
        match value.parse() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(key, value = %value, error = %e, "ignoring invalid session value");
                None
            }
        }
    }

    fn write(&self, key: &str, value: Option<String>) -> Result<(), StoreError> {
        match value {
            Some(value) => self.store.set(key, &value),
            None => self.store.remove(key),
        }
    }
}
