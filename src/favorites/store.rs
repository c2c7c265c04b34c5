// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::storage::SharedStore;

use super::FavoriteRecord;

/// Storage key holding the JSON array of favorites
pub const FAVORITES_KEY: &str = "favorites";

/// The user's favorited episodes, persisted on every change.
///
/// All mutations go through this type so the stored copy always follows
/// the in-memory one. When a write fails the in-memory change is kept and
/// the error is returned; the next successful write catches up.
pub struct FavoritesStore {
    store: SharedStore,
    favorites: Vec<FavoriteRecord>,
}

impl FavoritesStore {
    /// Load favorites from `store`.
    ///
    /// A missing key, unreadable storage or malformed JSON all yield an
    /// empty collection. Entries that do not decode as favorites are
    /// skipped.
    pub fn load(store: SharedStore) -> Self {
        let favorites = match store.get(FAVORITES_KEY) {
            Ok(Some(json)) => decode_favorites(&json),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read favorites, starting empty");
                Vec::new()
            }
        };

        Self { store, favorites }
    }

    /// Favorites in the order they were added
    pub fn favorites(&self) -> &[FavoriteRecord] {
        &self.favorites
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// Look up a favorite by id
    pub fn get(&self, id: &str) -> Option<&FavoriteRecord> {
        self.favorites.iter().find(|f| f.id == id)
    }

    pub fn is_favorited(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Add a favorite.
    ///
    /// Returns `Ok(false)` without touching anything when a favorite with the
    /// same id already exists; the original record and its `added_at` stay.
    pub fn add(&mut self, record: FavoriteRecord) -> Result<bool, StoreError> {
        if self.is_favorited(&record.id) {
            debug!(id = %record.id, "favorite already present");
            return Ok(false);
        }

        self.favorites.push(record);
        self.persist()?;
        Ok(true)
    }

    /// Remove a favorite; returns whether anything was removed
    pub fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.favorites.len();
        self.favorites.retain(|f| f.id != id);

        if self.favorites.len() == before {
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }

    /// Add the favorite if absent, remove it if present.
    ///
    /// Returns whether the episode is favorited afterwards.
    pub fn toggle(&mut self, record: FavoriteRecord) -> Result<bool, StoreError> {
        if self.is_favorited(&record.id) {
            self.remove(&record.id)?;
            Ok(false)
        } else {
            self.add(record)?;
            Ok(true)
        }
    }

    /// Remove every favorite and delete the stored key
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.favorites.clear();
        self.store.remove(FAVORITES_KEY)
    }

    /// Distinct show titles in order of first appearance
    pub fn show_titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = Vec::new();
        for favorite in &self.favorites {
            if !titles.contains(&favorite.show_title.as_str()) {
                titles.push(&favorite.show_title);
            }
        }
        titles
    }

    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.favorites)?;
        self.store.set(FAVORITES_KEY, &json)
    }
}

fn decode_favorites(json: &str) -> Vec<FavoriteRecord> {
    let entries: Vec<serde_json::Value> = match serde_json::from_str(json) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "stored favorites are not a JSON array, ignoring them");
            return Vec::new();
        }
    };

    let total = entries.len();
    let favorites: Vec<FavoriteRecord> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();

    if favorites.len() < total {
        warn!(
            skipped = total - favorites.len(),
            "skipped stored favorites that could not be decoded"
        );
    }

    favorites
}
