// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{Episode, Season};

/// A favorited episode as stored under the `favorites` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub show_title: String,
    #[serde(default)]
    pub season_number: u32,
    #[serde(default)]
    pub episode_number: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub file: String,
    pub added_at: DateTime<Utc>,
}

impl FavoriteRecord {
    /// Build a record for an episode of a show.
    ///
    /// `season_number` is the 1-based position of the season in the show.
    pub fn from_episode(
        show_title: &str,
        season_number: u32,
        season: &Season,
        episode: &Episode,
        added_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: favorite_id(show_title, season_number, episode.episode),
            title: episode.title.clone(),
            show_title: show_title.to_string(),
            season_number,
            episode_number: episode.episode,
            description: episode.description.clone(),
            image: season.image.clone(),
            file: episode.file.clone(),
            added_at,
        }
    }
}

/// Identifier of a favorite: `{show title}-S{season}-E{episode}`.
///
/// Episodes carry no global id, so the show title (with whitespace runs
/// replaced by `_`) and the season/episode position stand in for one.
pub fn favorite_id(show_title: &str, season_number: u32, episode_number: u32) -> String {
    let mut slug = String::with_capacity(show_title.len());
    let mut last_was_space = false;

    for c in show_title.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                slug.push('_');
                last_was_space = true;
            }
        } else {
            slug.push(c);
            last_was_space = false;
        }
    }

    format!("{slug}-S{season_number}-E{episode_number}")
}
