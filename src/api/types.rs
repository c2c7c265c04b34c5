// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::genre::{self, Genre, GenreId};

/// A show as listed in the catalog (`GET /shows`)
///
/// The catalog only reports how many seasons a show has; the seasons
/// themselves come with the detail endpoint (see [`Show`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowPreview {
    #[serde(deserialize_with = "show_id")]
    pub id: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub image: String,
    #[serde(default, deserialize_with = "nullable")]
    pub genres: Vec<GenreId>,
    #[serde(default, deserialize_with = "nullable")]
    pub seasons: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub updated: String,
}

impl ShowPreview {
    /// Last update time; unparseable timestamps map to the Unix epoch
    pub fn updated_at(&self) -> DateTime<Utc> {
        parse_timestamp(&self.updated)
    }
}

/// A show with its full season and episode listing (`GET /id/{id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    #[serde(deserialize_with = "show_id")]
    pub id: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub image: String,
    #[serde(default, deserialize_with = "nullable")]
    pub genres: Vec<GenreRef>,
    #[serde(default, deserialize_with = "nullable")]
    pub updated: String,
    #[serde(default, deserialize_with = "nullable")]
    pub seasons: Vec<Season>,
}

/// One season of a show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub image: String,
    #[serde(default, deserialize_with = "nullable")]
    pub episodes: Vec<Episode>,
}

/// A playable episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// 1-based position within the season
    #[serde(default, deserialize_with = "nullable")]
    pub episode: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    /// URL of the audio file
    #[serde(default, deserialize_with = "nullable")]
    pub file: String,
}

/// Genre reference as found on a show detail.
///
/// The detail endpoint sometimes lists genre titles instead of ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenreRef {
    Id(GenreId),
    Name(String),
}

impl GenreRef {
    /// The bundled genre this reference points at, if any
    pub fn resolve(&self) -> Option<&'static Genre> {
        match self {
            GenreRef::Id(id) => genre::by_id(*id),
            GenreRef::Name(name) => genre::by_title(name),
        }
    }

    /// Human readable label
    pub fn label(&self) -> String {
        match self {
            GenreRef::Id(id) => genre::title_of(*id).to_string(),
            GenreRef::Name(name) => name.clone(),
        }
    }
}

impl Show {
    /// Last update time; unparseable timestamps map to the Unix epoch
    pub fn updated_at(&self) -> DateTime<Utc> {
        parse_timestamp(&self.updated)
    }

    /// Ids of the bundled genres this show belongs to
    pub fn genre_ids(&self) -> Vec<GenreId> {
        self.genres
            .iter()
            .filter_map(|genre| genre.resolve().map(|g| g.id))
            .collect()
    }

    /// Total number of episodes across all seasons
    pub fn episode_count(&self) -> usize {
        self.seasons.iter().map(|s| s.episodes.len()).sum()
    }

    /// Season by its 1-based position
    pub fn season(&self, number: usize) -> Option<&Season> {
        number.checked_sub(1).and_then(|index| self.seasons.get(index))
    }

    /// Episode by 1-based season position and episode number
    pub fn episode(&self, season: usize, episode: u32) -> Option<(&Season, &Episode)> {
        let season = self.season(season)?;
        season
            .episodes
            .iter()
            .find(|e| e.episode == episode)
            .map(|e| (season, e))
    }
}

/// Parse an API timestamp.
///
/// Accepts RFC 3339 and plain `YYYY-MM-DD`. Anything else is treated as the
/// Unix epoch so that ordering stays deterministic.
pub fn parse_timestamp(value: &str) -> DateTime<Utc> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.with_timezone(&Utc);
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        && let Some(dt) = date.and_hms_opt(0, 0, 0)
    {
        return dt.and_utc();
    }

    DateTime::<Utc>::default()
}

/// Show ids arrive as numbers from some endpoints and strings from others
fn show_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Treat an explicit `null` like a missing field
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
