// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownValue;
use crate::text::compare_titles;

use super::FavoriteRecord;

/// Ordering applied to favorites within each show group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FavoriteSort {
    TitleAsc,
    TitleDesc,
    #[default]
    DateNew,
    DateOld,
}

impl FavoriteSort {
    const EXPECTED: &'static str = "title-asc, title-desc, date-new, date-old";

    pub fn as_str(&self) -> &'static str {
        match self {
            FavoriteSort::TitleAsc => "title-asc",
            FavoriteSort::TitleDesc => "title-desc",
            FavoriteSort::DateNew => "date-new",
            FavoriteSort::DateOld => "date-old",
        }
    }
}

impl fmt::Display for FavoriteSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FavoriteSort {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title-asc" => Ok(FavoriteSort::TitleAsc),
            "title-desc" => Ok(FavoriteSort::TitleDesc),
            "date-new" => Ok(FavoriteSort::DateNew),
            "date-old" => Ok(FavoriteSort::DateOld),
            _ => Err(UnknownValue {
                kind: "favorite sort",
                value: s.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

/// Favorites belonging to one show
#[derive(Debug, Clone, PartialEq)]
pub struct ShowGroup {
    pub show_title: String,
    pub favorites: Vec<FavoriteRecord>,
}

/// Group favorites by show title.
///
/// Groups appear in the order their first favorite appears; favorites keep
/// the collection's order within each group.
pub fn group_by_show(favorites: &[FavoriteRecord]) -> Vec<ShowGroup> {
    let mut groups: Vec<ShowGroup> = Vec::new();

    for favorite in favorites {
        match groups
            .iter_mut()
            .find(|group| group.show_title == favorite.show_title)
        {
            Some(group) => group.favorites.push(favorite.clone()),
            None => groups.push(ShowGroup {
                show_title: favorite.show_title.clone(),
                favorites: vec![favorite.clone()],
            }),
        }
    }

    groups
}

/// Stable sort of a list of favorites
pub fn sort_within(list: &[FavoriteRecord], sort_by: FavoriteSort) -> Vec<FavoriteRecord> {
    let mut sorted = list.to_vec();

    match sort_by {
        FavoriteSort::TitleAsc => sorted.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        FavoriteSort::TitleDesc => sorted.sort_by(|a, b| compare_titles(&b.title, &a.title)),
        FavoriteSort::DateNew => sorted.sort_by(|a, b| b.added_at.cmp(&a.added_at)),
        FavoriteSort::DateOld => sorted.sort_by(|a, b| a.added_at.cmp(&b.added_at)),
    }

    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::favorite_id;
    use chrono::{DateTime, Utc};

    fn at(ts: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(ts).unwrap().with_timezone(&Utc)
    }

    fn make_record(show: &str, title: &str, season: u32, episode: u32, added: &str) -> FavoriteRecord {
        FavoriteRecord {
            id: favorite_id(show, season, episode),
            title: title.to_string(),
            show_title: show.to_string(),
            season_number: season,
            episode_number: episode,
            description: String::new(),
            image: String::new(),
            file: format!("https://example.com/{episode}.mp3"),
            added_at: at(added),
        }
    }

    #[test]
    fn groups_alpha_and_beta_separately() {
        let alpha = make_record("Alpha", "Two", 1, 2, "2024-01-01T10:00:00Z");
        let beta = make_record("Beta", "One", 1, 1, "2024-01-02T10:00:00Z");

        let groups = group_by_show(&[alpha.clone(), beta.clone()]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].show_title, "Alpha");
        assert_eq!(groups[0].favorites, vec![alpha.clone()]);
        assert_eq!(groups[0].favorites[0].added_at, alpha.added_at);
        assert_eq!(groups[1].show_title, "Beta");
        assert_eq!(groups[1].favorites, vec![beta.clone()]);
        assert_eq!(groups[1].favorites[0].added_at, beta.added_at);
    }

    #[test]
    fn groups_keep_collection_order() {
        let a1 = make_record("Alpha", "A1", 1, 1, "2024-01-01T00:00:00Z");
        let b1 = make_record("Beta", "B1", 1, 1, "2024-01-02T00:00:00Z");
        let a2 = make_record("Alpha", "A2", 1, 2, "2024-01-03T00:00:00Z");

        let groups = group_by_show(&[a1.clone(), b1, a2.clone()]);

        assert_eq!(groups[0].favorites, vec![a1, a2]);
        assert_eq!(groups[1].favorites.len(), 1);
    }

    #[test]
    fn empty_favorites_have_no_groups() {
        assert!(group_by_show(&[]).is_empty());
    }

    #[test]
    fn sort_by_title_and_date() {
        let list = vec![
            make_record("Alpha", "banana", 1, 1, "2024-01-02T00:00:00Z"),
            make_record("Alpha", "Apple", 1, 2, "2024-01-03T00:00:00Z"),
            make_record("Alpha", "cherry", 1, 3, "2024-01-01T00:00:00Z"),
        ];

        let titles = |sorted: Vec<FavoriteRecord>| -> Vec<String> {
            sorted.into_iter().map(|r| r.title).collect()
        };

        assert_eq!(
            titles(sort_within(&list, FavoriteSort::TitleAsc)),
            ["Apple", "banana", "cherry"]
        );
        assert_eq!(
            titles(sort_within(&list, FavoriteSort::TitleDesc)),
            ["cherry", "banana", "Apple"]
        );
        assert_eq!(
            titles(sort_within(&list, FavoriteSort::DateNew)),
            ["Apple", "banana", "cherry"]
        );
        assert_eq!(
            titles(sort_within(&list, FavoriteSort::DateOld)),
            ["cherry", "banana", "Apple"]
        );
    }

    #[test]
    fn sort_is_stable_for_equal_dates() {
        let list = vec![
            make_record("Alpha", "first", 1, 1, "2024-01-01T00:00:00Z"),
            make_record("Alpha", "second", 1, 2, "2024-01-01T00:00:00Z"),
        ];

        let sorted = sort_within(&list, FavoriteSort::DateNew);
        assert_eq!(sorted[0].title, "first");
        assert_eq!(sorted[1].title, "second");
    }

    #[test]
    fn parse_sort_names() {
        assert_eq!("title-asc".parse::<FavoriteSort>().unwrap(), FavoriteSort::TitleAsc);
        assert_eq!("DATE-OLD".parse::<FavoriteSort>().unwrap(), FavoriteSort::DateOld);
        assert_eq!(FavoriteSort::default().to_string(), "date-new");
        assert!("newest".parse::<FavoriteSort>().is_err());
    }
}
