// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

/// Maximum number of characters shown for an episode description
pub const EPISODE_DESCRIPTION_CHARS: usize = 200;

/// Maximum number of words shown for a favorite's description
pub const FAVORITE_DESCRIPTION_WORDS: usize = 50;

/// Decode HTML entities such as `&amp;` found in API titles
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// Compare two titles the way a human reader would order them.
///
/// Letters compare case-insensitively; titles that only differ in case
/// fall back to a plain comparison so the order stays total.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| a.cmp(b))
}

/// Case-insensitive substring test; an empty needle always matches
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Keep the first `limit` words, appending an ellipsis when cut
pub fn first_words(text: &str, limit: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= limit {
        return words.join(" ");
    }
    format!("{}…", words[..limit].join(" "))
}

/// Keep the first `max_chars` characters, appending an ellipsis when cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}…", truncated.trim_end())
}

/// Format a show's last update, e.g. "03 November 2022"
pub fn format_updated(updated: &DateTime<Utc>) -> String {
    updated.format("%d %B %Y").to_string()
}

/// Format when a favorite was added, e.g. "Added on Jan 1, 2022 | 14:30"
pub fn format_added_at(added_at: &DateTime<Utc>) -> String {
    format!("Added on {}", added_at.format("%b %-d, %Y | %H:%M"))
}

/// Heading for a season: "Season 2" or "Season 2 - The Return".
///
/// Season titles that already mention the word "season" are not repeated.
pub fn season_heading(number: usize, title: Option<&str>) -> String {
    match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) if !title.to_lowercase().contains("season") => {
            format!("Season {number} - {title}")
        }
        _ => format!("Season {number}"),
    }
}

/// "1 episode" / "3 episodes"
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
