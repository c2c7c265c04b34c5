// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cmp::Reverse;

use crate::api::ShowPreview;
use crate::genre::GenreId;

/// Shows related to one with the given genres.
///
/// Candidates share at least one genre; those sharing more genres come
/// first, ties go to the most recently updated. The show itself
/// (`exclude_id`) is never recommended.
pub fn recommend(
    shows: &[ShowPreview],
    genres: &[GenreId],
    exclude_id: u64,
    limit: usize,
) -> Vec<ShowPreview> {
    let mut candidates: Vec<(usize, &ShowPreview)> = shows
        .iter()
        .filter(|show| show.id != exclude_id)
        .map(|show| {
            let shared = show.genres.iter().filter(|g| genres.contains(g)).count();
            (shared, show)
        })
        .filter(|(shared, _)| *shared > 0)
        .collect();

    candidates.sort_by_key(|(shared, show)| (Reverse(*shared), Reverse(show.updated_at())));

    candidates
        .into_iter()
        .take(limit)
        .map(|(_, show)| show.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::query::tests::make_show;

    #[test]
    fn ranks_by_shared_genres_then_recency() {
        let shows = vec![
            make_show(1, "Current", &[1, 2], "2024-01-01"),
            make_show(2, "One shared, old", &[1], "2023-01-01"),
            make_show(3, "Two shared", &[1, 2, 5], "2022-01-01"),
            make_show(4, "One shared, new", &[2], "2024-06-01"),
            make_show(5, "Unrelated", &[7], "2024-07-01"),
        ];

        let related = recommend(&shows, &[1, 2], 1, 10);
        let ids: Vec<u64> = related.iter().map(|s| s.id).collect();

        assert_eq!(ids, vec![3, 4, 2]);
    }

    #[test]
    fn respects_limit() {
        let shows: Vec<_> = (1..=10)
            .map(|n| make_show(n, &format!("Show {n}"), &[4], "2024-01-01"))
            .collect();

        assert_eq!(recommend(&shows, &[4], 1, 3).len(), 3);
        assert!(recommend(&shows, &[4], 1, 0).is_empty());
    }

    #[test]
    fn no_genres_no_recommendations() {
        let shows = vec![make_show(1, "A", &[1], "2024-01-01")];
        assert!(recommend(&shows, &[], 99, 5).is_empty());
    }
}
