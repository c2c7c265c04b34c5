// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;
use std::str::FromStr;

use crate::api::ShowPreview;
use crate::error::UnknownValue;
use crate::genre::{self, GenreId};
use crate::text::{compare_titles, contains_ignore_case};

/// Shows per catalog page
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Catalog sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Most recently updated first
    #[default]
    Newest,
    /// Least recently updated first
    Oldest,
    /// Title, A to Z
    TitleAsc,
    /// Title, Z to A
    TitleDesc,
}

impl SortOrder {
    const EXPECTED: &'static str = "Newest, Oldest, TitleAsc, TitleDesc";

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest",
            SortOrder::Oldest => "Oldest",
            SortOrder::TitleAsc => "TitleAsc",
            SortOrder::TitleDesc => "TitleDesc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = UnknownValue;

    /// Accepts `TitleAsc`, `title-asc`, `title_asc` and so on
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "titleasc" => Ok(SortOrder::TitleAsc),
            "titledesc" => Ok(SortOrder::TitleDesc),
            _ => Err(UnknownValue {
                kind: "sort order",
                value: s.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

/// Genre restriction applied to the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenreFilter {
    #[default]
    All,
    Genre(GenreId),
}

impl GenreFilter {
    /// Whether a show with the given genres passes the filter
    pub fn matches(&self, genres: &[GenreId]) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Genre(id) => genres.contains(id),
        }
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreFilter::All => f.write_str("All Genres"),
            GenreFilter::Genre(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for GenreFilter {
    type Err = UnknownValue;

    /// Accepts "all", "All Genres", a genre id or a genre title
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();

        if value.is_empty()
            || value.eq_ignore_ascii_case("all")
            || value.eq_ignore_ascii_case("all genres")
        {
            return Ok(GenreFilter::All);
        }

        if let Ok(id) = value.parse::<GenreId>() {
            return Ok(GenreFilter::Genre(id));
        }

        genre::by_title(value)
            .map(|g| GenreFilter::Genre(g.id))
            .ok_or_else(|| UnknownValue {
                kind: "genre",
                value: s.to_string(),
                expected: "all, a genre id or a genre title",
            })
    }
}

/// Search, filter, sort and page selection for the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryState {
    pub search_text: String,
    pub genre_filter: GenreFilter,
    pub sort_order: SortOrder,
    /// 1-based page number
    pub current_page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            genre_filter: GenreFilter::All,
            sort_order: SortOrder::Newest,
            current_page: 1,
        }
    }
}

impl QueryState {
    /// Change the search text; goes back to the first page
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self.current_page = 1;
        self
    }

    /// Change the genre filter; goes back to the first page
    pub fn with_genre(mut self, genre_filter: GenreFilter) -> Self {
        self.genre_filter = genre_filter;
        self.current_page = 1;
        self
    }

    /// Change the sort order; goes back to the first page
    pub fn with_sort(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self.current_page = 1;
        self
    }

    /// Jump to a page; page numbers below 1 become 1
    pub fn with_page(mut self, page: usize) -> Self {
        self.current_page = page.max(1);
        self
    }

    /// Reset to page 1 when the current page lies beyond `total_pages`.
    ///
    /// Returns whether the page changed, in which case the query needs to
    /// be applied again.
    pub fn settle(&mut self, total_pages: usize) -> bool {
        if self.current_page > total_pages.max(1) || self.current_page == 0 {
            self.current_page = 1;
            return true;
        }
        false
    }
}

/// One page of query results
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<ShowPreview>,
    /// The 1-based page this is
    pub page: usize,
    pub total_pages: usize,
    /// Number of shows matching the query across all pages
    pub total_items: usize,
}

impl Page {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Keep shows whose title contains `text`, ignoring case
pub fn search<'a>(shows: &'a [ShowPreview], text: &str) -> Vec<&'a ShowPreview> {
    shows
        .iter()
        .filter(|show| contains_ignore_case(&show.title, text))
        .collect()
}

/// Keep shows that pass the genre filter
pub fn filter_genre<'a>(shows: Vec<&'a ShowPreview>, filter: GenreFilter) -> Vec<&'a ShowPreview> {
    shows
        .into_iter()
        .filter(|show| filter.matches(&show.genres))
        .collect()
}

/// Stable sort by the given order
pub fn sort_shows(shows: &mut [&ShowPreview], order: SortOrder) {
    match order {
        SortOrder::Newest => shows.sort_by(|a, b| b.updated_at().cmp(&a.updated_at())),
        SortOrder::Oldest => shows.sort_by(|a, b| a.updated_at().cmp(&b.updated_at())),
        SortOrder::TitleAsc => shows.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortOrder::TitleDesc => shows.sort_by(|a, b| compare_titles(&b.title, &a.title)),
    }
}

/// Run the catalog pipeline: search, genre filter, sort, paginate.
///
/// Never fails. A page beyond the last one yields no items; correcting the
/// page is up to the caller (see [`QueryState::settle`]). A `page_size` of
/// zero is treated as one.
pub fn apply(shows: &[ShowPreview], query: &QueryState, page_size: usize) -> Page {
    let page_size = page_size.max(1);

    let matched = search(shows, &query.search_text);
    let mut matched = filter_genre(matched, query.genre_filter);
    sort_shows(&mut matched, query.sort_order);

    let total_items = matched.len();
    let total_pages = total_items.div_ceil(page_size);
    let page = query.current_page.max(1);

    let items = matched
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .cloned()
        .collect();

    Page {
        items,
        page,
        total_pages,
        total_items,
    }
}
