mod memo;
mod query;
mod recommend;

pub use memo::QueryCache;
pub use query::{
    DEFAULT_PAGE_SIZE, GenreFilter, Page, QueryState, SortOrder, apply, filter_genre, search,
    sort_shows,
};
pub use recommend::recommend;
