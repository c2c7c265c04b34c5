mod fetch;
mod types;

pub use fetch::{CatalogClient, DEFAULT_API_BASE, DetailLoader};
pub use types::{Episode, GenreRef, Season, Show, ShowPreview, parse_timestamp};
