pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod genre;
pub mod http;
pub mod player;
pub mod progress;
pub mod session;
pub mod storage;
pub mod text;
pub mod theme;

// Re-export main types for convenience
pub use api::{CatalogClient, DEFAULT_API_BASE, DetailLoader, Episode, Season, Show, ShowPreview};
pub use catalog::{DEFAULT_PAGE_SIZE, GenreFilter, Page, QueryCache, QueryState, SortOrder, apply};
pub use config::Settings;
pub use error::{ApiError, ConfigError, PlaybackError, StoreError, UnknownValue};
pub use favorites::{FavoriteRecord, FavoriteSort, FavoritesStore, ShowGroup};
pub use genre::{Genre, GenreId};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use player::{AudioPlaybackController, ExternalPlayer, MediaElement, PlaybackState, Track};
pub use progress::{NoopReporter, ProgressEvent, ProgressReporter, SharedProgressReporter};
pub use session::QuerySession;
pub use storage::{FileStore, KeyValueStore, MemoryStore, SharedStore};
pub use theme::{Theme, ThemePreference};
