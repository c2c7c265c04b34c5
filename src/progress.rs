use std::sync::Arc;

/// Events emitted while talking to the catalog API
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// The show catalog is being fetched
    FetchingCatalog { url: String },

    /// The show catalog arrived and was decoded
    CatalogLoaded { show_count: usize },

    /// A single show's details are being fetched
    FetchingShow { url: String, show_id: u64 },

    /// A show's details arrived and were decoded
    ShowLoaded {
        show_title: String,
        season_count: usize,
        episode_count: usize,
    },

    /// A show detail response arrived after a newer request was issued
    StaleShowDiscarded { show_id: u64 },

    /// A fetch failed
    FetchFailed { url: String, error: String },
}

/// Trait for reporting progress events while fetching.
///
/// Implementations can use this to display spinners, log messages,
/// or collect statistics.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: ProgressEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// A no-op progress reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {}
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}
