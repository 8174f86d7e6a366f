//! Texture load progress and retry bookkeeping.
//!
//! The host owns the actual image fetches and reports what happens to each
//! one. The tracker turns those reports into a progress percentage and
//! decides when a failure should trigger a scene rebuild.

/// Scene rebuilds allowed after texture failures before giving up.
pub const MAX_LOAD_RETRIES: u32 = 5;

/// Host report about one texture fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadEvent {
    /// A fetch was started.
    Queued {
        /// Texture URL.
        url: String,
    },
    /// A fetch finished successfully.
    Loaded {
        /// Texture URL.
        url: String,
    },
    /// A fetch failed.
    Failed {
        /// Texture URL.
        url: String,
    },
}

/// What the engine should do after a [`LoadEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing to report.
    Pending,
    /// Progress changed; percentage in `0..=100`, truncated.
    Progress(u8),
    /// Every queued texture has loaded.
    Complete,
    /// A texture failed; reset and rebuild the scene.
    Rebuild,
    /// Too many failures; leave the scene as is.
    GiveUp,
}

/// Counts queued and loaded textures plus failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadTracker {
    total: usize,
    loaded: usize,
    retries: u32,
    complete: bool,
}

impl LoadTracker {
    /// Nothing queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loaded percentage, or `None` before anything was queued.
    #[must_use]
    pub fn progress(&self) -> Option<u8> {
        if self.total == 0 {
            return None;
        }
        let pct = self.loaded.min(self.total) * 100 / self.total;
        u8::try_from(pct).ok()
    }

    /// Whether every queued texture has loaded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Rebuilds triggered so far.
    #[must_use]
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Forget the counts of the previous scene; the retry budget carries
    /// over across rebuilds.
    pub fn reset_counts(&mut self) {
        self.total = 0;
        self.loaded = 0;
        self.complete = false;
    }

    /// Fold one host report into the counters.
    pub fn record(&mut self, event: &LoadEvent) -> LoadOutcome {
        match event {
            LoadEvent::Queued { .. } => {
                self.total += 1;
                self.complete = false;
                LoadOutcome::Pending
            }
            LoadEvent::Loaded { .. } => {
                if self.total == 0 {
                    return LoadOutcome::Pending;
                }
                self.loaded += 1;
                if self.loaded >= self.total {
                    self.complete = true;
                    LoadOutcome::Complete
                } else {
                    self.progress()
                        .map_or(LoadOutcome::Pending, LoadOutcome::Progress)
                }
            }
            LoadEvent::Failed { url } => {
                if self.retries < MAX_LOAD_RETRIES {
                    self.retries += 1;
                    log::warn!(
                        "texture {url} failed to load, rebuilding scene ({}/{MAX_LOAD_RETRIES})",
                        self.retries
                    );
                    LoadOutcome::Rebuild
                } else {
                    log::error!("texture {url} failed to load, giving up after {MAX_LOAD_RETRIES} retries");
                    LoadOutcome::GiveUp
                }
            }
        }
    }
}
