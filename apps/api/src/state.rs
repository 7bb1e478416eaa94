use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::engagement::EngagementService;
use crate::journal::JournalService;
use crate::music::MusicService;
use crate::repo::ContentRepository;
use crate::suggestions::SuggestionService;
use crate::upload::UploadService;

/// Shared application state, cloned cheaply per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub repo: Arc<dyn ContentRepository>,
    pub engagement: Arc<EngagementService>,
    pub uploads: Arc<UploadService>,
    pub music: Arc<MusicService>,
    pub journal: Arc<JournalService>,
    pub suggestions: Arc<SuggestionService>,
}

impl AppState {
    /// Per-stream time limit for feed fetches.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.config.fetch_timeout_secs)
    }
}
