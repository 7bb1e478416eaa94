//! Session-scoped feed state machine.
//!
//! Each stream slot carries a sequence number that is bumped every time a
//! fetch is issued for it. A completion only lands if it carries the latest
//! sequence number, so a slow response from a superseded search can never
//! overwrite newer results. Superseded fetch tasks are also aborted
//! outright; the sequence check covers the window where the abort loses the
//! race with completion.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::warn;
use uuid::Uuid;

use crate::engagement::{EngagementOutcome, EngagementService};
use crate::errors::{AppError, ErrorKind};
use crate::models::content::{EngagementKind, Image, Quote, Video};
use crate::repo::ContentRepository;
use crate::session::UserSession;

use super::{FeedSnapshot, SearchFilter, Stream, StreamFailure, StreamSnapshot};

/// One stream's slot: its items plus the in-flight bookkeeping.
#[derive(Debug)]
struct StreamState<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<StreamFailure>,
    issued: u64,
}

impl<T> Default for StreamState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            issued: 0,
        }
    }
}

impl<T> StreamState<T> {
    /// Marks a new fetch in flight and returns its sequence number.
    fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.loading = true;
        self.error = None;
        self.issued
    }

    /// Lands a completed fetch. Returns false (and changes nothing) when a
    /// newer fetch has been issued since `seq` was handed out.
    fn apply(&mut self, seq: u64, outcome: Result<Vec<T>, StreamFailure>) -> bool {
        if seq != self.issued {
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            // Keep the previous items on failure; the caller still has
            // something to show alongside the error.
            Err(failure) => self.error = Some(failure),
        }
        true
    }

    fn snapshot(&self) -> StreamSnapshot<T>
    where
        T: Clone,
    {
        StreamSnapshot {
            items: self.items.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

#[derive(Default)]
struct FeedState {
    filter: SearchFilter,
    quotes: StreamState<Quote>,
    images: StreamState<Image>,
    videos: StreamState<Video>,
    tasks: HashMap<Stream, JoinHandle<()>>,
}

struct Inner {
    repo: Arc<dyn ContentRepository>,
    fetch_timeout: Duration,
    state: Mutex<FeedState>,
    changed: watch::Sender<u64>,
}

impl Inner {
    fn bump(&self) {
        self.changed.send_modify(|v| *v = v.wrapping_add(1));
    }
}

/// Aggregates the three discovery streams for one session, and carries the
/// session's engagement callables. Streams are fetched concurrently and
/// independently: a failure or stall in one never blocks or blanks the
/// other two.
pub struct FeedViewModel {
    session: UserSession,
    engagement: EngagementService,
    inner: Arc<Inner>,
}

impl FeedViewModel {
    pub fn new(
        session: UserSession,
        repo: Arc<dyn ContentRepository>,
        fetch_timeout: Duration,
    ) -> Self {
        Self::with_filter(session, repo, fetch_timeout, SearchFilter::default())
    }

    /// Starts idle with `filter` already in place, so the first `refresh`
    /// queries quotes with it instead of the empty default.
    pub fn with_filter(
        session: UserSession,
        repo: Arc<dyn ContentRepository>,
        fetch_timeout: Duration,
        filter: SearchFilter,
    ) -> Self {
        let (changed, _) = watch::channel(0u64);
        Self {
            session,
            engagement: EngagementService::new(repo.clone()),
            inner: Arc::new(Inner {
                repo,
                fetch_timeout,
                state: Mutex::new(FeedState {
                    filter,
                    ..FeedState::default()
                }),
                changed,
            }),
        }
    }

    /// Replaces the quote filter and re-issues only the quote fetch. Images
    /// and videos are unfiltered, so their slots are left untouched. Setting
    /// the filter the feed already has is a no-op.
    pub async fn set_filter(&self, filter: SearchFilter) {
        {
            let mut state = self.inner.state.lock().await;
            if state.filter == filter {
                return;
            }
            state.filter = filter;
        }
        self.begin(Stream::Quotes).await;
    }

    /// Issues fresh fetches for all three streams, superseding any in
    /// flight.
    pub async fn refresh(&self) {
        for stream in Stream::ALL {
            self.begin(stream).await;
        }
    }

    pub async fn snapshot(&self) -> FeedSnapshot {
        let state = self.inner.state.lock().await;
        FeedSnapshot {
            quotes: state.quotes.snapshot(),
            images: state.images.snapshot(),
            videos: state.videos.snapshot(),
        }
    }

    /// Resolves once no stream is loading. Returns immediately if the feed
    /// is already quiet.
    pub async fn settled(&self) {
        let mut rx = self.inner.changed.subscribe();
        loop {
            if !self.snapshot().await.loading() {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// One-shot aggregation: refresh everything, wait for quiescence,
    /// return the resulting snapshot.
    pub async fn run_once(&self) -> FeedSnapshot {
        self.refresh().await;
        self.settled().await;
        self.snapshot().await
    }

    /// Likes a content item as the session user. Engagement is
    /// fire-and-forget with respect to the streams: the stored row never
    /// feeds back into the fetched lists.
    pub async fn like(&self, content_id: Uuid) -> Result<EngagementOutcome, AppError> {
        self.engage(EngagementKind::Like, content_id, None).await
    }

    pub async fn comment(
        &self,
        content_id: Uuid,
        text: &str,
    ) -> Result<EngagementOutcome, AppError> {
        self.engage(EngagementKind::Comment, content_id, Some(text))
            .await
    }

    pub async fn share(&self, content_id: Uuid) -> Result<EngagementOutcome, AppError> {
        self.engage(EngagementKind::Share, content_id, None).await
    }

    pub async fn save(&self, content_id: Uuid) -> Result<EngagementOutcome, AppError> {
        self.engage(EngagementKind::Save, content_id, None).await
    }

    async fn engage(
        &self,
        kind: EngagementKind,
        content_id: Uuid,
        text: Option<&str>,
    ) -> Result<EngagementOutcome, AppError> {
        self.engagement
            .perform(&self.session, kind, content_id, text)
            .await
    }

    async fn begin(&self, stream: Stream) {
        let mut state = self.inner.state.lock().await;
        let repo = self.inner.repo.clone();
        let handle = match stream {
            Stream::Quotes => {
                let filter = state.filter.clone();
                let seq = state.quotes.begin();
                spawn_fetch(
                    self.inner.clone(),
                    stream,
                    seq,
                    async move { repo.find_quotes(&filter).await },
                    |s| &mut s.quotes,
                )
            }
            Stream::Images => {
                let seq = state.images.begin();
                spawn_fetch(
                    self.inner.clone(),
                    stream,
                    seq,
                    async move { repo.find_images().await },
                    |s| &mut s.images,
                )
            }
            Stream::Videos => {
                let seq = state.videos.begin();
                spawn_fetch(
                    self.inner.clone(),
                    stream,
                    seq,
                    async move { repo.find_videos().await },
                    |s| &mut s.videos,
                )
            }
        };
        if let Some(prev) = state.tasks.insert(stream, handle) {
            prev.abort();
        }
        drop(state);
        self.inner.bump();
    }
}

impl Drop for FeedViewModel {
    fn drop(&mut self) {
        // Best effort; a fetch that slips through still cannot outlive its
        // sequence number.
        if let Ok(mut state) = self.inner.state.try_lock() {
            for (_, task) in state.tasks.drain() {
                task.abort();
            }
        }
    }
}

/// Runs one fetch under the feed's timeout and lands its outcome in the
/// owning slot.
fn spawn_fetch<T, Fut>(
    inner: Arc<Inner>,
    stream: Stream,
    seq: u64,
    fetch: Fut,
    slot: fn(&mut FeedState) -> &mut StreamState<T>,
) -> JoinHandle<()>
where
    T: Send + 'static,
    Fut: Future<Output = Result<Vec<T>, AppError>> + Send + 'static,
{
    tokio::spawn(async move {
        let outcome = match tokio::time::timeout(inner.fetch_timeout, fetch).await {
            Ok(Ok(items)) => Ok(items),
            Ok(Err(err)) => {
                warn!("{} fetch failed: {err}", stream.as_str());
                Err(StreamFailure::new(err.kind(), err.public_message()))
            }
            Err(_) => {
                warn!(
                    "{} fetch timed out after {:?}",
                    stream.as_str(),
                    inner.fetch_timeout
                );
                Err(StreamFailure::new(
                    ErrorKind::Network,
                    format!("{} fetch timed out", stream.as_str()),
                ))
            }
        };
        let applied = slot(&mut *inner.state.lock().await).apply(seq, outcome);
        if applied {
            inner.bump();
        }
    })
}
