//! Discovery feed: three content streams (quotes, images, videos) fetched
//! independently so one slow or failing source never blanks the others.

pub mod handlers;
pub mod view_model;

pub use view_model::FeedViewModel;

use serde::{Deserialize, Serialize};

use crate::errors::ErrorKind;
use crate::models::content::{Image, Quote, Video};

/// The three independently fetched content streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Quotes,
    Images,
    Videos,
}

impl Stream {
    pub const ALL: [Stream; 3] = [Stream::Quotes, Stream::Images, Stream::Videos];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stream::Quotes => "quotes",
            Stream::Images => "images",
            Stream::Videos => "videos",
        }
    }
}

/// Quote search filter. Images and videos are never filtered; an empty
/// filter matches every quote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchFilter {
    #[serde(default)]
    pub search_term: String,
    pub category: Option<String>,
    pub author: Option<String>,
}

/// Why a stream has no fresh data. Held per stream so the caller can tell
/// "quotes are down" apart from "videos are down".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl StreamFailure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Point-in-time copy of one stream's slot.
#[derive(Debug, Clone, Serialize)]
pub struct StreamSnapshot<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<StreamFailure>,
}

/// Point-in-time copy of the whole feed.
#[derive(Debug, Clone, Serialize)]
pub struct FeedSnapshot {
    pub quotes: StreamSnapshot<Quote>,
    pub images: StreamSnapshot<Image>,
    pub videos: StreamSnapshot<Video>,
}

impl FeedSnapshot {
    /// Merged loading flag: true while any stream is still in flight.
    pub fn loading(&self) -> bool {
        self.quotes.loading || self.images.loading || self.videos.loading
    }

    /// First stream failure in quotes, images, videos order, if any.
    pub fn first_error(&self) -> Option<&StreamFailure> {
        self.quotes
            .error
            .as_ref()
            .or(self.images.error.as_ref())
            .or(self.videos.error.as_ref())
    }
}
