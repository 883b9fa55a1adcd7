use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::models::photo::Photo;

pub mod flickr;
pub use flickr::FlickrClient;

/// Errors produced by a photo search call.
///
/// Every error is terminal for its request: there is no retry, and a failed
/// page fetch never discards results accumulated from earlier pages.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum SearchError {
    /// The search text was empty after trimming; no request was made.
    #[error("search text must not be empty")]
    InvalidQuery,

    /// Transport failure, or a response with a non-success HTTP status.
    #[error("request failed: {message}")]
    RequestFailed {
        /// HTTP status code, when a response was received at all.
        status: Option<u16>,
        message: String,
    },

    /// The response body did not match the expected photo-list shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Seam over the remote photo-search endpoint.
///
/// The production implementation is [`FlickrClient`]; the search service is
/// tested against scripted implementations of this trait.
#[async_trait]
pub trait PhotoSearch: Send + Sync {
    /// Fetches one page of results for `text`. Pages are 1-indexed.
    ///
    /// A success with an empty list means "no results", not failure.
    async fn search(&self, text: &str, page: u32) -> Result<Vec<Photo>, SearchError>;
}
