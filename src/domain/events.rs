//! Notification payloads published to the presentation layer.
//!
//! These events are broadcast on the search service's event bus whenever its
//! observable state changes. Subscribers only ever see snapshots.

use serde::Serialize;

use crate::clients::SearchError;
use crate::models::photo::Photo;

/// Events sent to presentation-layer subscribers.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum StreamEvent {
    /// The accumulated result list changed; carries a full snapshot.
    ResultsChanged { photos: Vec<Photo> },

    /// A fetch started (`true`) or finished (`false`).
    LoadingChanged { is_loading: bool },

    /// A fetch failed. Results accumulated from earlier pages are untouched.
    SearchFailed { error: SearchError },
}
