//! Live activity feed over Server-Sent Events.
//!
//! Bridges the in-process broadcast channel to a per-user SSE stream.
//! Delivery is best-effort: the durable activity journal remains the
//! source of truth, and a subscriber that lagged or reconnected can
//! backfill with the `after` cursor on `GET /v1/activities`.

use std::convert::Infallible;

use axum::response::sse::Event;
use futures::stream::{self, Stream};
use tokio::sync::broadcast;

use veda_rewards_core::{UserActivity, UserId};

use crate::handlers::activities::ActivityResponse;

/// Build the SSE event stream for one user's activity feed.
///
/// Entries for other users are filtered out. A subscriber that falls
/// behind the channel capacity skips ahead instead of disconnecting;
/// the stream ends when the sender side is dropped.
pub fn user_activity_stream(
    rx: broadcast::Receiver<UserActivity>,
    user_id: UserId,
) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold(rx, move |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(entry) => {
                    if entry.user_id != user_id {
                        continue;
                    }
                    match feed_event(&entry) {
                        Ok(event) => return Some((Ok(event), rx)),
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to serialize feed entry");
                        }
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(user_id = %user_id, skipped, "Feed subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    })
}

/// Convert a journal entry into an SSE event named after its kind.
fn feed_event(entry: &UserActivity) -> Result<Event, axum::Error> {
    Event::default()
        .event(entry.data.kind().as_str())
        .json_data(ActivityResponse::from(entry))
}
