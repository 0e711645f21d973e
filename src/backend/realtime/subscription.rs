/**
 * Story Room Subscription Handler
 *
 * This module implements the Server-Sent Events (SSE) subscription
 * handler for `GET /api/stories/{id}/events`. Subscribers receive every
 * event broadcast into the story room: new contributions, votes,
 * comments, the active-user roster, and typing indicators.
 *
 * # Server-Sent Events
 *
 * SSE provides a one-way stream from server to client, which fits the
 * fan-out here; clients act through the regular JSON endpoints. The
 * stream is kept alive with periodic comment lines injected by Axum's
 * keep-alive mechanism.
 *
 * # Lag Handling
 *
 * A slow consumer that falls behind the channel capacity misses the
 * skipped events and continues from the next one; the lag is logged.
 */

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream;
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;
use crate::backend::stories::db as stories_db;

/// Handle a story room subscription (GET /api/stories/{id}/events)
///
/// # Errors
///
/// * `404 Not Found` - the story does not exist
/// * `503 Service Unavailable` - database not configured
pub async fn handle_story_subscription(
    State(state): State<AppState>,
    Path(story_id): Path<Uuid>,
) -> Result<Sse<impl tokio_stream::Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    let pool = state.pool()?;

    if stories_db::get_story(pool, story_id).await?.is_none() {
        return Err(ApiError::not_found("Story"));
    }

    tracing::info!("[Realtime] New subscriber for story {}", story_id);

    let rx = state.rooms.sender(story_id).subscribe();

    // Loop until we get a meaningful event; lagged receivers skip ahead
    let stream = stream::unfold(rx, move |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let data = match serde_json::to_string(&event) {
                        Ok(data) => data,
                        Err(e) => {
                            tracing::error!("[Realtime] Failed to serialize event: {:?}", e);
                            continue;
                        }
                    };
                    let sse_event = Event::default().event(event.sse_event_name()).data(data);
                    return Some((Ok(sse_event), rx));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("[Realtime] Subscriber lagged, skipped {} events", skipped);
                    continue;
                }
                Err(RecvError::Closed) => {
                    tracing::debug!("[Realtime] Story room channel closed");
                    return None;
                }
            }
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
