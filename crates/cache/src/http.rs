use async_trait::async_trait;
use seatlock_types::enums::InvalidationScope;
use seatlock_types::ids::EventId;
use std::time::Duration;

use crate::hook::CacheInvalidationHook;

/// Fires a fire-and-forget POST at a configured sink whenever the
/// coordinator wants the availability cache to drop an event's entries.
/// Errors are logged and swallowed: a lost invalidation only delays the
/// cache converging on the durable store's answer.
pub struct HttpInvalidationHook {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(serde::Serialize)]
struct InvalidationPayload {
    event_id: EventId,
    scope: &'static str,
}

impl HttpInvalidationHook {
    pub fn new(endpoint: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .expect("reqwest client builds with static config");

        Self { client, endpoint }
    }
}

#[async_trait]
impl CacheInvalidationHook for HttpInvalidationHook {
    async fn invalidate(&self, event_id: EventId, scope: InvalidationScope) {
        let payload = InvalidationPayload {
            event_id,
            scope: scope.as_str(),
        };

        if let Err(err) = self.client.post(&self.endpoint).json(&payload).send().await {
            tracing::warn!(%event_id, scope = scope.as_str(), error = %err, "cache invalidation POST failed");
        }
    }
}
