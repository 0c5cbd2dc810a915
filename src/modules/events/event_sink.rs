use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::Result;

/// Destination for analytics events.
///
/// The sink is an external collaborator as far as primary actions are
/// concerned: callers go through [`track`], which never propagates failures.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn record(
        &self,
        user_id: Option<Uuid>,
        event_name: &str,
        metadata: Option<Value>,
    ) -> Result<()>;
}

/// Postgres-backed sink writing to the append-only `events` table.
pub struct PgEventSink {
    pool: PgPool,
}

impl PgEventSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventSink for PgEventSink {
    async fn record(
        &self,
        user_id: Option<Uuid>,
        event_name: &str,
        metadata: Option<Value>,
    ) -> Result<()> {
        sqlx::query("INSERT INTO events (user_id, event_name, metadata) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(event_name)
            .bind(metadata)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Emit an event without blocking or failing the calling action. The write
/// happens on a spawned task; a failed insert is logged at warn level and
/// dropped.
pub fn track(
    sink: &Arc<dyn EventSink>,
    user_id: Option<Uuid>,
    event_name: &str,
    metadata: Option<Value>,
) {
    let sink = Arc::clone(sink);
    let event_name = event_name.to_string();
    tokio::spawn(async move {
        if let Err(e) = sink.record(user_id, &event_name, metadata).await {
            tracing::warn!("Event tracking failed for '{}': {}", event_name, e);
        }
    });
}

/// In-memory sink recording events for assertions in tests.
#[cfg(test)]
pub struct RecordingEventSink {
    pub events: std::sync::Mutex<Vec<(Option<Uuid>, String, Option<Value>)>>,
}

#[cfg(test)]
impl RecordingEventSink {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(_, name, _)| name.clone())
            .collect()
    }
}

#[cfg(test)]
#[async_trait]
impl EventSink for RecordingEventSink {
    async fn record(
        &self,
        user_id: Option<Uuid>,
        event_name: &str,
        metadata: Option<Value>,
    ) -> Result<()> {
        self.events
            .lock()
            .unwrap()
            .push((user_id, event_name.to_string(), metadata));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_track_records_event() {
        let recording = Arc::new(RecordingEventSink::new());
        let sink: Arc<dyn EventSink> = recording.clone();

        track(
            &sink,
            Some(Uuid::new_v4()),
            "donate_succeeded",
            Some(serde_json::json!({ "amount_cents": 2500 })),
        );

        // Let the spawned write run
        for _ in 0..100 {
            if !recording.names().is_empty() {
                break;
            }
            tokio::task::yield_now().await;
        }

        assert_eq!(recording.names(), vec!["donate_succeeded".to_string()]);
    }
}
