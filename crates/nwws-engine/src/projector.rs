//! The warning projector: collapses the transactional VTEC event/update
//! model into the denormalized [`Warning`] rows the live hub and bus
//! consumers actually read.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use nwws_model::{Envelope, EnvelopeKind, EventId, Polygon, SegmentMotion, VtecAction, Warning};
use nwws_store::WarningStore;

use crate::error::EngineError;
use crate::publisher::EventPublisher;

/// A descriptor whose `ends` is older than this is a replay of an
/// archived product; projecting it would resurrect a dead warning.
const STALE_AFTER: Duration = Duration::hours(24);

pub struct WarningProjector<WS, P> {
    warnings: WS,
    pub(crate) publisher: P,
}

impl<WS: WarningStore, P: EventPublisher> WarningProjector<WS, P> {
    pub fn new(warnings: WS, publisher: P) -> Self {
        Self { warnings, publisher }
    }

    /// One VTEC descriptor's worth of projection:
    ///
    /// 1. Unless `skip_supersede` (this event already had a row
    ///    projected earlier in the same product), mark every currently
    ///    current row for this event non-current and publish a DELETE
    ///    for each.
    /// 2. Insert the new row, current unless the action is terminal.
    /// 3. Publish DELETE for CAN/UPG, NEW otherwise.
    #[allow(clippy::too_many_arguments)]
    pub async fn project(
        &self,
        event_id: &EventId,
        action: VtecAction,
        zones: Vec<String>,
        polygon: Option<Polygon>,
        motion: Option<SegmentMotion>,
        tags: HashMap<String, String>,
        title: String,
        is_emergency: bool,
        is_pds: bool,
        expires_initial: DateTime<Utc>,
        ends: DateTime<Utc>,
        now: DateTime<Utc>,
        skip_supersede: bool,
    ) -> Result<(), EngineError> {
        if Self::is_stale(ends, now) {
            return Ok(());
        }

        if !skip_supersede {
            for row in self.warnings.find_current(event_id).await? {
                self.warnings.set_current(row.row_id, false, now).await?;
                self.publisher
                    .publish(Envelope::new(
                        EnvelopeKind::Delete,
                        "warnings",
                        row.composite_id(),
                        row.to_wire_json(),
                    ))
                    .await?;
            }
        }

        let warning = Warning {
            row_id: 0,
            event: event_id.clone(),
            action,
            zones,
            polygon,
            motion,
            tags,
            current: !action.is_terminal(),
            title,
            is_emergency,
            is_pds,
            expires_initial,
            ends,
            created_at: now,
            updated_at: now,
        };
        let row_id = self.warnings.insert(warning.clone()).await?;
        let mut stored = warning;
        stored.row_id = row_id;

        let kind = if matches!(action, VtecAction::Can | VtecAction::Upg) {
            EnvelopeKind::Delete
        } else {
            EnvelopeKind::New
        };
        self.publisher
            .publish(Envelope::new(kind, "warnings", stored.composite_id(), stored.to_wire_json()))
            .await
    }

    /// `true` once an event's `ends` is far enough in the past that
    /// projecting it would only resurrect a dead warning (a replayed
    /// archived product, not a live one).
    fn is_stale(ends: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - ends > STALE_AFTER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nwws_store::InMemoryWarningStore;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingPublisher {
        envelopes: Mutex<Vec<Envelope>>,
    }

    impl EventPublisher for RecordingPublisher {
        async fn publish(&self, envelope: Envelope) -> Result<(), EngineError> {
            self.envelopes.lock().unwrap().push(envelope);
            Ok(())
        }
    }

    fn event_id() -> EventId {
        EventId::new("KRAH", "SV", "W", 1, 2026)
    }

    #[tokio::test]
    async fn first_projection_publishes_new() {
        let projector = WarningProjector::new(InMemoryWarningStore::new(), RecordingPublisher::default());
        let now = Utc::now();
        projector
            .project(
                &event_id(),
                VtecAction::New,
                vec!["WYC001".into()],
                None,
                None,
                HashMap::new(),
                "Severe Thunderstorm Warning".into(),
                false,
                false,
                now,
                now,
                now,
                false,
            )
            .await
            .unwrap();

        let envelopes = projector.publisher.envelopes.lock().unwrap();
        assert_eq!(envelopes.len(), 1);
        assert_eq!(envelopes[0].kind, EnvelopeKind::New);
    }

    #[tokio::test]
    async fn cancellation_supersedes_and_deletes() {
        let projector = WarningProjector::new(InMemoryWarningStore::new(), RecordingPublisher::default());
        let now = Utc::now();
        projector
            .project(
                &event_id(),
                VtecAction::New,
                vec!["WYC001".into()],
                None,
                None,
                HashMap::new(),
                "Severe Thunderstorm Warning".into(),
                false,
                false,
                now,
                now,
                now,
                false,
            )
            .await
            .unwrap();

        projector
            .project(
                &event_id(),
                VtecAction::Can,
                vec!["WYC001".into()],
                None,
                None,
                HashMap::new(),
                "Severe Thunderstorm Warning".into(),
                false,
                false,
                now,
                now,
                now,
                false,
            )
            .await
            .unwrap();

        let envelopes = projector.publisher.envelopes.lock().unwrap();
        // NEW, then superseding DELETE of the NEW row, then the CAN's own DELETE.
        assert_eq!(envelopes.len(), 3);
        assert_eq!(envelopes[1].kind, EnvelopeKind::Delete);
        assert_eq!(envelopes[2].kind, EnvelopeKind::Delete);
    }

    #[tokio::test]
    async fn skip_supersede_avoids_double_delete() {
        let projector = WarningProjector::new(InMemoryWarningStore::new(), RecordingPublisher::default());
        let now = Utc::now();
        projector
            .project(
                &event_id(),
                VtecAction::New,
                vec!["WYC001".into()],
                None,
                None,
                HashMap::new(),
                "Severe Thunderstorm Warning".into(),
                false,
                false,
                now,
                now,
                now,
                false,
            )
            .await
            .unwrap();

        projector
            .project(
                &event_id(),
                VtecAction::Con,
                vec!["WYC001".into(), "WYC002".into()],
                None,
                None,
                HashMap::new(),
                "Severe Thunderstorm Warning".into(),
                false,
                false,
                now,
                now,
                now,
                true,
            )
            .await
            .unwrap();

        let envelopes = projector.publisher.envelopes.lock().unwrap();
        assert_eq!(envelopes.len(), 2);
        assert_eq!(envelopes[0].kind, EnvelopeKind::New);
        assert_eq!(envelopes[1].kind, EnvelopeKind::New);
    }

    #[tokio::test]
    async fn stale_descriptor_is_not_projected() {
        let projector = WarningProjector::new(InMemoryWarningStore::new(), RecordingPublisher::default());
        let now = Utc::now();
        let ends = now - chrono::Duration::hours(25);
        projector
            .project(
                &event_id(),
                VtecAction::New,
                vec!["WYC001".into()],
                None,
                None,
                HashMap::new(),
                "Severe Thunderstorm Warning".into(),
                false,
                false,
                ends,
                ends,
                now,
                false,
            )
            .await
            .unwrap();

        assert!(projector.publisher.envelopes.lock().unwrap().is_empty());
    }
}
