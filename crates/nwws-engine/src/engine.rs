//! The transactional VTEC engine: one descriptor at a time, turning a
//! parsed product into event/binding/update rows and a warning
//! projection.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use nwws_model::{
    EventId, Product, Segment, VtecAction, VtecDescriptor, VtecEvent, VtecUgcBinding, VtecUpdate,
};
use nwws_store::{EventStore, WarningStore, ZoneLookup};

use crate::error::EngineError;
use crate::flags;
use crate::projector::WarningProjector;
use crate::publisher::EventPublisher;
use crate::title;
use crate::year;

pub struct VtecEngine<ES, WS, P> {
    events: ES,
    projector: WarningProjector<WS, P>,
}

impl<ES: EventStore, WS: WarningStore, P: EventPublisher> VtecEngine<ES, WS, P> {
    pub fn new(events: ES, projector: WarningProjector<WS, P>) -> Self {
        Self { events, projector }
    }

    /// Processes every VTEC descriptor in every segment of `product`.
    /// A descriptor-scoped error (bad zone data, a duplicate binding) is
    /// logged and skipped; a store failure aborts the whole product so
    /// the caller can nack the delivery and retry.
    pub async fn process_product(&self, product: &Product, zones: &ZoneLookup, now: DateTime<Utc>) -> Result<(), EngineError> {
        let issued = product.issued.unwrap_or(now);
        let mut published_this_product: HashSet<EventId> = HashSet::new();

        for segment in &product.segments {
            for descriptor in &segment.vtec {
                if descriptor.is_skipped() {
                    continue;
                }
                if let Err(err) = self
                    .process_descriptor(product, segment, descriptor, issued, zones, now, &mut published_this_product)
                    .await
                {
                    match err {
                        EngineError::Store(_) => return Err(err),
                        other => tracing::warn!(error = %other, "skipping VTEC descriptor"),
                    }
                }
            }
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    async fn process_descriptor(
        &self,
        product: &Product,
        segment: &Segment,
        descriptor: &VtecDescriptor,
        issued: DateTime<Utc>,
        zones: &ZoneLookup,
        now: DateTime<Utc>,
        published_this_product: &mut HashSet<EventId>,
    ) -> Result<(), EngineError> {
        let year = year::resolve_year(descriptor, issued, &self.events).await?;
        let event_id = descriptor.event_id(year);

        let ugc_expires = segment.ugc.as_ref().map_or(issued, |b| b.expires);
        let end = descriptor.end.unwrap_or(ugc_expires);

        let is_fire = descriptor.phenomena == "FW";
        let zone_list = segment
            .ugc
            .as_ref()
            .map(|b| zones.expand_segment_ugc(b, is_fire))
            .unwrap_or_default();
        let zone_codes: Vec<String> = zone_list.iter().map(|z| z.code.clone()).collect();

        if let Some(block) = &segment.ugc {
            let has_real_entries = !block.entries.is_empty() && !block.entries.iter().any(|e| e.is_wildcard());
            if zone_codes.is_empty() && has_real_entries {
                return Err(EngineError::NoZonesResolved(event_id.to_string()));
            }
        }

        let is_emergency = flags::detect_emergency(&segment.raw, &segment.tags);
        let is_pds = flags::detect_pds(&segment.raw);
        let title = title::event_title(descriptor, is_emergency);

        let existing = self.events.find_event(&event_id).await?;
        let (new_expires, new_ends) = match &existing {
            Some(event) => compute_times(descriptor.action, event.expires, event.ends, ugc_expires, end, issued),
            None => (ugc_expires, end),
        };

        if existing.is_some() {
            self.events.update_event_times(&event_id, new_expires, new_ends).await?;
        } else {
            self.events
                .create_event(VtecEvent {
                    id: event_id.clone(),
                    class: descriptor.class,
                    issued,
                    start: descriptor.start,
                    expires: new_expires,
                    ends: new_ends,
                    ends_initial: new_ends,
                    title: title.clone(),
                    is_emergency,
                    is_pds,
                    updated_at: now,
                })
                .await?;
        }

        self.events
            .append_update(VtecUpdate {
                event: event_id.clone(),
                action: descriptor.action,
                product_text: segment.raw.clone(),
                polygon: segment.polygon.clone(),
                motion: segment.tml.clone(),
                tags: segment.tags.clone(),
                zones: zone_codes.clone(),
                created_at: now,
            })
            .await?;

        let skip_supersede = published_this_product.contains(&event_id);
        self.projector
            .project(
                &event_id,
                descriptor.action,
                zone_codes.clone(),
                segment.polygon.clone(),
                segment.tml.clone(),
                segment.tags.clone(),
                title,
                is_emergency,
                is_pds,
                new_expires,
                new_ends,
                now,
                skip_supersede,
            )
            .await?;
        published_this_product.insert(event_id.clone());

        self.update_bindings(product, &event_id, descriptor, &zone_codes, issued, new_expires, new_ends, now)
            .await?;

        self.events.update_event_flags(&event_id, is_emergency, is_pds, now).await?;

        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    async fn update_bindings(
        &self,
        product: &Product,
        event_id: &EventId,
        descriptor: &VtecDescriptor,
        zone_codes: &[String],
        issued: DateTime<Utc>,
        expires: DateTime<Utc>,
        ends: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), EngineError> {
        if !descriptor.action.opens_bindings() {
            if !zone_codes.is_empty() {
                self.events
                    .bulk_update_bindings(event_id, zone_codes, expires, ends, descriptor.action)
                    .await?;
            }
            return Ok(());
        }

        let current_bindings = self.events.find_current_bindings(event_id, now).await?;
        let current_by_zone: HashMap<&str, &VtecUgcBinding> =
            current_bindings.iter().map(|b| (b.zone.as_str(), b)).collect();

        for zone in zone_codes {
            if let Some(existing) = current_by_zone.get(zone.as_str()) {
                if product.is_correction() && existing.action == descriptor.action {
                    self.events.delete_binding(event_id, zone).await?;
                    self.insert_binding(event_id, zone, descriptor, issued, expires, ends).await?;
                } else {
                    tracing::warn!(zone = %zone, event = %event_id, "duplicate UGC binding, skipping");
                }
                continue;
            }
            self.insert_binding(event_id, zone, descriptor, issued, expires, ends).await?;
        }

        Ok(())
    }

    async fn insert_binding(
        &self,
        event_id: &EventId,
        zone: &str,
        descriptor: &VtecDescriptor,
        issued: DateTime<Utc>,
        expires: DateTime<Utc>,
        ends: DateTime<Utc>,
    ) -> Result<(), EngineError> {
        self.events
            .insert_binding(VtecUgcBinding {
                event: event_id.clone(),
                zone: zone.to_string(),
                issued,
                start: descriptor.start,
                expires,
                ends,
                ends_initial: ends,
                action: descriptor.action,
            })
            .await?;
        Ok(())
    }
}

/// Per-action event time update, section 4.8 step 5:
///
/// - `CAN`/`UPG`: collapse to the segment's own UGC expiry, end now.
/// - `EXP`: both fields collapse to the VTEC end time.
/// - `EXT`/`EXB`: end moves to the VTEC end time, expiry tracks the UGC.
/// - everything else (`NEW`/`CON`/...): monotonic extension, never
///   retracts a time the event already has.
fn compute_times(
    action: VtecAction,
    existing_expires: DateTime<Utc>,
    existing_ends: DateTime<Utc>,
    ugc_expires: DateTime<Utc>,
    end: DateTime<Utc>,
    issued: DateTime<Utc>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    match action {
        VtecAction::Can | VtecAction::Upg => (ugc_expires, issued),
        VtecAction::Exp => (end, end),
        VtecAction::Ext | VtecAction::Exb => (ugc_expires, end),
        _ => (existing_expires.max(ugc_expires), existing_ends.max(end)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration};
    use nwws_model::{Envelope, EnvelopeKind, UgcBlock, UgcEntry, UgcType, VtecClass, Zone};
    use nwws_store::{InMemoryEventStore, InMemoryWarningStore, ZoneLookup};
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

    fn zone_lookup() -> ZoneLookup {
        ZoneLookup::from_zones(vec![Zone {
            id: 1,
            code: "WYC001".into(),
            state: "WY".into(),
            kind: UgcType::County,
            number: "001".into(),
            area: None,
            geometry: None,
            cwa: vec!["RAH".into()],
            is_marine: false,
            is_fire: false,
            valid_from: Utc::now(),
            valid_to: None,
        }])
    }

    fn descriptor(action: VtecAction, end: Option<DateTime<Utc>>) -> VtecDescriptor {
        VtecDescriptor {
            class: VtecClass::Operational,
            action,
            office: "KRAH".into(),
            phenomena: "SV".into(),
            significance: "W".into(),
            event_number: 1,
            start: None,
            end,
        }
    }

    fn product_with(action: VtecAction, end: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Product {
        Product {
            raw: "SEVERE THUNDERSTORM WARNING".into(),
            wmo: None,
            awips: None,
            issued: Some(now),
            segments: vec![Segment {
                raw: "SEVERE THUNDERSTORM WARNING".into(),
                vtec: vec![descriptor(action, end)],
                ugc: Some(UgcBlock {
                    entries: vec![UgcEntry { state: "WY".into(), kind: UgcType::County, area: "001".into() }],
                    expires: now + Duration::hours(1),
                }),
                expires: Some(now + Duration::hours(1)),
                polygon: None,
                tml: None,
                tags: HashMap::new(),
            }],
        }
    }

    #[tokio::test]
    async fn new_then_cancel_opens_and_closes_a_binding() {
        let engine = VtecEngine::new(
            InMemoryEventStore::new(),
            WarningProjector::new(InMemoryWarningStore::new(), RecordingPublisher::default()),
        );
        let zones = zone_lookup();
        let now = Utc::now();

        let new_product = product_with(VtecAction::New, Some(now + Duration::hours(1)), now);
        engine.process_product(&new_product, &zones, now).await.unwrap();

        let event_id = descriptor(VtecAction::New, None).event_id(now.year());
        let bindings = engine.events.find_current_bindings(&event_id, now).await.unwrap();
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].zone, "WYC001");

        let cancel_product = product_with(VtecAction::Can, None, now + Duration::minutes(10));
        engine
            .process_product(&cancel_product, &zones, now + Duration::minutes(10))
            .await
            .unwrap();

        let event = engine.events.find_event(&event_id).await.unwrap().unwrap();
        assert!(!event.is_emergency);

        let envelopes = engine.projector.publisher.envelopes.lock().unwrap();
        // NEW, then the CAN's supersede-DELETE of that NEW row, then the
        // CAN's own DELETE.
        assert_eq!(envelopes.len(), 3);
        assert_eq!(envelopes[0].kind, EnvelopeKind::New);
        assert_eq!(envelopes[1].kind, EnvelopeKind::Delete);
        assert_eq!(envelopes[2].kind, EnvelopeKind::Delete);
    }

    #[tokio::test]
    async fn skipped_descriptors_are_not_processed() {
        let engine = VtecEngine::new(
            InMemoryEventStore::new(),
            WarningProjector::new(InMemoryWarningStore::new(), RecordingPublisher::default()),
        );
        let zones = zone_lookup();
        let now = Utc::now();

        let mut product = product_with(VtecAction::Rou, None, now);
        product.segments[0].vtec[0] = VtecDescriptor {
            class: VtecClass::Test,
            ..descriptor(VtecAction::New, None)
        };
        engine.process_product(&product, &zones, now).await.unwrap();

        let envelopes = engine.projector.publisher.envelopes.lock().unwrap();
        assert!(envelopes.is_empty());
    }
}
