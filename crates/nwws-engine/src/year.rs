//! Calendar-year resolution for a VTEC event identity.

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};

use nwws_model::VtecDescriptor;
use nwws_store::EventStore;

use crate::error::EngineError;

/// Ordinarily the event's year is just the issuance year. The one
/// exception: a product issued in the first six hours of January 1st
/// UTC, carrying a VTEC line with no start timestamp, whose event
/// number already exists under `year - 1` and ended within the last 24
/// hours, continues that prior-year event instead of minting a new one
/// for the new year. Every other case — including a missing prior-year
/// event, or one that ended more than a day ago — resolves to the
/// issuance year.
pub async fn resolve_year<ES: EventStore>(
    descriptor: &VtecDescriptor,
    product_issued: DateTime<Utc>,
    store: &ES,
) -> Result<i32, EngineError> {
    let issued_year = product_issued.year();
    let in_new_year_window =
        product_issued.month() == 1 && product_issued.day() == 1 && product_issued.hour() < 6;

    if descriptor.start.is_none() && in_new_year_window {
        let candidate = descriptor.event_id(issued_year - 1);
        if let Some(prior) = store.find_event(&candidate).await? {
            if product_issued - prior.ends <= Duration::hours(24) {
                return Ok(issued_year - 1);
            }
        }
    }

    Ok(issued_year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use nwws_model::{VtecAction, VtecClass, VtecEvent};
    use nwws_store::InMemoryEventStore;

    fn descriptor(start: Option<DateTime<Utc>>) -> VtecDescriptor {
        VtecDescriptor {
            class: VtecClass::Operational,
            action: VtecAction::Con,
            office: "KRAH".into(),
            phenomena: "SV".into(),
            significance: "W".into(),
            event_number: 42,
            start,
            end: None,
        }
    }

    #[tokio::test]
    async fn ordinary_product_resolves_to_issuance_year() {
        let store = InMemoryEventStore::new();
        let issued = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let year = resolve_year(&descriptor(Some(issued)), issued, &store).await.unwrap();
        assert_eq!(year, 2025);
    }

    #[tokio::test]
    async fn continues_prior_year_event_across_midnight() {
        let store = InMemoryEventStore::new();
        let issued = Utc.with_ymd_and_hms(2026, 1, 1, 2, 0, 0).unwrap();
        let prior_ends = Utc.with_ymd_and_hms(2025, 12, 31, 23, 30, 0).unwrap();
        store
            .create_event(VtecEvent {
                id: descriptor(None).event_id(2025),
                class: VtecClass::Operational,
                issued: prior_ends,
                start: None,
                expires: prior_ends,
                ends: prior_ends,
                ends_initial: prior_ends,
                title: "Severe Thunderstorm Warning".into(),
                is_emergency: false,
                is_pds: false,
                updated_at: prior_ends,
            })
            .await
            .unwrap();

        let year = resolve_year(&descriptor(None), issued, &store).await.unwrap();
        assert_eq!(year, 2025);
    }

    #[tokio::test]
    async fn stale_prior_year_event_does_not_continue() {
        let store = InMemoryEventStore::new();
        let issued = Utc.with_ymd_and_hms(2026, 1, 1, 2, 0, 0).unwrap();
        let prior_ends = Utc.with_ymd_and_hms(2025, 12, 29, 0, 0, 0).unwrap();
        store
            .create_event(VtecEvent {
                id: descriptor(None).event_id(2025),
                class: VtecClass::Operational,
                issued: prior_ends,
                start: None,
                expires: prior_ends,
                ends: prior_ends,
                ends_initial: prior_ends,
                title: "Severe Thunderstorm Warning".into(),
                is_emergency: false,
                is_pds: false,
                updated_at: prior_ends,
            })
            .await
            .unwrap();

        let year = resolve_year(&descriptor(None), issued, &store).await.unwrap();
        assert_eq!(year, 2026);
    }
}
