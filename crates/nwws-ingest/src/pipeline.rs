//! Per-envelope pipeline: assemble a product, log non-fatal parse
//! issues, hand it to the engine. Grounded on `SPEC_FULL.md` section 7
//! propagation policy: parse issues never abort the batch; an engine
//! error on commit does.

use chrono::Utc;

use nwws_engine::{EventPublisher, VtecEngine};
use nwws_store::{EventStore, WarningStore, ZoneLookup};

use crate::envelope::IngressEnvelope;
use crate::error::IngestError;

pub async fn process_envelope<ES, WS, P>(
    engine: &VtecEngine<ES, WS, P>,
    zones: &ZoneLookup,
    envelope: &IngressEnvelope,
) -> Result<(), IngestError>
where
    ES: EventStore,
    WS: WarningStore,
    P: EventPublisher,
{
    let (product, report) = nwws_parser::assemble(&envelope.text, envelope.awips_id())?;

    for issue in &report.issues {
        tracing::warn!(
            segment = ?issue.segment_index,
            error = %issue.error,
            "non-fatal parse issue"
        );
    }

    engine.process_product(&product, zones, Utc::now()).await?;
    Ok(())
}
