use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::clock::FixedClock;
use crate::inspections::domain::TaskDraft;
use crate::inspections::service::InspectionService;
use crate::properties::domain::{BillingPolicy, Property, PropertyDraft};
use crate::properties::service::PropertyService;
use crate::store::{MemoryStore, Storage, StoreError, Tables};

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub(super) fn today() -> NaiveDate {
    date(2024, 1, 1)
}

pub(super) struct Harness {
    pub(super) store: Arc<MemoryStore>,
    pub(super) properties: PropertyService<MemoryStore>,
    pub(super) inspections: Arc<InspectionService<MemoryStore, FixedClock>>,
}

pub(super) fn harness_on(today: NaiveDate) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(FixedClock::on_date(today));
    Harness {
        store: store.clone(),
        properties: PropertyService::new(store.clone()),
        inspections: Arc::new(InspectionService::new(store, clock)),
    }
}

pub(super) fn harness() -> Harness {
    harness_on(today())
}

pub(super) fn seed_property(harness: &Harness, policy: BillingPolicy) -> Property {
    harness
        .properties
        .create(PropertyDraft {
            address: "17 Harbour Road, Kingsbridge".to_string(),
            billing_policy: policy,
        })
        .expect("property seeds")
}

pub(super) fn routine_draft(property: &Property) -> TaskDraft {
    TaskDraft {
        property_id: property.id,
        scheduled_at: None,
        inspection_type: crate::inspections::domain::InspectionType::Routine,
        contact_phone: None,
        contact_email: None,
        notes: None,
        is_billable_override: None,
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// Storage double standing in for an unreachable backing store.
#[derive(Debug, Default, Clone)]
pub(super) struct UnavailableStorage;

impl Storage for UnavailableStorage {
    fn read<T, E>(&self, _f: impl FnOnce(&Tables) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        Err(E::from(StoreError::Unavailable(
            "backing store offline".to_string(),
        )))
    }

    fn with_tx<T, E>(&self, _f: impl FnOnce(&mut Tables) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        Err(E::from(StoreError::Unavailable(
            "backing store offline".to_string(),
        )))
    }
}
