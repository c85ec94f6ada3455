use std::sync::Arc;

use crate::error::DomainError;
use crate::store::Storage;

use super::domain::{Property, PropertyDraft, PropertyId, PropertyUpdate};

const ADDRESS_MIN: usize = 5;
const ADDRESS_MAX: usize = 200;

pub struct PropertyService<S> {
    store: Arc<S>,
}

impl<S: Storage> PropertyService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn create(&self, draft: PropertyDraft) -> Result<Property, DomainError> {
        validate_address(&draft.address)?;
        let property = self.store.with_tx(|tables| {
            Ok::<_, DomainError>(tables.insert_property(Property {
                id: PropertyId(0),
                address: draft.address.trim().to_string(),
                billing_policy: draft.billing_policy,
                last_inspection_date: None,
                last_inspection_type: None,
                last_inspection_was_charged: false,
                row_version: 0,
            }))
        })?;
        tracing::info!(id = %property.id, address = %property.address, "property created");
        Ok(property)
    }

    pub fn get(&self, id: PropertyId) -> Result<Property, DomainError> {
        self.store
            .read(|tables| Ok::<_, DomainError>(tables.property(id)?.clone()))
    }

    /// Newest first, matching the management UI's table.
    pub fn list(&self) -> Result<Vec<Property>, DomainError> {
        self.store.read(|tables| {
            let mut rows: Vec<Property> = tables.properties().cloned().collect();
            rows.sort_by(|a, b| b.id.cmp(&a.id));
            Ok::<_, DomainError>(rows)
        })
    }

    pub fn update(&self, id: PropertyId, update: PropertyUpdate) -> Result<Property, DomainError> {
        validate_address(&update.address)?;
        let property = self.store.with_tx(|tables| {
            let updated = tables.update_property(id, update.row_version, |property| {
                property.address = update.address.trim().to_string();
                property.billing_policy = update.billing_policy;
            })?;
            Ok::<_, DomainError>(updated)
        })?;
        tracing::info!(id = %property.id, "property updated");
        Ok(property)
    }

    pub fn delete(&self, id: PropertyId) -> Result<(), DomainError> {
        self.store.with_tx(|tables| {
            tables.delete_property(id)?;
            Ok::<_, DomainError>(())
        })?;
        tracing::info!(id = %id, "property deleted");
        Ok(())
    }
}

fn validate_address(address: &str) -> Result<(), DomainError> {
    let length = address.trim().chars().count();
    if !(ADDRESS_MIN..=ADDRESS_MAX).contains(&length) {
        return Err(DomainError::Validation(format!(
            "address must be between {ADDRESS_MIN} and {ADDRESS_MAX} characters"
        )));
    }
    Ok(())
}
