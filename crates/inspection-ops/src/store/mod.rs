//! In-process relational engine backing every service.
//!
//! [`Tables`] holds the four entity tables and enforces the store-level
//! contract: sequential integer ids, restrict-on-delete from properties to
//! tasks and records, broken-reference detection, and per-row optimistic
//! concurrency versions. [`Storage`] is the seam the services run against;
//! [`MemoryStore`] implements it with a single lock and snapshot-commit
//! transactions, so every error inside `with_tx` rolls the whole unit back.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::inspections::domain::{InspectionRecord, InspectionTask, RecordId, TaskId};
use crate::properties::domain::{Property, PropertyId};
use crate::sundry::domain::{SundryId, SundryTask};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} with id {id} was not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("{entity} with id {id} was modified by another caller; re-fetch and retry")]
    VersionMismatch { entity: &'static str, id: i64 },
    #[error("property {id} does not exist")]
    MissingProperty { id: i64 },
    #[error("property {id} still has inspection tasks or records attached")]
    PropertyInUse { id: i64 },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

fn check_version(
    entity: &'static str,
    id: i64,
    expected: Option<u64>,
    actual: u64,
) -> Result<(), StoreError> {
    match expected {
        Some(version) if version != actual => Err(StoreError::VersionMismatch { entity, id }),
        _ => Ok(()),
    }
}

/// The relational table set. Insert methods allocate the id and reset the
/// row version; whatever the caller put in those fields is discarded.
#[derive(Debug, Default, Clone)]
pub struct Tables {
    next_property_id: i64,
    next_task_id: i64,
    next_record_id: i64,
    next_sundry_id: i64,
    properties: BTreeMap<i64, Property>,
    tasks: BTreeMap<i64, InspectionTask>,
    records: BTreeMap<i64, InspectionRecord>,
    sundry: BTreeMap<i64, SundryTask>,
}

impl Tables {
    fn next_id(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }

    pub fn insert_property(&mut self, mut property: Property) -> Property {
        let id = Self::next_id(&mut self.next_property_id);
        property.id = PropertyId(id);
        property.row_version = 1;
        self.properties.insert(id, property.clone());
        property
    }

    pub fn property(&self, id: PropertyId) -> Result<&Property, StoreError> {
        self.properties.get(&id.0).ok_or(StoreError::NotFound {
            entity: "property",
            id: id.0,
        })
    }

    /// Foreign-key lookup: absence is a broken reference, not a missing
    /// resource.
    pub fn referenced_property(&self, id: PropertyId) -> Result<&Property, StoreError> {
        self.properties
            .get(&id.0)
            .ok_or(StoreError::MissingProperty { id: id.0 })
    }

    pub fn property_address(&self, id: PropertyId) -> Option<String> {
        self.properties.get(&id.0).map(|p| p.address.clone())
    }

    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    pub fn update_property(
        &mut self,
        id: PropertyId,
        expected_version: Option<u64>,
        apply: impl FnOnce(&mut Property),
    ) -> Result<Property, StoreError> {
        let row = self.properties.get_mut(&id.0).ok_or(StoreError::NotFound {
            entity: "property",
            id: id.0,
        })?;
        check_version("property", id.0, expected_version, row.row_version)?;
        apply(row);
        row.row_version += 1;
        Ok(row.clone())
    }

    pub fn delete_property(&mut self, id: PropertyId) -> Result<(), StoreError> {
        if !self.properties.contains_key(&id.0) {
            return Err(StoreError::NotFound {
                entity: "property",
                id: id.0,
            });
        }
        let referenced = self.tasks.values().any(|t| t.property_id == id)
            || self.records.values().any(|r| r.property_id == id);
        if referenced {
            return Err(StoreError::PropertyInUse { id: id.0 });
        }
        self.properties.remove(&id.0);
        Ok(())
    }

    pub fn insert_task(&mut self, mut task: InspectionTask) -> Result<InspectionTask, StoreError> {
        self.referenced_property(task.property_id)?;
        let id = Self::next_id(&mut self.next_task_id);
        task.id = TaskId(id);
        task.row_version = 1;
        self.tasks.insert(id, task.clone());
        Ok(task)
    }

    pub fn task(&self, id: TaskId) -> Result<&InspectionTask, StoreError> {
        self.tasks.get(&id.0).ok_or(StoreError::NotFound {
            entity: "inspection task",
            id: id.0,
        })
    }

    pub fn tasks(&self) -> impl Iterator<Item = &InspectionTask> {
        self.tasks.values()
    }

    /// Apply an edit, re-checking the property reference afterwards since
    /// the edit may repoint it.
    pub fn update_task(
        &mut self,
        id: TaskId,
        expected_version: Option<u64>,
        apply: impl FnOnce(&mut InspectionTask),
    ) -> Result<InspectionTask, StoreError> {
        let mut row = self.tasks.get(&id.0).cloned().ok_or(StoreError::NotFound {
            entity: "inspection task",
            id: id.0,
        })?;
        check_version("inspection task", id.0, expected_version, row.row_version)?;
        apply(&mut row);
        self.referenced_property(row.property_id)?;
        row.row_version += 1;
        self.tasks.insert(id.0, row.clone());
        Ok(row)
    }

    pub fn delete_task(&mut self, id: TaskId) -> Result<(), StoreError> {
        self.tasks.remove(&id.0).map(|_| ()).ok_or(StoreError::NotFound {
            entity: "inspection task",
            id: id.0,
        })
    }

    pub fn insert_record(
        &mut self,
        mut record: InspectionRecord,
    ) -> Result<InspectionRecord, StoreError> {
        self.referenced_property(record.property_id)?;
        let id = Self::next_id(&mut self.next_record_id);
        record.id = RecordId(id);
        self.records.insert(id, record.clone());
        Ok(record)
    }

    pub fn records(&self) -> impl Iterator<Item = &InspectionRecord> {
        self.records.values()
    }

    pub fn insert_sundry(&mut self, mut task: SundryTask) -> SundryTask {
        let id = Self::next_id(&mut self.next_sundry_id);
        task.id = SundryId(id);
        task.row_version = 1;
        self.sundry.insert(id, task.clone());
        task
    }

    pub fn sundry_task(&self, id: SundryId) -> Result<&SundryTask, StoreError> {
        self.sundry.get(&id.0).ok_or(StoreError::NotFound {
            entity: "sundry task",
            id: id.0,
        })
    }

    pub fn sundry(&self) -> impl Iterator<Item = &SundryTask> {
        self.sundry.values()
    }

    pub fn update_sundry(
        &mut self,
        id: SundryId,
        expected_version: Option<u64>,
        apply: impl FnOnce(&mut SundryTask),
    ) -> Result<SundryTask, StoreError> {
        let row = self.sundry.get_mut(&id.0).ok_or(StoreError::NotFound {
            entity: "sundry task",
            id: id.0,
        })?;
        check_version("sundry task", id.0, expected_version, row.row_version)?;
        apply(row);
        row.row_version += 1;
        Ok(row.clone())
    }

    pub fn delete_sundry(&mut self, id: SundryId) -> Result<(), StoreError> {
        self.sundry.remove(&id.0).map(|_| ()).ok_or(StoreError::NotFound {
            entity: "sundry task",
            id: id.0,
        })
    }
}

/// Storage seam so the services can be exercised against doubles.
///
/// `with_tx` runs `f` as one transaction: every mutation it makes commits
/// together, or none do when it returns an error.
pub trait Storage: Send + Sync {
    fn read<T, E>(&self, f: impl FnOnce(&Tables) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>;

    fn with_tx<T, E>(&self, f: impl FnOnce(&mut Tables) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>;
}

/// Single-lock in-memory store. Transactions mutate a working copy of the
/// tables and swap it in only on success, which is what makes a mid-flight
/// error roll back every pending write.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct copy of the tables, for assertions in tests and demos.
    pub fn snapshot(&self) -> Tables {
        self.tables.lock().expect("store mutex poisoned").clone()
    }
}

impl Storage for MemoryStore {
    fn read<T, E>(&self, f: impl FnOnce(&Tables) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let guard = self.tables.lock().expect("store mutex poisoned");
        f(&guard)
    }

    fn with_tx<T, E>(&self, f: impl FnOnce(&mut Tables) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut guard = self.tables.lock().expect("store mutex poisoned");
        let mut draft = guard.clone();
        let out = f(&mut draft)?;
        *guard = draft;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspections::domain::{InspectionStatus, InspectionType};
    use crate::properties::domain::BillingPolicy;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn property() -> Property {
        Property {
            id: PropertyId(0),
            address: "12 Quay Street, Salcombe".to_string(),
            billing_policy: BillingPolicy::ThreeMonthToggle,
            last_inspection_date: None,
            last_inspection_type: None,
            last_inspection_was_charged: false,
            row_version: 0,
        }
    }

    fn task(property_id: PropertyId) -> InspectionTask {
        InspectionTask {
            id: TaskId(0),
            property_id,
            scheduled_at: None,
            inspection_type: InspectionType::Routine,
            status: InspectionStatus::Pending,
            is_billable: true,
            is_billable_override: None,
            contact_phone: None,
            contact_email: None,
            notes: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            completed_at: None,
            row_version: 0,
        }
    }

    fn record(property_id: PropertyId) -> InspectionRecord {
        InspectionRecord {
            id: RecordId(0),
            property_id,
            execution_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            inspection_type: InspectionType::Routine,
            is_charged: true,
            notes: String::new(),
            task_id: None,
        }
    }

    #[test]
    fn ids_allocate_sequentially_per_table() {
        let mut tables = Tables::default();
        let first = tables.insert_property(property());
        let second = tables.insert_property(property());
        assert_eq!(first.id, PropertyId(1));
        assert_eq!(second.id, PropertyId(2));

        let task = tables.insert_task(task(first.id)).expect("fk satisfied");
        assert_eq!(task.id, TaskId(1));
        assert_eq!(task.row_version, 1);
    }

    #[test]
    fn inserting_a_task_for_a_missing_property_is_a_broken_reference() {
        let mut tables = Tables::default();
        let result = tables.insert_task(task(PropertyId(99)));
        assert_eq!(result, Err(StoreError::MissingProperty { id: 99 }));
    }

    #[test]
    fn delete_property_is_restricted_while_referenced() {
        let mut tables = Tables::default();
        let owner = tables.insert_property(property());
        tables.insert_task(task(owner.id)).expect("fk satisfied");

        let blocked = tables.delete_property(owner.id);
        assert_eq!(blocked, Err(StoreError::PropertyInUse { id: owner.id.0 }));

        tables.delete_task(TaskId(1)).expect("task removed");
        tables.insert_record(record(owner.id)).expect("fk satisfied");
        let still_blocked = tables.delete_property(owner.id);
        assert_eq!(
            still_blocked,
            Err(StoreError::PropertyInUse { id: owner.id.0 })
        );
    }

    #[test]
    fn stale_version_is_a_distinct_failure_from_not_found() {
        let mut tables = Tables::default();
        let owner = tables.insert_property(property());

        let stale = tables.update_property(owner.id, Some(5), |_| {});
        assert_eq!(
            stale,
            Err(StoreError::VersionMismatch {
                entity: "property",
                id: owner.id.0
            })
        );

        let missing = tables.update_property(PropertyId(42), Some(1), |_| {});
        assert_eq!(
            missing,
            Err(StoreError::NotFound {
                entity: "property",
                id: 42
            })
        );
    }

    #[test]
    fn versions_bump_on_update_and_skip_check_when_omitted() {
        let mut tables = Tables::default();
        let owner = tables.insert_property(property());
        assert_eq!(owner.row_version, 1);

        let updated = tables
            .update_property(owner.id, Some(1), |p| p.address = "1 New Road, Kingswear".into())
            .expect("matching version");
        assert_eq!(updated.row_version, 2);

        let unchecked = tables
            .update_property(owner.id, None, |p| p.last_inspection_was_charged = true)
            .expect("unchecked update");
        assert_eq!(unchecked.row_version, 3);
    }

    #[test]
    fn with_tx_rolls_back_every_write_on_error() {
        let store = MemoryStore::new();
        let result: Result<(), StoreError> = store.with_tx(|tables| {
            tables.insert_property(property());
            Err(StoreError::Unavailable("injected".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(store.snapshot().properties().count(), 0);
    }

    #[test]
    fn with_tx_commits_on_success() {
        let store = MemoryStore::new();
        let created: Result<Property, StoreError> =
            store.with_tx(|tables| Ok(tables.insert_property(property())));
        let created = created.expect("commit succeeds");
        assert_eq!(store.snapshot().property(created.id).unwrap().id, created.id);
    }
}
