use std::sync::Arc;

use chrono::NaiveDate;

use crate::clock::Clock;
use crate::error::DomainError;
use crate::store::Storage;

use super::billing::should_charge;
use super::domain::{
    CompletionInput, InspectionRecord, InspectionStatus, InspectionTask, RecordId, RecordView,
    TaskDraft, TaskId, TaskUpdate, TaskView,
};

const NOTES_MAX: usize = 500;
const PHONE_MAX: usize = 20;
const EMAIL_MAX: usize = 100;

/// Scheduler and completion workflow for inspection visits.
pub struct InspectionService<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> InspectionService<S, C>
where
    S: Storage,
    C: Clock,
{
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    pub fn create(&self, draft: TaskDraft) -> Result<TaskView, DomainError> {
        validate_contact_fields(
            draft.notes.as_deref(),
            draft.contact_phone.as_deref(),
            draft.contact_email.as_deref(),
        )?;
        let today = self.clock.today();
        let now = self.clock.now();

        let view = self.store.with_tx(|tables| {
            let property = tables.referenced_property(draft.property_id)?.clone();
            let mut task = InspectionTask {
                id: TaskId(0),
                property_id: draft.property_id,
                scheduled_at: draft.scheduled_at,
                inspection_type: draft.inspection_type,
                status: InspectionStatus::Pending,
                is_billable: should_charge(&property, draft.inspection_type, today),
                is_billable_override: draft.is_billable_override,
                contact_phone: draft.contact_phone,
                contact_email: draft.contact_email,
                notes: draft.notes,
                created_at: now,
                completed_at: None,
                row_version: 0,
            };
            promote_if_scheduled(&mut task);
            let task = tables.insert_task(task)?;
            Ok::<_, DomainError>(TaskView::from_parts(&task, &property))
        })?;
        tracing::info!(id = %view.id, kind = ?view.inspection_type, "inspection task scheduled");
        Ok(view)
    }

    pub fn get(&self, id: TaskId) -> Result<TaskView, DomainError> {
        self.store.read(|tables| {
            let task = tables.task(id)?;
            let property = tables.referenced_property(task.property_id)?;
            Ok::<_, DomainError>(TaskView::from_parts(task, property))
        })
    }

    /// Most recently created first, with the agreed slot as tie-breaker.
    pub fn list(&self) -> Result<Vec<TaskView>, DomainError> {
        self.store.read(|tables| {
            let mut views = Vec::new();
            for task in tables.tasks() {
                let property = tables.referenced_property(task.property_id)?;
                views.push(TaskView::from_parts(task, property));
            }
            views.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then(b.scheduled_at.cmp(&a.scheduled_at))
            });
            Ok::<_, DomainError>(views)
        })
    }

    pub fn update(&self, id: TaskId, update: TaskUpdate) -> Result<TaskView, DomainError> {
        validate_contact_fields(
            update.notes.as_deref(),
            update.contact_phone.as_deref(),
            update.contact_email.as_deref(),
        )?;
        let today = self.clock.today();

        let view = self.store.with_tx(|tables| {
            let current = tables.task(id)?.clone();
            if current.status == InspectionStatus::Completed {
                return Err(DomainError::Conflict(format!(
                    "inspection task {id} is completed and can no longer be edited"
                )));
            }
            let property = tables.referenced_property(update.property_id)?.clone();
            let rebill = update.property_id != current.property_id
                || update.inspection_type != current.inspection_type;

            let task = tables.update_task(id, update.row_version, |task| {
                task.property_id = update.property_id;
                task.scheduled_at = update.scheduled_at;
                task.inspection_type = update.inspection_type;
                task.contact_phone = update.contact_phone.clone();
                task.contact_email = update.contact_email.clone();
                task.notes = update.notes.clone();
                task.is_billable_override = update.is_billable_override;
                if rebill {
                    task.is_billable = should_charge(&property, update.inspection_type, today);
                }
                promote_if_scheduled(task);
            })?;
            Ok::<_, DomainError>(TaskView::from_parts(&task, &property))
        })?;
        tracing::info!(id = %view.id, "inspection task updated");
        Ok(view)
    }

    pub fn delete(&self, id: TaskId) -> Result<(), DomainError> {
        self.store.with_tx(|tables| {
            tables.delete_task(id)?;
            Ok::<_, DomainError>(())
        })?;
        tracing::info!(id = %id, "inspection task deleted");
        Ok(())
    }

    /// Close a visit: one transaction inserts the history record, marks the
    /// task completed, and overwrites the property's last-inspection memory.
    pub fn complete(&self, id: TaskId, input: CompletionInput) -> Result<RecordView, DomainError> {
        if let Some(notes) = input.notes.as_deref() {
            validate_notes(notes)?;
        }
        let now = self.clock.now();

        let record = self.store.with_tx(|tables| {
            let task = tables.task(id)?.clone();
            if task.status == InspectionStatus::Completed {
                return Err(DomainError::Conflict(format!(
                    "inspection task {id} is already completed"
                )));
            }
            let charged = task.effective_billable();
            let record = tables.insert_record(InspectionRecord {
                id: RecordId(0),
                property_id: task.property_id,
                execution_date: input.execution_date,
                inspection_type: task.inspection_type,
                is_charged: charged,
                notes: input.notes.clone().unwrap_or_default(),
                task_id: Some(task.id),
            })?;
            tables.update_task(id, None, |task| {
                task.status = InspectionStatus::Completed;
                task.completed_at = Some(now);
            })?;
            let property = tables.update_property(task.property_id, None, |property| {
                property.last_inspection_date = Some(input.execution_date);
                property.last_inspection_type = Some(task.inspection_type);
                property.last_inspection_was_charged = charged;
            })?;
            Ok::<_, DomainError>(RecordView::from_parts(&record, Some(property.address)))
        })?;
        tracing::info!(
            task = %id,
            record = %record.id,
            charged = record.is_charged,
            "inspection task completed"
        );
        Ok(record)
    }

    /// History listing: newest execution first, optionally windowed.
    pub fn records(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<RecordView>, DomainError> {
        self.store.read(|tables| {
            let mut views: Vec<RecordView> = tables
                .records()
                .filter(|record| {
                    start_date.is_none_or(|start| record.execution_date >= start)
                        && end_date.is_none_or(|end| record.execution_date <= end)
                })
                .map(|record| {
                    RecordView::from_parts(record, tables.property_address(record.property_id))
                })
                .collect();
            views.sort_by(|a, b| {
                b.execution_date
                    .cmp(&a.execution_date)
                    .then(b.id.cmp(&a.id))
            });
            Ok::<_, DomainError>(views)
        })
    }
}

fn promote_if_scheduled(task: &mut InspectionTask) {
    if task.status == InspectionStatus::Pending && task.scheduled_at.is_some() {
        task.status = InspectionStatus::Ready;
    }
}

fn validate_notes(notes: &str) -> Result<(), DomainError> {
    if notes.chars().count() > NOTES_MAX {
        return Err(DomainError::Validation(format!(
            "notes must not exceed {NOTES_MAX} characters"
        )));
    }
    Ok(())
}

fn validate_contact_fields(
    notes: Option<&str>,
    phone: Option<&str>,
    email: Option<&str>,
) -> Result<(), DomainError> {
    if let Some(notes) = notes {
        validate_notes(notes)?;
    }
    if let Some(phone) = phone {
        if phone.chars().count() > PHONE_MAX {
            return Err(DomainError::Validation(format!(
                "contact phone must not exceed {PHONE_MAX} characters"
            )));
        }
    }
    if let Some(email) = email {
        if email.chars().count() > EMAIL_MAX || !email.contains('@') {
            return Err(DomainError::Validation(
                "contact email must contain '@' and stay under 100 characters".to_string(),
            ));
        }
    }
    Ok(())
}
