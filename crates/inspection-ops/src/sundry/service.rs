use std::sync::Arc;

use crate::clock::Clock;
use crate::error::DomainError;
use crate::store::Storage;

use super::domain::{SundryDraft, SundryId, SundryTask, SundryUpdate, MAX_COST_CENTS};

const DESCRIPTION_MAX: usize = 200;
const NOTES_MAX: usize = 500;

pub struct SundryService<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> SundryService<S, C>
where
    S: Storage,
    C: Clock,
{
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    pub fn create(&self, draft: SundryDraft) -> Result<SundryTask, DomainError> {
        validate(&draft.description, draft.cost_cents, draft.notes.as_deref())?;
        let now = self.clock.now();
        let task = self.store.with_tx(|tables| {
            Ok::<_, DomainError>(tables.insert_sundry(SundryTask {
                id: SundryId(0),
                description: draft.description.trim().to_string(),
                cost_cents: draft.cost_cents,
                notes: draft.notes,
                created_at: now,
                execution_date: draft.execution_date,
                row_version: 0,
            }))
        })?;
        tracing::info!(id = %task.id, description = %task.description, "sundry task recorded");
        Ok(task)
    }

    pub fn get(&self, id: SundryId) -> Result<SundryTask, DomainError> {
        self.store
            .read(|tables| Ok::<_, DomainError>(tables.sundry_task(id)?.clone()))
    }

    pub fn list(&self) -> Result<Vec<SundryTask>, DomainError> {
        self.store.read(|tables| {
            let mut rows: Vec<SundryTask> = tables.sundry().cloned().collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            Ok::<_, DomainError>(rows)
        })
    }

    pub fn update(&self, id: SundryId, update: SundryUpdate) -> Result<SundryTask, DomainError> {
        validate(&update.description, update.cost_cents, update.notes.as_deref())?;
        let task = self.store.with_tx(|tables| {
            let updated = tables.update_sundry(id, update.row_version, |task| {
                task.description = update.description.trim().to_string();
                task.cost_cents = update.cost_cents;
                task.notes = update.notes.clone();
                task.execution_date = update.execution_date;
            })?;
            Ok::<_, DomainError>(updated)
        })?;
        tracing::info!(id = %task.id, "sundry task updated");
        Ok(task)
    }

    pub fn delete(&self, id: SundryId) -> Result<(), DomainError> {
        self.store.with_tx(|tables| {
            tables.delete_sundry(id)?;
            Ok::<_, DomainError>(())
        })?;
        tracing::info!(id = %id, "sundry task deleted");
        Ok(())
    }
}

fn validate(description: &str, cost_cents: i64, notes: Option<&str>) -> Result<(), DomainError> {
    let length = description.trim().chars().count();
    if length == 0 || length > DESCRIPTION_MAX {
        return Err(DomainError::Validation(format!(
            "description must be between 1 and {DESCRIPTION_MAX} characters"
        )));
    }
    if !(0..=MAX_COST_CENTS).contains(&cost_cents) {
        return Err(DomainError::Validation(format!(
            "cost must be between 0 and {MAX_COST_CENTS} cents"
        )));
    }
    if let Some(notes) = notes {
        if notes.chars().count() > NOTES_MAX {
            return Err(DomainError::Validation(format!(
                "notes must not exceed {NOTES_MAX} characters"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn service() -> SundryService<MemoryStore, FixedClock> {
        let clock = FixedClock::on_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        SundryService::new(Arc::new(MemoryStore::new()), Arc::new(clock))
    }

    fn draft(description: &str, cost_cents: i64) -> SundryDraft {
        SundryDraft {
            description: description.to_string(),
            cost_cents,
            notes: None,
            execution_date: None,
        }
    }

    #[test]
    fn create_stamps_creation_time_from_the_clock() {
        let service = service();
        let task = service
            .create(draft("Replace porch bulb", 450))
            .expect("valid draft");
        assert_eq!(
            task.created_at.date_naive(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
        assert_eq!(task.row_version, 1);
    }

    #[test]
    fn cost_and_description_bounds_are_enforced() {
        let service = service();
        assert!(matches!(
            service.create(draft("", 100)),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            service.create(draft("Gutter clean", -1)),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            service.create(draft("Gutter clean", MAX_COST_CENTS + 1)),
            Err(DomainError::Validation(_))
        ));
        assert!(service.create(draft("Gutter clean", MAX_COST_CENTS)).is_ok());
    }

    #[test]
    fn update_respects_the_row_version() {
        let service = service();
        let task = service.create(draft("Key cutting", 899)).unwrap();

        let stale = service.update(
            task.id,
            SundryUpdate {
                description: "Key cutting".to_string(),
                cost_cents: 999,
                notes: None,
                execution_date: None,
                row_version: Some(41),
            },
        );
        assert!(matches!(stale, Err(DomainError::Conflict(_))));

        let updated = service
            .update(
                task.id,
                SundryUpdate {
                    description: "Key cutting".to_string(),
                    cost_cents: 999,
                    notes: None,
                    execution_date: Some(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()),
                    row_version: Some(task.row_version),
                },
            )
            .expect("matching version");
        assert_eq!(updated.cost_cents, 999);
        assert_eq!(updated.row_version, 2);
    }

    #[test]
    fn delete_missing_entry_is_not_found() {
        let service = service();
        assert!(matches!(
            service.delete(SundryId(12)),
            Err(DomainError::NotFound(_))
        ));
    }
}
