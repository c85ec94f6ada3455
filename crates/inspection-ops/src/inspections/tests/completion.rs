use super::common::*;
use crate::error::DomainError;
use crate::inspections::domain::{
    CompletionInput, InspectionStatus, InspectionType, RecordId, TaskDraft, TaskId,
};
use crate::properties::domain::BillingPolicy;
use crate::store::Storage;

#[test]
fn completion_writes_the_record_closes_the_task_and_updates_memory() {
    let harness = harness();
    let property = seed_property(&harness, BillingPolicy::ThreeMonthToggle);
    let task = harness
        .inspections
        .create(routine_draft(&property))
        .expect("draft is valid");

    let record = harness
        .inspections
        .complete(
            task.id,
            CompletionInput {
                execution_date: date(2024, 1, 1),
                notes: Some("keys returned".to_string()),
            },
        )
        .expect("completion succeeds");

    assert_eq!(record.property_id, property.id);
    assert_eq!(record.execution_date, date(2024, 1, 1));
    assert_eq!(record.inspection_type, InspectionType::Routine);
    assert!(record.is_charged);
    assert_eq!(record.notes, "keys returned");
    assert_eq!(record.task_id, Some(task.id));

    let closed = harness.inspections.get(task.id).expect("task still readable");
    assert_eq!(closed.status, InspectionStatus::Completed);
    assert_eq!(
        closed.completed_at.map(|at| at.date_naive()),
        Some(today())
    );

    let remembered = harness.properties.get(property.id).expect("property reads");
    assert_eq!(remembered.last_inspection_date, Some(date(2024, 1, 1)));
    assert_eq!(
        remembered.last_inspection_type,
        Some(InspectionType::Routine)
    );
    assert!(remembered.last_inspection_was_charged);
}

#[test]
fn completing_twice_conflicts_and_leaves_one_record() {
    let harness = harness();
    let property = seed_property(&harness, BillingPolicy::ThreeMonthToggle);
    let task = harness
        .inspections
        .create(routine_draft(&property))
        .expect("draft is valid");

    let input = CompletionInput {
        execution_date: date(2024, 1, 1),
        notes: None,
    };
    harness
        .inspections
        .complete(task.id, input.clone())
        .expect("first completion succeeds");

    let second = harness.inspections.complete(task.id, input);
    assert!(matches!(second, Err(DomainError::Conflict(_))));
    assert_eq!(harness.store.snapshot().records().count(), 1);
}

#[test]
fn completing_an_unknown_task_is_not_found() {
    let harness = harness();
    let result = harness.inspections.complete(
        TaskId(404),
        CompletionInput {
            execution_date: date(2024, 1, 1),
            notes: None,
        },
    );
    assert!(matches!(result, Err(DomainError::NotFound(_))));
}

#[test]
fn completion_respects_the_manual_override() {
    let harness = harness();
    let property = seed_property(&harness, BillingPolicy::ThreeMonthToggle);
    let task = harness
        .inspections
        .create(TaskDraft {
            is_billable_override: Some(false),
            ..routine_draft(&property)
        })
        .expect("draft is valid");

    let record = harness
        .inspections
        .complete(
            task.id,
            CompletionInput {
                execution_date: date(2024, 1, 1),
                notes: None,
            },
        )
        .expect("completion succeeds");

    assert!(!record.is_charged);
    let remembered = harness.properties.get(property.id).expect("property reads");
    assert!(!remembered.last_inspection_was_charged);
}

#[test]
fn oversized_completion_notes_are_rejected_before_any_write() {
    let harness = harness();
    let property = seed_property(&harness, BillingPolicy::ThreeMonthToggle);
    let task = harness
        .inspections
        .create(routine_draft(&property))
        .expect("draft is valid");

    let result = harness.inspections.complete(
        task.id,
        CompletionInput {
            execution_date: date(2024, 1, 1),
            notes: Some("x".repeat(501)),
        },
    );
    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert_eq!(harness.store.snapshot().records().count(), 0);
}

/// Abort a transaction between the record insert and the property update
/// and check that nothing of the unit survives.
#[test]
fn an_aborted_transaction_leaves_no_partial_writes() {
    let harness = harness();
    let property = seed_property(&harness, BillingPolicy::ThreeMonthToggle);
    let task = harness
        .inspections
        .create(routine_draft(&property))
        .expect("draft is valid");

    let before = harness.store.snapshot();
    let result: Result<(), DomainError> = harness.store.with_tx(|tables| {
        let pending = tables.task(task.id)?.clone();
        tables.insert_record(crate::inspections::domain::InspectionRecord {
            id: RecordId(0),
            property_id: pending.property_id,
            execution_date: date(2024, 1, 1),
            inspection_type: pending.inspection_type,
            is_charged: pending.effective_billable(),
            notes: String::new(),
            task_id: Some(pending.id),
        })?;
        Err(DomainError::Storage("injected abort".to_string()))
    });
    assert!(result.is_err());

    let after = harness.store.snapshot();
    assert_eq!(after.records().count(), 0, "record insert rolled back");
    let memory = after.property(property.id).expect("property present");
    assert_eq!(
        memory.last_inspection_date,
        before.property(property.id).unwrap().last_inspection_date,
        "property memory untouched"
    );
    let untouched = after.task(task.id).expect("task present");
    assert_eq!(untouched.status, InspectionStatus::Pending);
}
