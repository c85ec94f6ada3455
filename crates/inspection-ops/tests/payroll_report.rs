//! Payroll reporting driven end to end through the services: only charged
//! visits inside the window count, sundry entries join with their costs,
//! and the two-weeks view derives from the injected clock.

use std::sync::Arc;

use chrono::NaiveDate;
use inspection_ops::clock::FixedClock;
use inspection_ops::inspections::{CompletionInput, InspectionService, InspectionType, TaskDraft};
use inspection_ops::properties::{BillingPolicy, PropertyDraft, PropertyId, PropertyService};
use inspection_ops::reports::ReportService;
use inspection_ops::store::MemoryStore;
use inspection_ops::sundry::{SundryDraft, SundryService};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

struct World {
    properties: PropertyService<MemoryStore>,
    inspections: InspectionService<MemoryStore, FixedClock>,
    sundry: SundryService<MemoryStore, FixedClock>,
    reports: ReportService<MemoryStore, FixedClock>,
}

fn world(today: NaiveDate) -> World {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(FixedClock::on_date(today));
    World {
        properties: PropertyService::new(store.clone()),
        inspections: InspectionService::new(store.clone(), clock.clone()),
        sundry: SundryService::new(store.clone(), clock.clone()),
        reports: ReportService::new(store, clock),
    }
}

fn visit(property_id: PropertyId, kind: InspectionType) -> TaskDraft {
    TaskDraft {
        property_id,
        scheduled_at: None,
        inspection_type: kind,
        contact_phone: None,
        contact_email: None,
        notes: None,
        is_billable_override: None,
    }
}

fn complete_on(world: &World, draft: TaskDraft, day: NaiveDate) {
    let task = world.inspections.create(draft).expect("visit schedules");
    world
        .inspections
        .complete(
            task.id,
            CompletionInput {
                execution_date: day,
                notes: None,
            },
        )
        .expect("completion succeeds");
}

#[test]
fn the_report_counts_charged_visits_and_sundry_entries_in_window() {
    let window_start = date(2024, 3, 1);
    let world = world(date(2024, 3, 14));

    let property = world
        .properties
        .create(PropertyDraft {
            address: "17 Harbour Road, Kingsbridge".to_string(),
            billing_policy: BillingPolicy::TypeBased,
        })
        .expect("property creates");

    // Move-out then move-in: both charge under the type-based rule.
    complete_on(&world, visit(property.id, InspectionType::MoveOut), date(2024, 3, 4));
    complete_on(&world, visit(property.id, InspectionType::MoveIn), date(2024, 3, 2));
    // The recent charge keeps the follow-up routine visit free, which
    // excludes it from payroll.
    complete_on(&world, visit(property.id, InspectionType::Routine), date(2024, 3, 8));

    world
        .sundry
        .create(SundryDraft {
            description: "Strim the back garden".to_string(),
            cost_cents: 4_000,
            notes: None,
            execution_date: Some(date(2024, 3, 6)),
        })
        .expect("sundry records");
    world
        .sundry
        .create(SundryDraft {
            description: "No execution date yet".to_string(),
            cost_cents: 1_000,
            notes: None,
            execution_date: None,
        })
        .expect("sundry records");

    let report = world
        .reports
        .payroll(window_start, date(2024, 3, 14))
        .expect("window is valid");

    assert_eq!(report.period.days, 14);
    assert_eq!(report.summary.total_inspections, 2);
    assert_eq!(report.summary.total_sundry_tasks, 1);
    assert_eq!(report.summary.total_sundry_cost_cents, 4_000);

    let days: Vec<NaiveDate> = report
        .inspections
        .iter()
        .map(|record| record.execution_date)
        .collect();
    assert_eq!(
        days,
        vec![date(2024, 3, 2), date(2024, 3, 4)],
        "ascending by execution date"
    );
    assert!(report
        .inspections
        .iter()
        .all(|record| record.property_address.as_deref() == Some("17 Harbour Road, Kingsbridge")));
}

#[test]
fn the_two_weeks_view_tracks_the_clock() {
    let world = world(date(2024, 3, 14));
    let report = world.reports.two_weeks().expect("window derives");
    assert_eq!(report.period.start_date, date(2024, 3, 1));
    assert_eq!(report.period.end_date, date(2024, 3, 14));
    assert_eq!(report.period.days, 14);
    assert!(report.inspections.is_empty());
    assert_eq!(report.summary.total_sundry_cost_cents, 0);
}
