use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use clap::Args;

use inspection_ops::clock::FixedClock;
use inspection_ops::error::AppError;
use inspection_ops::inspections::{CompletionInput, InspectionType, TaskDraft, TaskView};
use inspection_ops::properties::{BillingPolicy, Property, PropertyDraft};
use inspection_ops::reports::PayrollReport;
use inspection_ops::store::MemoryStore;
use inspection_ops::sundry::SundryDraft;

use crate::infra::{build_services, Services};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the reporting date (defaults to today, UTC)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Skip the task listing in the output
    #[arg(long)]
    pub(crate) skip_tasks: bool,
}

type DemoServices = Services<MemoryStore, FixedClock>;

fn demo_services(today: NaiveDate) -> DemoServices {
    build_services(
        Arc::new(MemoryStore::new()),
        Arc::new(FixedClock::on_date(today)),
    )
}

/// Populate the store with a fortnight of scheduling activity so reports
/// and listings have something to show.
fn seed(services: &DemoServices, today: NaiveDate) -> Result<(), AppError> {
    let harbour = services.properties.create(PropertyDraft {
        address: "17 Harbour Road, Kingsbridge".to_string(),
        billing_policy: BillingPolicy::ThreeMonthToggle,
    })?;
    let mill = services.properties.create(PropertyDraft {
        address: "4 Mill Lane, Dartmouth".to_string(),
        billing_policy: BillingPolicy::SixMonthFree,
    })?;
    let fore = services.properties.create(PropertyDraft {
        address: "82 Fore Street, Totnes".to_string(),
        billing_policy: BillingPolicy::TypeBased,
    })?;

    let visit = |property: &Property, kind: InspectionType| TaskDraft {
        property_id: property.id,
        scheduled_at: None,
        inspection_type: kind,
        contact_phone: None,
        contact_email: None,
        notes: None,
        is_billable_override: None,
    };

    // Alternation on the harbour property: charged, then free.
    for offset in [10i64, 4] {
        let task = services.inspections.create(visit(&harbour, InspectionType::Routine))?;
        services.inspections.complete(
            task.id,
            CompletionInput {
                execution_date: today - Duration::days(offset),
                notes: None,
            },
        )?;
    }

    let free_visit = services.inspections.create(visit(&mill, InspectionType::Routine))?;
    services.inspections.complete(
        free_visit.id,
        CompletionInput {
            execution_date: today - Duration::days(7),
            notes: Some("six-month cadence".to_string()),
        },
    )?;

    let move_in = services.inspections.create(visit(&fore, InspectionType::MoveIn))?;
    services.inspections.complete(
        move_in.id,
        CompletionInput {
            execution_date: today - Duration::days(12),
            notes: None,
        },
    )?;

    // A follow-up visit left open, with an agreed slot.
    let slot = (today + Duration::days(3))
        .and_hms_opt(10, 0, 0)
        .expect("valid wall time")
        .and_utc();
    services.inspections.create(TaskDraft {
        scheduled_at: Some(slot),
        ..visit(&fore, InspectionType::Routine)
    })?;

    services.sundry.create(SundryDraft {
        description: "Replace porch bulb".to_string(),
        cost_cents: 450,
        notes: None,
        execution_date: Some(today - Duration::days(6)),
    })?;
    services.sundry.create(SundryDraft {
        description: "Strim the back garden".to_string(),
        cost_cents: 4_000,
        notes: None,
        execution_date: Some(today - Duration::days(2)),
    })?;
    services.sundry.create(SundryDraft {
        description: "Collect spare keys".to_string(),
        cost_cents: 0,
        notes: Some("no date agreed yet".to_string()),
        execution_date: None,
    })?;

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Utc::now().date_naive());
    let services = demo_services(today);
    seed(&services, today)?;

    println!("Inspection operations demo");
    println!("Evaluated {today}");

    println!("\nProperties");
    for property in services.properties.list()? {
        let memory = match property.last_inspection_date {
            Some(date) if property.last_inspection_was_charged => {
                format!("last visit {date} (charged)")
            }
            Some(date) => format!("last visit {date} (free)"),
            None => "no visits yet".to_string(),
        };
        println!(
            "- {} [{:?}] {}",
            property.address, property.billing_policy, memory
        );
    }

    if !args.skip_tasks {
        println!("\nTasks");
        for task in services.inspections.list()? {
            println!("- {}", describe_task(&task));
        }
    }

    let report = services.reports.two_weeks()?;
    render_report(&report);
    Ok(())
}

/// Print a payroll report over the demo dataset; `window` of `None` means
/// the trailing two weeks.
pub(crate) fn run_payroll_report(window: Option<(NaiveDate, NaiveDate)>) -> Result<(), AppError> {
    let today = Utc::now().date_naive();
    let services = demo_services(today);
    seed(&services, today)?;

    let report = match window {
        Some((start, end)) => services.reports.payroll(start, end)?,
        None => services.reports.two_weeks()?,
    };
    render_report(&report);
    Ok(())
}

fn describe_task(task: &TaskView) -> String {
    let slot = match task.scheduled_at {
        Some(at) => format!(", slot {}", at.format("%Y-%m-%d %H:%M")),
        None => String::new(),
    };
    let charge = if task.effective_billable {
        "billable"
    } else {
        "free"
    };
    format!(
        "#{} {:?} at {} | {:?} | {}{}",
        task.id, task.inspection_type, task.property_address, task.status, charge, slot
    )
}

fn render_report(report: &PayrollReport) {
    println!(
        "\nPayroll window {} -> {} ({} days)",
        report.period.start_date, report.period.end_date, report.period.days
    );
    println!(
        "Charged inspections: {}, sundry tasks: {} (costs {})",
        report.summary.total_inspections,
        report.summary.total_sundry_tasks,
        format_cents(report.summary.total_sundry_cost_cents)
    );

    if report.inspections.is_empty() {
        println!("\nCharged visits: none");
    } else {
        println!("\nCharged visits");
        for record in &report.inspections {
            let address = record.property_address.as_deref().unwrap_or("unknown");
            println!(
                "- {} {:?} at {}",
                record.execution_date, record.inspection_type, address
            );
        }
    }

    if report.sundry_tasks.is_empty() {
        println!("\nSundry ledger: none");
    } else {
        println!("\nSundry ledger");
        for task in &report.sundry_tasks {
            let day = task
                .execution_date
                .map(|date| date.to_string())
                .unwrap_or_else(|| "undated".to_string());
            println!(
                "- {} {} ({})",
                day,
                task.description,
                format_cents(task.cost_cents)
            );
        }
    }
}

fn format_cents(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}
