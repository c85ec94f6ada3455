use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use crate::clock::Clock;
use crate::error::DomainError;
use crate::inspections::domain::RecordView;
use crate::store::Storage;
use crate::sundry::domain::SundryTask;

use super::domain::{PayrollReport, ReportPeriod, ReportSummary};

/// Trailing window length of the two-weeks convenience view, inclusive of
/// both endpoints.
const TWO_WEEKS_SPAN_DAYS: i64 = 14;

pub struct ReportService<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> ReportService<S, C>
where
    S: Storage,
    C: Clock,
{
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    pub fn payroll(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PayrollReport, DomainError> {
        if end_date < start_date {
            return Err(DomainError::Validation(format!(
                "end date {end_date} precedes start date {start_date}"
            )));
        }

        self.store.read(|tables| {
            let mut inspections: Vec<RecordView> = tables
                .records()
                .filter(|record| {
                    record.is_charged
                        && record.execution_date >= start_date
                        && record.execution_date <= end_date
                })
                .map(|record| {
                    RecordView::from_parts(record, tables.property_address(record.property_id))
                })
                .collect();
            inspections.sort_by_key(|record| (record.execution_date, record.id));

            let mut sundry_tasks: Vec<SundryTask> = tables
                .sundry()
                .filter(|task| {
                    task.execution_date
                        .is_some_and(|date| date >= start_date && date <= end_date)
                })
                .cloned()
                .collect();
            sundry_tasks.sort_by_key(|task| (task.execution_date, task.id));

            let total_sundry_cost_cents = sundry_tasks.iter().map(|task| task.cost_cents).sum();

            Ok::<_, DomainError>(PayrollReport {
                period: ReportPeriod {
                    start_date,
                    end_date,
                    days: (end_date - start_date).num_days() + 1,
                },
                summary: ReportSummary {
                    total_inspections: inspections.len(),
                    total_sundry_tasks: sundry_tasks.len(),
                    total_sundry_cost_cents,
                },
                inspections,
                sundry_tasks,
            })
        })
    }

    /// Report over the trailing 14-day window ending today (UTC).
    pub fn two_weeks(&self) -> Result<PayrollReport, DomainError> {
        let end_date = self.clock.today();
        let start_date = end_date - Duration::days(TWO_WEEKS_SPAN_DAYS - 1);
        self.payroll(start_date, end_date)
    }
}
