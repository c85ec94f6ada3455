use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;

use inspection_ops::clock::Clock;
use inspection_ops::inspections::InspectionService;
use inspection_ops::properties::PropertyService;
use inspection_ops::reports::ReportService;
use inspection_ops::store::Storage;
use inspection_ops::sundry::SundryService;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Service bundle wired over one shared store and clock.
pub(crate) struct Services<S, C> {
    pub(crate) properties: Arc<PropertyService<S>>,
    pub(crate) inspections: Arc<InspectionService<S, C>>,
    pub(crate) sundry: Arc<SundryService<S, C>>,
    pub(crate) reports: Arc<ReportService<S, C>>,
}

pub(crate) fn build_services<S, C>(store: Arc<S>, clock: Arc<C>) -> Services<S, C>
where
    S: Storage,
    C: Clock,
{
    Services {
        properties: Arc::new(PropertyService::new(store.clone())),
        inspections: Arc::new(InspectionService::new(store.clone(), clock.clone())),
        sundry: Arc::new(SundryService::new(store.clone(), clock.clone())),
        reports: Arc::new(ReportService::new(store, clock)),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
