use chrono::{DateTime, NaiveDate, Utc};

/// Source of the current instant for status promotion, completion stamps,
/// and report windows. Injected so the workflows stay deterministic under
/// test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock UTC time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant, for tests and scripted demos.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Pin the clock to noon UTC on `date`.
    pub fn on_date(date: NaiveDate) -> Self {
        Self(date.and_hms_opt(12, 0, 0).expect("valid wall time").and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_its_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date");
        let clock = FixedClock::on_date(date);
        assert_eq!(clock.today(), date);
    }
}
