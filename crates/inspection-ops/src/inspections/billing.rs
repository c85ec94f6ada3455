//! Charge/no-charge decision for an inspection visit.

use chrono::{Months, NaiveDate};

use crate::properties::domain::{BillingPolicy, Property};

use super::domain::InspectionType;

/// Decide whether a visit of `inspection_type` against `property` incurs a
/// charge. Pure: reads only the property's billing policy and
/// last-inspection memory. `as_of` anchors the elapsed-time check of the
/// type-based rule and is ignored by the other variants.
pub fn should_charge(
    property: &Property,
    inspection_type: InspectionType,
    as_of: NaiveDate,
) -> bool {
    match property.billing_policy {
        BillingPolicy::SixMonthFree => false,
        BillingPolicy::ThreeMonthToggle => match property.last_inspection_date {
            None => true,
            Some(_) => !property.last_inspection_was_charged,
        },
        BillingPolicy::TypeBased => type_based(property, inspection_type, as_of),
    }
}

fn type_based(property: &Property, inspection_type: InspectionType, as_of: NaiveDate) -> bool {
    if matches!(
        inspection_type,
        InspectionType::MoveIn | InspectionType::MoveOut
    ) {
        return true;
    }
    let Some(prior) = property.last_inspection_date else {
        return true;
    };
    if !property.last_inspection_was_charged {
        return true;
    }
    // A charged visit keeps the next routine visit free only while it is
    // less than three calendar months old.
    charge_has_lapsed(prior, as_of)
}

fn charge_has_lapsed(prior: NaiveDate, as_of: NaiveDate) -> bool {
    match prior.checked_add_months(Months::new(3)) {
        Some(cutoff) => as_of >= cutoff,
        None => false,
    }
}
