//! Region capacity: the per-region capacities must add up to the farm capacity.

use wfcheck_model::Value;

use super::unparsable;
use crate::finding::{Category, FindingKind};
use crate::literal::parse_literal;

/// Check the `region` column of `wind_farm_available`.
pub fn check(raw: Option<&str>, powercap: Option<f64>, tolerance: f64) -> FindingKind {
    let raw = raw.unwrap_or_default();
    let region = match parse_literal(raw) {
        Ok(value) => value,
        Err(err) => return unparsable(Category::Region, raw, &err),
    };

    let entries = match &region {
        Value::Str(_) => return FindingKind::RegionCapacityNotNumeric,
        Value::Map(entries) => entries,
        other => {
            return FindingKind::RegionNotMapping {
                found: other.type_name().to_string(),
            };
        }
    };
    if entries.is_empty() {
        return FindingKind::RegionEmpty;
    }

    let mut configured = 0.0;
    for (_, capacity) in entries {
        match capacity.as_f64() {
            Some(value) => configured += value,
            None => return FindingKind::RegionCapacityNotNumeric,
        }
    }

    match powercap {
        Some(expected) if (expected - configured).abs() <= tolerance => {
            FindingKind::RegionCapacityOk
        }
        expected => FindingKind::RegionCapacityMismatch {
            configured,
            expected,
        },
    }
}
