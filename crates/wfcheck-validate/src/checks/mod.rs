//! Field-level checks.
//!
//! Each module checks one configuration aspect. Checks are pure: they take
//! the raw column text plus whatever reference data they need and return
//! findings without touching the data source.

pub mod manual_model;
pub mod power_fix;
pub mod region;
pub mod weather;

use crate::finding::{Category, FindingKind};
use crate::literal::LiteralError;

fn unparsable(category: Category, raw: &str, err: &LiteralError) -> FindingKind {
    FindingKind::UnparsableLiteral {
        category,
        raw: raw.to_string(),
        reason: err.to_string(),
    }
}
