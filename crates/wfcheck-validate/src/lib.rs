//! Validation rules for wind-farm forecasting configuration.
//!
//! Each farm is checked in three passes:
//!
//! - **Model config**: region capacities add up to the farm capacity, and a
//!   pinned manual model is one of the farm's methods
//! - **Method config**: every weather source a method uses is monitored for
//!   the farm and on the forecasting allow-list
//! - **Post-processing**: function names are known, and their parameters
//!   carry only allowed keys, parseable dates and numeric values
//!
//! Every check produces a [`Finding`] that is logged through `tracing` as it
//! is recorded (pass at INFO, error at WARN) and kept in a [`FarmReport`].
//!
//! # Example
//!
//! ```ignore
//! use wfcheck_validate::{RuleSet, check_farms};
//!
//! let source = CsvDirectorySource::open("exports")?;
//! let batch = check_farms(&source, &RuleSet::default(), ["320908", "GS_836610"]);
//! for farm in &batch.farms {
//!     for finding in farm.errors() {
//!         println!("{finding}");
//!     }
//! }
//! ```

mod batch;
mod checker;
pub mod checks;
pub mod datetime;
mod error;
mod finding;
pub mod literal;
mod report;
pub mod rules;

pub use batch::{check_farm, check_farms, is_selected, select_active_farms};
pub use checker::FarmChecker;
pub use datetime::{DateTimeError, parse_datetime};
pub use error::{CheckError, Result};
pub use finding::{Category, Finding, FindingKind, Status};
pub use literal::{LiteralError, LiteralErrorKind, parse_literal};
pub use report::{BatchReport, FarmFailure, FarmReport};
pub use rules::{FarmSelection, RuleSet};
