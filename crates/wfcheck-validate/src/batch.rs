//! Checking many farms in one run.

use tracing::{error, info};

use wfcheck_model::FarmInfo;
use wfcheck_source::ConfigSource;

use crate::checker::FarmChecker;
use crate::error::Result;
use crate::report::{BatchReport, FarmFailure, FarmReport};
use crate::rules::{FarmSelection, RuleSet};

/// Check one farm by wfid or cid-style id.
pub fn check_farm<S: ConfigSource + ?Sized>(
    source: &S,
    rules: &RuleSet,
    farm_id: &str,
) -> Result<FarmReport> {
    FarmChecker::new(source, rules, farm_id)?.check_all()
}

/// Check farms in order. A farm that cannot be checked is recorded as a
/// failure and the run moves on.
pub fn check_farms<S, I>(source: &S, rules: &RuleSet, farm_ids: I) -> BatchReport
where
    S: ConfigSource + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut batch = BatchReport::default();
    for (index, farm_id) in farm_ids.into_iter().enumerate() {
        let farm_id = farm_id.as_ref();
        info!(index, farm_id, "checking farm");
        match check_farm(source, rules, farm_id) {
            Ok(report) => batch.farms.push(report),
            Err(err) => {
                error!(farm_id, error = %err, "farm check failed");
                batch.failures.push(FarmFailure {
                    farm_id: farm_id.to_string(),
                    message: err.to_string(),
                });
            }
        }
    }
    batch
}

/// Sorted wfids of the farms a routine batch run covers.
pub fn select_active_farms<S: ConfigSource + ?Sized>(
    source: &S,
    selection: &FarmSelection,
) -> Result<Vec<String>> {
    let mut wfids: Vec<String> = source
        .farms()?
        .into_iter()
        .filter(|farm| is_selected(farm, selection))
        .map(|farm| farm.wfid)
        .collect();
    wfids.sort();
    wfids.dedup();
    Ok(wfids)
}

pub fn is_selected(farm: &FarmInfo, selection: &FarmSelection) -> bool {
    if let Some(farm_type) = &selection.farm_type
        && farm.farm_type.as_deref() != Some(farm_type.as_str())
    {
        return false;
    }
    let state = farm.inspection_state.as_deref().unwrap_or_default();
    if selection.excluded_states.iter().any(|excluded| excluded == state) {
        return false;
    }
    let background = farm.project_background.as_deref().unwrap_or_default();
    !selection
        .excluded_backgrounds
        .iter()
        .any(|excluded| excluded == background)
}
