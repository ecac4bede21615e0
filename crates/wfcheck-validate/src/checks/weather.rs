//! Weather sources: every source a method's regions use must be monitored
//! for the farm and usable for forecasting.

use std::collections::BTreeSet;

use wfcheck_model::Value;

use super::unparsable;
use crate::finding::{Category, FindingKind};
use crate::literal::parse_literal;

/// Check the `region` column of one `method_config` row.
///
/// `farm_sources` and `allowed` must already be lowercased.
pub fn check(
    raw: Option<&str>,
    farm_sources: &BTreeSet<String>,
    allowed: &BTreeSet<String>,
) -> FindingKind {
    let raw = raw.unwrap_or_default();
    let region = match parse_literal(raw) {
        Ok(value) => value,
        Err(err) => return unparsable(Category::WeatherSource, raw, &err),
    };
    let Some(entries) = region.as_list() else {
        return FindingKind::MethodRegionMalformed {
            reason: format!("expected a list of regions, found {}", region.type_name()),
        };
    };

    let mut unknown = Vec::new();
    for (idx, entry) in entries.iter().enumerate() {
        if entry.as_map().is_none() {
            return FindingKind::MethodRegionMalformed {
                reason: format!("region {idx} is a {}, not a dict", entry.type_name()),
            };
        }
        let Some(nwp_config) = entry.get("nwp_config").and_then(Value::as_map) else {
            return FindingKind::MethodRegionMalformed {
                reason: format!("region {idx} has no 'nwp_config' dict"),
            };
        };
        let rid = entry
            .get("rid")
            .map_or_else(|| "-".to_string(), ToString::to_string);
        for (source, _) in nwp_config {
            let lower = source.to_lowercase();
            if !farm_sources.contains(&lower) || !allowed.contains(&lower) {
                unknown.push(format!("{rid}: {source}"));
            }
        }
    }

    if unknown.is_empty() {
        FindingKind::MethodConfigOk
    } else {
        FindingKind::UnknownWeatherSources { entries: unknown }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSet;

    fn sources(names: &[&str]) -> BTreeSet<String> {
        RuleSet::default().expand_sources(names.iter().copied())
    }

    #[test]
    fn monitored_and_allowed_sources_pass() {
        let allowed = RuleSet::default().allowed_sources();
        let raw = "[{'rid': 1, 'nwp_config': {'EC': 0.5, 'gfs': 0.5}}]";
        assert_eq!(
            check(Some(raw), &sources(&["EC", "GFS"]), &allowed),
            FindingKind::MethodConfigOk
        );
    }

    #[test]
    fn aliases_count_as_monitored() {
        let allowed = RuleSet::default().allowed_sources();
        let raw = "[{'rid': 1, 'nwp_config': {'ECGFS': 1}}]";
        assert_eq!(
            check(Some(raw), &sources(&["ec"]), &allowed),
            FindingKind::MethodConfigOk
        );
    }

    #[test]
    fn unmonitored_or_unlisted_sources_are_collected() {
        let allowed = RuleSet::default().allowed_sources();
        // OPT is monitored but not allowed; CMA is allowed but not monitored.
        let raw = "[{'rid': 1, 'nwp_config': {'OPT': 1}}, {'rid': 2, 'nwp_config': {'CMA': 1, 'EC': 1}}]";
        let finding = check(Some(raw), &sources(&["OPT", "EC"]), &allowed);
        assert_eq!(
            finding,
            FindingKind::UnknownWeatherSources {
                entries: vec!["1: OPT".to_string(), "2: CMA".to_string()],
            }
        );
        assert_eq!(finding.message(), "1: OPT,2: CMA weather source does not exist");
    }

    #[test]
    fn malformed_regions() {
        let allowed = RuleSet::default().allowed_sources();
        let farm = sources(&["EC"]);
        assert_eq!(
            check(Some("{'rid': 1}"), &farm, &allowed),
            FindingKind::MethodRegionMalformed {
                reason: "expected a list of regions, found dict".to_string()
            }
        );
        assert_eq!(
            check(Some("[{'rid': 1}]"), &farm, &allowed),
            FindingKind::MethodRegionMalformed {
                reason: "region 0 has no 'nwp_config' dict".to_string()
            }
        );
        assert_eq!(
            check(Some("[1]"), &farm, &allowed),
            FindingKind::MethodRegionMalformed {
                reason: "region 0 is a int, not a dict".to_string()
            }
        );
        assert!(matches!(
            check(Some("[{"), &farm, &allowed),
            FindingKind::UnparsableLiteral {
                category: Category::WeatherSource,
                ..
            }
        ));
    }

    #[test]
    fn empty_region_list_passes() {
        let allowed = RuleSet::default().allowed_sources();
        assert_eq!(
            check(Some("[]"), &sources(&[]), &allowed),
            FindingKind::MethodConfigOk
        );
    }
}
