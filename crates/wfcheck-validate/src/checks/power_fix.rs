//! Post-processing function parameters.
//!
//! `power_off` curtails output between two timestamps, `fix_power` pins the
//! forecast to an expression of the predicted power, `line_fix` shifts by
//! a fixed number of hours and `set_limit` caps output.

use wfcheck_model::{PowerFixConfig, Value};

use super::unparsable;
use crate::datetime::parse_datetime;
use crate::finding::{Category, FindingKind};
use crate::literal::parse_literal;

const POWER_OFF_KEYS: &[&str] = &["start_time", "end_time", "discount"];
const FIX_POWER_KEYS: &[&str] = &["options", "set_value"];
const LINE_FIX_KEYS: &[&str] = &["h"];

/// Check the `config` column of a row whose function name is known.
///
/// Returns a single [`FindingKind::PowerFixOk`] when nothing is wrong.
pub fn check(row: &PowerFixConfig) -> Vec<FindingKind> {
    let raw = row.config.as_deref().unwrap_or_default();
    let config = match parse_literal(raw) {
        Ok(value) => value,
        Err(err) => return vec![unparsable(Category::PowerFix, raw, &err)],
    };
    let Some(entries) = config.as_map() else {
        return vec![FindingKind::ConfigNotMapping {
            found: config.type_name().to_string(),
        }];
    };

    let mut findings = Vec::new();
    match row.func_name.as_str() {
        "power_off" => {
            findings.extend(check_keys(entries, POWER_OFF_KEYS));
            findings.extend(check_power_off(&config));
        }
        "fix_power" => {
            findings.extend(check_keys(entries, FIX_POWER_KEYS));
            findings.extend(check_fix_power(&config));
        }
        "line_fix" => {
            findings.extend(check_keys(entries, LINE_FIX_KEYS));
        }
        _ => {}
    }

    if findings.is_empty() {
        findings.push(FindingKind::PowerFixOk);
    }
    findings
}

/// Keys outside `allowed`, reported together.
fn check_keys(entries: &[(String, Value)], allowed: &[&str]) -> Option<FindingKind> {
    let keys: Vec<String> = entries
        .iter()
        .map(|(key, _)| key)
        .filter(|key| !allowed.contains(&key.as_str()))
        .cloned()
        .collect();
    (!keys.is_empty()).then_some(FindingKind::UnknownConfigKeys { keys })
}

fn check_power_off(config: &Value) -> Vec<FindingKind> {
    let mut findings = Vec::new();
    for key in ["start_time", "end_time"] {
        let Some(value) = config.get(key) else {
            continue;
        };
        let outcome = match value.as_str() {
            Some(text) => parse_datetime(text).map(|_| ()).map_err(|err| err.to_string()),
            None => Err(format!("expected a date string, found {}", value.type_name())),
        };
        if let Err(reason) = outcome {
            findings.push(FindingKind::InvalidDateTime {
                key: key.to_string(),
                raw: value.to_string(),
                reason,
            });
        }
    }
    if let Some(discount) = config.get("discount")
        && !discount.is_number()
    {
        findings.push(FindingKind::NonNumericValue {
            key: "discount".to_string(),
            value: discount.to_string(),
        });
    }
    findings
}

fn check_fix_power(config: &Value) -> Option<FindingKind> {
    let Some(set_value) = config.get("set_value") else {
        return Some(FindingKind::MissingConfigKey {
            key: "set_value".to_string(),
        });
    };
    let text = set_value.as_str()?;
    let leads_with_power = text.split('*').next() == Some("predict_power");
    (text.contains("predict_power") && leads_with_power).then(|| FindingKind::SetValueForm {
        value: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(func_name: &str, config: &str) -> PowerFixConfig {
        PowerFixConfig {
            id: "1".to_string(),
            cid: "GS_1".to_string(),
            func_name: func_name.to_string(),
            config: Some(config.to_string()),
        }
    }

    #[test]
    fn valid_power_off_passes() {
        let config = "{'start_time': '2020-12-26 00:00:00', 'end_time': '2020-12-27', 'discount': 0.5}";
        assert_eq!(check(&row("power_off", config)), vec![FindingKind::PowerFixOk]);
    }

    #[test]
    fn power_off_reports_every_problem() {
        let config = "{'start_time': 'soon', 'end_time': 20201227, 'discount': '0.5', 'extra': 1}";
        let findings = check(&row("power_off", config));
        assert_eq!(
            findings,
            vec![
                FindingKind::UnknownConfigKeys {
                    keys: vec!["extra".to_string()]
                },
                FindingKind::InvalidDateTime {
                    key: "start_time".to_string(),
                    raw: "soon".to_string(),
                    reason: "unknown string format: 'soon'".to_string(),
                },
                FindingKind::InvalidDateTime {
                    key: "end_time".to_string(),
                    raw: "20201227".to_string(),
                    reason: "expected a date string, found int".to_string(),
                },
                FindingKind::NonNumericValue {
                    key: "discount".to_string(),
                    value: "0.5".to_string(),
                },
            ]
        );
    }

    #[test]
    fn json_true_discount_is_not_numeric() {
        let findings = check(&row("power_off", "{\"discount\": true}"));
        assert_eq!(
            findings,
            vec![FindingKind::NonNumericValue {
                key: "discount".to_string(),
                value: "true".to_string(),
            }]
        );
    }

    #[test]
    fn fix_power_set_value_form() {
        assert_eq!(
            check(&row("fix_power", "{'options': 1, 'set_value': '1.0*predict_power'}")),
            vec![FindingKind::PowerFixOk]
        );
        assert_eq!(
            check(&row("fix_power", "{'set_value': 'predict_power*0.9'}")),
            vec![FindingKind::SetValueForm {
                value: "predict_power*0.9".to_string()
            }]
        );
        assert_eq!(
            check(&row("fix_power", "{'set_value': 'predict_power'}")),
            vec![FindingKind::SetValueForm {
                value: "predict_power".to_string()
            }]
        );
        assert_eq!(
            check(&row("fix_power", "{'set_value': 50}")),
            vec![FindingKind::PowerFixOk]
        );
    }

    #[test]
    fn fix_power_without_set_value() {
        assert_eq!(
            check(&row("fix_power", "{'options': 1, 'bogus': 2}")),
            vec![
                FindingKind::UnknownConfigKeys {
                    keys: vec!["bogus".to_string()]
                },
                FindingKind::MissingConfigKey {
                    key: "set_value".to_string()
                },
            ]
        );
    }

    #[test]
    fn line_fix_accepts_only_h() {
        assert_eq!(check(&row("line_fix", "{'h': 3}")), vec![FindingKind::PowerFixOk]);
        assert_eq!(
            check(&row("line_fix", "{'h': 3, 'm': 1, 's': 2}")).pop(),
            Some(FindingKind::UnknownConfigKeys {
                keys: vec!["m".to_string(), "s".to_string()]
            })
        );
    }

    #[test]
    fn set_limit_only_needs_a_mapping() {
        assert_eq!(
            check(&row("set_limit", "{'anything': 'goes'}")),
            vec![FindingKind::PowerFixOk]
        );
        assert_eq!(
            check(&row("set_limit", "[1, 2]")),
            vec![FindingKind::ConfigNotMapping {
                found: "list".to_string()
            }]
        );
        assert!(matches!(
            check(&row("set_limit", "{'a': }")).as_slice(),
            [FindingKind::UnparsableLiteral { .. }]
        ));
    }
}
