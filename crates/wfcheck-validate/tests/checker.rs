//! End-to-end checks of one farm against in-memory tables.

use wfcheck_model::{FarmInfo, ThirdPartyInfo};
use wfcheck_source::MemorySource;
use wfcheck_validate::{
    Category, CheckError, FarmChecker, FindingKind, RuleSet, Status, check_farm,
};

const CID: &str = "GS_320908";

fn farm() -> FarmInfo {
    FarmInfo::new("320908").with_cid(CID).with_powercap(99.0)
}

fn source() -> MemorySource {
    MemorySource::new()
        .with_farm(farm())
        .with_model_config(CID, Some("{'1': 49.5, '2': 49.5}"), Some("m1"))
        .with_method(
            CID,
            "m1",
            Some("[{'rid': 1, 'nwp_config': {'EC': 1, 'GFS': 1}}]"),
        )
        .with_method(CID, "m2", Some("[{'rid': 1, 'nwp_config': {'CMA': 1}}]"))
        .with_nwp_source("320908", "EC")
        .with_nwp_source("320908", "GFS")
        .with_power_fix(
            CID,
            "1",
            "power_off",
            Some("{'start_time': '2020-12-26', 'end_time': 'never', 'discount': 0}"),
        )
        .with_power_fix(
            CID,
            "2",
            "fix_power",
            Some("{'set_value': 'predict_power*1.0'}"),
        )
        .with_power_fix(CID, "3", "smooth", Some("{}"))
        .with_power_fix(CID, "4", "line_fix", Some("{'h': 2}"))
}

fn lines(findings: &[wfcheck_validate::Finding]) -> String {
    findings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn full_check_logs_every_section() {
    let source = source();
    let rules = RuleSet::default();
    let report = check_farm(&source, &rules, "320908").expect("report");

    insta::assert_snapshot!(lines(&report.findings), @r"
320908: farm-list/edit region capacity is ok
320908: farm-list/edit manual model 'm1' is ok
320908: model-list/m1/model-config configured correctly
error: 320908: model-list/m2/model-config 1: CMA weather source does not exist
error: 320908: post-processing/1/power_off 'end_time' field error: 'never' invalid date format, error 'unknown string format: 'never''
error: 320908: post-processing/2/fix_power 'set_value' should take the form '1.0*predict_power', found 'predict_power*1.0'
error: 320908: post-processing/3/smooth unknown function name 'smooth'
320908: post-processing/4/line_fix configured correctly
");
    assert_eq!(report.error_count(), 4);
    assert_eq!(report.pass_count(), 4);
    assert_eq!(report.error_count_in(Category::PowerFix), 3);
    assert_eq!(report.cid.as_deref(), Some(CID));
}

#[test]
fn cid_style_ids_resolve_to_the_farm() {
    let source = source();
    let rules = RuleSet::default();
    let report = check_farm(&source, &rules, CID).expect("report");
    assert_eq!(report.wfid, "320908");
    assert!(!report.findings.is_empty());
}

#[test]
fn invalid_cid_stops_after_one_finding() {
    let source = MemorySource::new().with_farm(FarmInfo::new("836610").with_cid(""));
    let report = check_farm(&source, &RuleSet::default(), "836610").expect("report");
    assert_eq!(report.findings.len(), 1);
    assert_eq!(
        report.findings[0].to_string(),
        "error: 836610: farm-info invalid farm cid cid=''"
    );
}

#[test]
fn unknown_farm_is_an_error() {
    let source = MemorySource::new();
    let err = check_farm(&source, &RuleSet::default(), "1").expect_err("missing farm");
    assert!(matches!(err, CheckError::Source(_)));

    let err = check_farm(&source, &RuleSet::default(), "  ").expect_err("blank id");
    assert!(matches!(err, CheckError::InvalidId(_)));
}

#[test]
fn missing_model_config_and_no_power_fix() {
    let source = MemorySource::new().with_farm(farm());
    let report = check_farm(&source, &RuleSet::default(), "320908").expect("report");
    let kinds: Vec<&FindingKind> = report.findings.iter().map(|f| &f.kind).collect();
    assert_eq!(
        kinds,
        vec![&FindingKind::ModelConfigMissing, &FindingKind::NoPowerFix]
    );
    assert_eq!(report.findings[1].status(), Status::Pass);
    assert_eq!(
        report.findings[1].to_string(),
        "320908: post-processing no post-processing functions"
    );
}

#[test]
fn third_party_vendors_extend_farm_sources() {
    let source = MemorySource::new()
        .with_farm(farm())
        .with_method(
            CID,
            "m1",
            Some("[{'rid': 'north', 'nwp_config': {'MeteoForce': 1, 'conwx': 1}}]"),
        )
        .with_third_party(ThirdPartyInfo {
            wfid: "320908".to_string(),
            meteoforce: Some(1.0),
            conwx: Some(1.0),
            ..ThirdPartyInfo::default()
        });
    let rules = RuleSet::default();
    let mut checker = FarmChecker::new(&source, &rules, "320908").expect("checker");
    checker.check_method_config().expect("method config");
    assert_eq!(checker.findings().len(), 1);
    assert_eq!(checker.findings()[0].kind, FindingKind::MethodConfigOk);
}

#[test]
fn method_with_empty_region_is_unparsable() {
    let mut source = MemorySource::new().with_farm(farm());
    source.method_configs.push(wfcheck_model::MethodConfig {
        method_id: "m9".to_string(),
        cid: CID.to_string(),
        region: None,
    });
    let rules = RuleSet::default();
    let mut checker = FarmChecker::new(&source, &rules, "320908").expect("checker");
    checker.check_method_config().expect("method config");
    let finding = &checker.findings()[0];
    assert_eq!(finding.section, "model-list/m9/model-config");
    assert!(matches!(
        finding.kind,
        FindingKind::UnparsableLiteral {
            category: Category::WeatherSource,
            ..
        }
    ));
}

#[test]
fn custom_rules_change_the_outcome() {
    let rules = RuleSet {
        power_fix_functions: vec!["power_off".to_string()],
        ..RuleSet::default()
    };
    let source = MemorySource::new()
        .with_farm(farm())
        .with_power_fix(CID, "1", "line_fix", Some("{'h': 1}"));
    let mut checker = FarmChecker::new(&source, &rules, "320908").expect("checker");
    checker.check_power_fix_config().expect("power fix");
    assert_eq!(
        checker.into_report().findings[0].kind,
        FindingKind::UnknownPowerFixFunction {
            name: "line_fix".to_string()
        }
    );
}
