use wfcheck_model::{FarmId, FarmInfo, ThirdPartyInfo};

#[test]
fn farm_info_cid_validity() {
    let farm = FarmInfo::new("320908").with_cid("GS_320908");
    assert!(farm.has_valid_cid());

    let farm = FarmInfo::new("320908").with_cid("");
    assert!(!farm.has_valid_cid());
    assert_eq!(farm.cid_or_empty(), "");

    assert!(!FarmInfo::new("320908").has_valid_cid());
}

#[test]
fn third_party_flags_select_enabled_vendors() {
    let info = ThirdPartyInfo {
        wfid: "320908".to_string(),
        meteologica: Some(0.0),
        meteoforce: Some(1.0),
        conwx: Some(1.0),
        xinzhi: None,
    };
    assert_eq!(info.enabled_sources(), vec!["meteoforce", "conwx"]);
}

#[test]
fn farm_info_deserializes_from_table_columns() {
    let json = r#"{
        "wfid": "320908",
        "cid": "GS_320908",
        "powercap": 99.0,
        "wfname": "North Ridge",
        "f_type": "W",
        "inspection_state": "active"
    }"#;
    let farm: FarmInfo = serde_json::from_str(json).expect("farm info");
    assert_eq!(farm.name.as_deref(), Some("North Ridge"));
    assert_eq!(farm.farm_type.as_deref(), Some("W"));
    assert_eq!(farm.powercap, Some(99.0));
    assert_eq!(farm.project_background, None);
}

#[test]
fn farm_id_serializes_as_plain_string() {
    let id = FarmId::parse("GS_320908").expect("farm id");
    assert_eq!(serde_json::to_string(&id).expect("json"), "\"320908\"");
}
