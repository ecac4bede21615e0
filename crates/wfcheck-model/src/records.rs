//! One struct per configuration table.
//!
//! Field names follow the table columns so the structs deserialize directly
//! from exported rows.

use serde::{Deserialize, Serialize};

/// Row of `wind_farm_info`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FarmInfo {
    pub wfid: String,
    #[serde(default)]
    pub cid: Option<String>,
    /// Installed capacity.
    #[serde(default)]
    pub powercap: Option<f64>,
    #[serde(default, rename = "wfname")]
    pub name: Option<String>,
    #[serde(default, rename = "f_type")]
    pub farm_type: Option<String>,
    #[serde(default)]
    pub inspection_state: Option<String>,
    #[serde(default)]
    pub project_background: Option<String>,
}

impl FarmInfo {
    pub fn new(wfid: impl Into<String>) -> Self {
        Self {
            wfid: wfid.into(),
            ..Self::default()
        }
    }

    pub fn with_cid(mut self, cid: impl Into<String>) -> Self {
        self.cid = Some(cid.into());
        self
    }

    pub fn with_powercap(mut self, powercap: f64) -> Self {
        self.powercap = Some(powercap);
        self
    }

    /// A cid is usable when it is present and non-empty.
    pub fn has_valid_cid(&self) -> bool {
        self.cid.as_deref().is_some_and(|cid| !cid.is_empty())
    }

    /// The cid, or an empty string when absent.
    pub fn cid_or_empty(&self) -> &str {
        self.cid.as_deref().unwrap_or_default()
    }
}

/// Row of `wind_farm_available`: farm-level model settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FarmModelConfig {
    pub cid: String,
    /// Region-to-capacity mapping literal, e.g. `{'1': 49.5, '2': 49.5}`.
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub manual_model: Option<String>,
}

/// Row of `method_config`: one forecasting method of a farm.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodConfig {
    pub method_id: String,
    pub cid: String,
    /// List literal of region entries, each with `rid` and `nwp_config`.
    #[serde(default)]
    pub region: Option<String>,
}

/// Row of `power_fix_config`: one post-processing function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerFixConfig {
    pub id: String,
    pub cid: String,
    pub func_name: String,
    #[serde(default)]
    pub config: Option<String>,
}

/// Row of `nwp_monitor`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NwpMonitorRow {
    pub wfid: String,
    pub source: String,
}

/// Row of `thirdparty_info`: one flag column per third-party weather vendor.
///
/// Flags are read as floats since nullable integer columns are often
/// exported as `1.0`/`0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThirdPartyInfo {
    pub wfid: String,
    #[serde(default)]
    pub meteologica: Option<f64>,
    #[serde(default)]
    pub meteoforce: Option<f64>,
    #[serde(default)]
    pub conwx: Option<f64>,
    #[serde(default)]
    pub xinzhi: Option<f64>,
}

impl ThirdPartyInfo {
    /// Vendor columns whose flag equals 1, in column order.
    pub fn enabled_sources(&self) -> Vec<String> {
        [
            ("meteologica", self.meteologica),
            ("meteoforce", self.meteoforce),
            ("conwx", self.conwx),
            ("xinzhi", self.xinzhi),
        ]
        .into_iter()
        .filter(|(_, flag)| *flag == Some(1.0))
        .map(|(name, _)| name.to_string())
        .collect()
    }
}
