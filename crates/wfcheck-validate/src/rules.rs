//! Tunable inputs of the checks.
//!
//! Both structs deserialize from TOML with every field optional; missing
//! fields take the production defaults.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Weather sources a forecasting method may use.
const PREDICTABLE_SOURCES: &[&str] = &[
    "CMA",
    "GFS",
    "ECGFS",
    "EC",
    "ECWRF",
    "COPT",
    "CMA2P5",
    "ECENS",
    "MIX",
    "PVS",
    "METE",
    "METEpv",
    "MLC",
    "MF",
    "CONWX",
    "ML",
    "conwx",
    "MeteoForce",
    "sea",
    "ECANEN",
    "XZ",
    "SUP",
];

const POWER_FIX_FUNCTIONS: &[&str] = &["power_off", "line_fix", "fix_power", "set_limit"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Allow-list of weather sources usable for forecasting.
    pub predictable_sources: Vec<String>,

    /// Known post-processing function names.
    pub power_fix_functions: Vec<String>,

    /// Absolute tolerance when comparing region capacity to farm capacity.
    pub capacity_tolerance: f64,

    /// Extra names implied by a monitored source, e.g. `ec` also provides `ecgfs`.
    pub source_aliases: BTreeMap<String, String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            predictable_sources: PREDICTABLE_SOURCES.iter().map(ToString::to_string).collect(),
            power_fix_functions: POWER_FIX_FUNCTIONS.iter().map(ToString::to_string).collect(),
            capacity_tolerance: 1e-6,
            source_aliases: BTreeMap::from([
                ("ec".to_string(), "ecgfs".to_string()),
                ("opt".to_string(), "copt".to_string()),
            ]),
        }
    }
}

impl RuleSet {
    /// Lowercased allow-list.
    pub fn allowed_sources(&self) -> BTreeSet<String> {
        self.predictable_sources
            .iter()
            .map(|source| source.to_lowercase())
            .collect()
    }

    /// Lowercased farm sources with aliases applied.
    pub fn expand_sources<I, S>(&self, sources: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut expanded: BTreeSet<String> = sources
            .into_iter()
            .map(|source| source.as_ref().to_lowercase())
            .collect();
        let implied: Vec<String> = self
            .source_aliases
            .iter()
            .filter(|(from, _)| expanded.contains(&from.to_lowercase()))
            .map(|(_, to)| to.to_lowercase())
            .collect();
        expanded.extend(implied);
        expanded
    }

    pub fn is_known_function(&self, name: &str) -> bool {
        self.power_fix_functions.iter().any(|known| known == name)
    }
}

/// Which farms a batch run picks from `wind_farm_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmSelection {
    /// Required `f_type`; `None` accepts every type.
    pub farm_type: Option<String>,
    /// Inspection states that take a farm out of service.
    pub excluded_states: Vec<String>,
    /// Project backgrounds whose forecasts are produced elsewhere.
    pub excluded_backgrounds: Vec<String>,
}

impl Default for FarmSelection {
    fn default() -> Self {
        Self {
            farm_type: Some("W".to_string()),
            excluded_states: vec!["停用".to_string()],
            excluded_backgrounds: vec![r#"[{"central":{"甘肃电科院":"气象"}}]"#.to_string()],
        }
    }
}
