//! Check outcomes.
//!
//! Every check yields a [`FindingKind`]; each variant carries only the data
//! its message needs. A [`Finding`] pins the kind to a farm and section and
//! renders the log line operators read.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Pass,
    Error,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Error => "Error",
        }
    }
}

/// Configuration area a check belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Farm,
    Region,
    ManualModel,
    WeatherSource,
    PowerFix,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Farm => "Farm",
            Self::Region => "Region",
            Self::ManualModel => "Manual Model",
            Self::WeatherSource => "Weather Source",
            Self::PowerFix => "Power Fix",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum FindingKind {
    // Farm
    /// cid on `wind_farm_info` is missing or empty
    InvalidCid { cid: String },
    /// No `wind_farm_available` row for the cid
    ModelConfigMissing,

    // Any blob column
    /// Blob text could not be parsed
    UnparsableLiteral {
        category: Category,
        raw: String,
        reason: String,
    },

    // Region capacity
    RegionNotMapping { found: String },
    RegionEmpty,
    RegionCapacityNotNumeric,
    RegionCapacityMismatch {
        configured: f64,
        expected: Option<f64>,
    },
    RegionCapacityOk,

    // Manual model
    ManualModelEmpty,
    ManualModelUnknown { model: String },
    ManualModelOk { model: String },

    // Method weather sources
    MethodConfigMissing { method: String },
    MethodRegionMalformed { reason: String },
    /// `<rid>: <source>` pairs not backed by the farm or the allow-list
    UnknownWeatherSources { entries: Vec<String> },
    MethodConfigOk,

    // Post-processing functions
    NoPowerFix,
    UnknownPowerFixFunction { name: String },
    ConfigNotMapping { found: String },
    UnknownConfigKeys { keys: Vec<String> },
    InvalidDateTime {
        key: String,
        raw: String,
        reason: String,
    },
    NonNumericValue { key: String, value: String },
    MissingConfigKey { key: String },
    /// `set_value` starts with `predict_power` instead of a coefficient
    SetValueForm { value: String },
    PowerFixOk,
}

impl FindingKind {
    pub fn status(&self) -> Status {
        match self {
            Self::RegionCapacityOk
            | Self::ManualModelEmpty
            | Self::ManualModelOk { .. }
            | Self::MethodConfigOk
            | Self::NoPowerFix
            | Self::PowerFixOk => Status::Pass,
            _ => Status::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status() == Status::Error
    }

    pub fn category(&self) -> Category {
        match self {
            Self::InvalidCid { .. } | Self::ModelConfigMissing => Category::Farm,
            Self::UnparsableLiteral { category, .. } => *category,
            Self::RegionNotMapping { .. }
            | Self::RegionEmpty
            | Self::RegionCapacityNotNumeric
            | Self::RegionCapacityMismatch { .. }
            | Self::RegionCapacityOk => Category::Region,
            Self::ManualModelEmpty
            | Self::ManualModelUnknown { .. }
            | Self::ManualModelOk { .. } => Category::ManualModel,
            Self::MethodConfigMissing { .. }
            | Self::MethodRegionMalformed { .. }
            | Self::UnknownWeatherSources { .. }
            | Self::MethodConfigOk => Category::WeatherSource,
            Self::NoPowerFix
            | Self::UnknownPowerFixFunction { .. }
            | Self::ConfigNotMapping { .. }
            | Self::UnknownConfigKeys { .. }
            | Self::InvalidDateTime { .. }
            | Self::NonNumericValue { .. }
            | Self::MissingConfigKey { .. }
            | Self::SetValueForm { .. }
            | Self::PowerFixOk => Category::PowerFix,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::InvalidCid { cid } => format!("invalid farm cid cid='{cid}'"),
            Self::ModelConfigMissing => "no model config found".to_string(),
            Self::UnparsableLiteral { raw, reason, .. } => {
                format!("'{raw}', check the string format. error: '{reason}'")
            }
            Self::RegionNotMapping { found } => {
                format!("region capacity must map region ids to capacities, found {found}")
            }
            Self::RegionEmpty => "region capacity has no regions".to_string(),
            Self::RegionCapacityNotNumeric => {
                "region capacity is misconfigured, capacities must be numeric".to_string()
            }
            Self::RegionCapacityMismatch {
                configured,
                expected,
            } => {
                let expected = expected.map_or_else(|| "unset".to_string(), |v| v.to_string());
                format!(
                    "region capacity is misconfigured, total {configured} does not match farm capacity {expected}"
                )
            }
            Self::RegionCapacityOk => "region capacity is ok".to_string(),
            Self::ManualModelEmpty => "manual model is empty".to_string(),
            Self::ManualModelUnknown { model } => {
                format!("manual model '{model}' is not a configured method")
            }
            Self::ManualModelOk { model } => format!("manual model '{model}' is ok"),
            Self::MethodConfigMissing { method } => {
                format!("no config found for method '{method}'")
            }
            Self::MethodRegionMalformed { reason } => {
                format!("region entries are malformed: {reason}")
            }
            Self::UnknownWeatherSources { entries } => {
                format!("{} weather source does not exist", entries.join(","))
            }
            Self::MethodConfigOk | Self::PowerFixOk => "configured correctly".to_string(),
            Self::NoPowerFix => "no post-processing functions".to_string(),
            Self::UnknownPowerFixFunction { name } => format!("unknown function name '{name}'"),
            Self::ConfigNotMapping { found } => {
                format!("config must be a mapping, found {found}")
            }
            Self::UnknownConfigKeys { keys } => format!("'{}' unknown field", keys.join(",")),
            Self::InvalidDateTime { key, raw, reason } => {
                format!("'{key}' field error: '{raw}' invalid date format, error '{reason}'")
            }
            Self::NonNumericValue { key, value } => {
                format!("'{key}' field error: '{value}' must be numeric")
            }
            Self::MissingConfigKey { key } => format!("'{key}' field missing"),
            Self::SetValueForm { value } => {
                format!("'set_value' should take the form '1.0*predict_power', found '{value}'")
            }
        }
    }
}

/// A check outcome for one farm and configuration section.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub wfid: String,
    /// Where the value lives, e.g. `model-list/m1/model-config`.
    pub section: String,
    pub kind: FindingKind,
}

impl Finding {
    pub fn new(wfid: impl Into<String>, section: impl Into<String>, kind: FindingKind) -> Self {
        Self {
            wfid: wfid.into(),
            section: section.into(),
            kind,
        }
    }

    pub fn status(&self) -> Status {
        self.kind.status()
    }

    pub fn is_error(&self) -> bool {
        self.kind.is_error()
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn message(&self) -> String {
        self.kind.message()
    }
}

/// Log line: `<wfid>: <section> <message>`, prefixed with `error: ` on failure.
impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_error() {
            f.write_str("error: ")?;
        }
        write!(f, "{}: {} {}", self.wfid, self.section, self.message())
    }
}

impl Serialize for Finding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Finding", 6)?;
        state.serialize_field("wfid", &self.wfid)?;
        state.serialize_field("section", &self.section)?;
        state.serialize_field("status", &self.status())?;
        state.serialize_field("category", &self.category())?;
        state.serialize_field("message", &self.message())?;
        state.serialize_field("detail", &self.kind)?;
        state.end()
    }
}
