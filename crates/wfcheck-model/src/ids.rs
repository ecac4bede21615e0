use std::fmt;

use crate::ModelError;

/// Wind-farm id (`wfid`).
///
/// Callers may pass either a bare wfid (`320908`) or a cid-style value made
/// of a prefix and the wfid (`GS_320908`); both normalize to the wfid.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FarmId(String);

impl FarmId {
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ModelError> {
        let raw = raw.as_ref();
        let trimmed = raw.trim();
        let parts: Vec<&str> = trimmed.split('_').collect();
        let wfid = if parts.len() == 2 {
            parts[1].trim()
        } else {
            trimmed
        };
        if wfid.is_empty() {
            return Err(ModelError::InvalidFarmId(raw.to_string()));
        }
        Ok(Self(wfid.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FarmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
