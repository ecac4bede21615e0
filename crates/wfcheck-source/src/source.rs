use wfcheck_model::{FarmInfo, FarmModelConfig, MethodConfig, PowerFixConfig};

use crate::Result;

/// Read-only access to the configuration tables.
///
/// `wfid` arguments are normalized farm ids; `cid` arguments are the
/// configuration ids stored on `wind_farm_info`.
pub trait ConfigSource {
    /// Basic farm record from `wind_farm_info`.
    fn farm_info(&self, wfid: &str) -> Result<FarmInfo>;

    /// First `wind_farm_available` record for the cid.
    fn model_config(&self, cid: &str) -> Result<Option<FarmModelConfig>>;

    /// Method ids configured in `method_config` for the cid.
    fn method_ids(&self, cid: &str) -> Result<Vec<String>>;

    /// First `method_config` record for the method id.
    fn method_config(&self, method_id: &str) -> Result<Option<MethodConfig>>;

    /// `power_fix_config` rows for the cid, in table order.
    fn power_fix_configs(&self, cid: &str) -> Result<Vec<PowerFixConfig>>;

    /// Distinct weather sources monitored in `nwp_monitor`, sorted.
    fn nwp_sources(&self, wfid: &str) -> Result<Vec<String>>;

    /// Third-party vendors enabled in `thirdparty_info`.
    fn third_party_sources(&self, wfid: &str) -> Result<Vec<String>>;

    /// Every row of `wind_farm_info`.
    fn farms(&self) -> Result<Vec<FarmInfo>>;
}
