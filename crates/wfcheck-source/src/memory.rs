use std::collections::BTreeSet;

use wfcheck_model::{
    FarmInfo, FarmModelConfig, MethodConfig, NwpMonitorRow, PowerFixConfig, ThirdPartyInfo,
};

use crate::{ConfigSource, Result, SourceError};

/// In-memory tables with the same query semantics as [`crate::CsvDirectorySource`].
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub farms: Vec<FarmInfo>,
    pub model_configs: Vec<FarmModelConfig>,
    pub method_configs: Vec<MethodConfig>,
    pub power_fix_configs: Vec<PowerFixConfig>,
    pub nwp_monitor: Vec<NwpMonitorRow>,
    pub third_party: Vec<ThirdPartyInfo>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_farm(mut self, farm: FarmInfo) -> Self {
        self.farms.push(farm);
        self
    }

    pub fn with_model_config(
        mut self,
        cid: &str,
        region: Option<&str>,
        manual_model: Option<&str>,
    ) -> Self {
        self.model_configs.push(FarmModelConfig {
            cid: cid.to_string(),
            region: region.map(str::to_string),
            manual_model: manual_model.map(str::to_string),
        });
        self
    }

    pub fn with_method(mut self, cid: &str, method_id: &str, region: Option<&str>) -> Self {
        self.method_configs.push(MethodConfig {
            method_id: method_id.to_string(),
            cid: cid.to_string(),
            region: region.map(str::to_string),
        });
        self
    }

    pub fn with_power_fix(
        mut self,
        cid: &str,
        id: &str,
        func_name: &str,
        config: Option<&str>,
    ) -> Self {
        self.power_fix_configs.push(PowerFixConfig {
            id: id.to_string(),
            cid: cid.to_string(),
            func_name: func_name.to_string(),
            config: config.map(str::to_string),
        });
        self
    }

    pub fn with_nwp_source(mut self, wfid: &str, source: &str) -> Self {
        self.nwp_monitor.push(NwpMonitorRow {
            wfid: wfid.to_string(),
            source: source.to_string(),
        });
        self
    }

    pub fn with_third_party(mut self, info: ThirdPartyInfo) -> Self {
        self.third_party.push(info);
        self
    }
}

impl ConfigSource for MemorySource {
    fn farm_info(&self, wfid: &str) -> Result<FarmInfo> {
        self.farms
            .iter()
            .find(|farm| farm.wfid == wfid)
            .cloned()
            .ok_or_else(|| SourceError::FarmNotFound {
                wfid: wfid.to_string(),
            })
    }

    fn model_config(&self, cid: &str) -> Result<Option<FarmModelConfig>> {
        Ok(self.model_configs.iter().find(|row| row.cid == cid).cloned())
    }

    fn method_ids(&self, cid: &str) -> Result<Vec<String>> {
        Ok(self
            .method_configs
            .iter()
            .filter(|row| row.cid == cid)
            .map(|row| row.method_id.clone())
            .collect())
    }

    fn method_config(&self, method_id: &str) -> Result<Option<MethodConfig>> {
        Ok(self
            .method_configs
            .iter()
            .find(|row| row.method_id == method_id)
            .cloned())
    }

    fn power_fix_configs(&self, cid: &str) -> Result<Vec<PowerFixConfig>> {
        Ok(self
            .power_fix_configs
            .iter()
            .filter(|row| row.cid == cid)
            .cloned()
            .collect())
    }

    fn nwp_sources(&self, wfid: &str) -> Result<Vec<String>> {
        let sources: BTreeSet<String> = self
            .nwp_monitor
            .iter()
            .filter(|row| row.wfid == wfid)
            .map(|row| row.source.clone())
            .collect();
        Ok(sources.into_iter().collect())
    }

    fn third_party_sources(&self, wfid: &str) -> Result<Vec<String>> {
        Ok(self
            .third_party
            .iter()
            .find(|row| row.wfid == wfid)
            .map(ThirdPartyInfo::enabled_sources)
            .unwrap_or_default())
    }

    fn farms(&self) -> Result<Vec<FarmInfo>> {
        Ok(self.farms.clone())
    }
}
