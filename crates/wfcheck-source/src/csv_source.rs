use std::collections::BTreeSet;
use std::path::PathBuf;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use tracing::debug;

use wfcheck_model::{
    FarmInfo, FarmModelConfig, MethodConfig, NwpMonitorRow, PowerFixConfig, ThirdPartyInfo,
};

use crate::{ConfigSource, Result, SourceError};

/// Configuration tables exported as CSV files into one directory.
///
/// Files are read on every query, so edits to the exports are picked up
/// without reopening the source.
#[derive(Debug, Clone)]
pub struct CsvDirectorySource {
    dir: PathBuf,
}

impl CsvDirectorySource {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(SourceError::MissingDirectory { path: dir });
        }
        Ok(Self { dir })
    }

    pub fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{table}.csv"))
    }

    fn read_table<T: DeserializeOwned>(&self, table: &'static str, key: &str) -> Result<Vec<T>> {
        let path = self.table_path(table);
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_path(&path)
            .map_err(|err| SourceError::table(table, key, err))?;
        let headers: StringRecord = reader
            .headers()
            .map_err(|err| SourceError::table(table, key, err))?
            .iter()
            .map(normalize_header)
            .collect();
        reader.set_headers(headers);

        let mut rows = Vec::new();
        for record in reader.deserialize::<T>() {
            rows.push(record.map_err(|err| SourceError::table(table, key, err))?);
        }
        debug!(table, key, rows = rows.len(), path = %path.display(), "read table");
        Ok(rows)
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

impl ConfigSource for CsvDirectorySource {
    fn farm_info(&self, wfid: &str) -> Result<FarmInfo> {
        let rows: Vec<FarmInfo> = self.read_table("wind_farm_info", wfid)?;
        rows.into_iter()
            .find(|row| row.wfid == wfid)
            .ok_or_else(|| SourceError::FarmNotFound {
                wfid: wfid.to_string(),
            })
    }

    fn model_config(&self, cid: &str) -> Result<Option<FarmModelConfig>> {
        let rows: Vec<FarmModelConfig> = self.read_table("wind_farm_available", cid)?;
        Ok(rows.into_iter().find(|row| row.cid == cid))
    }

    fn method_ids(&self, cid: &str) -> Result<Vec<String>> {
        let rows: Vec<MethodConfig> = self.read_table("method_config", cid)?;
        Ok(rows
            .into_iter()
            .filter(|row| row.cid == cid)
            .map(|row| row.method_id)
            .collect())
    }

    fn method_config(&self, method_id: &str) -> Result<Option<MethodConfig>> {
        let rows: Vec<MethodConfig> = self.read_table("method_config", method_id)?;
        Ok(rows.into_iter().find(|row| row.method_id == method_id))
    }

    fn power_fix_configs(&self, cid: &str) -> Result<Vec<PowerFixConfig>> {
        let rows: Vec<PowerFixConfig> = self.read_table("power_fix_config", cid)?;
        Ok(rows.into_iter().filter(|row| row.cid == cid).collect())
    }

    fn nwp_sources(&self, wfid: &str) -> Result<Vec<String>> {
        let rows: Vec<NwpMonitorRow> = self.read_table("nwp_monitor", wfid)?;
        let sources: BTreeSet<String> = rows
            .into_iter()
            .filter(|row| row.wfid == wfid)
            .map(|row| row.source)
            .collect();
        Ok(sources.into_iter().collect())
    }

    fn third_party_sources(&self, wfid: &str) -> Result<Vec<String>> {
        let rows: Vec<ThirdPartyInfo> = self.read_table("thirdparty_info", wfid)?;
        Ok(rows
            .into_iter()
            .find(|row| row.wfid == wfid)
            .map(|row| row.enabled_sources())
            .unwrap_or_default())
    }

    fn farms(&self) -> Result<Vec<FarmInfo>> {
        self.read_table("wind_farm_info", "all farms")
    }
}
