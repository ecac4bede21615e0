//! Runs every check for one farm and logs each finding as it is produced.

use tracing::{debug, info, info_span, warn};

use wfcheck_model::{FarmId, FarmInfo};
use wfcheck_source::ConfigSource;

use crate::checks::{manual_model, power_fix, region, weather};
use crate::error::Result;
use crate::finding::{Finding, FindingKind, Status};
use crate::report::FarmReport;
use crate::rules::RuleSet;

const FARM_SECTION: &str = "farm-info";
const MODEL_SECTION: &str = "farm-list/edit";
const POWER_FIX_SECTION: &str = "post-processing";

/// Configuration checks for a single wind farm.
///
/// Construction loads the farm record; each `check_*` method then queries
/// the tables it needs and appends findings to the farm's report.
pub struct FarmChecker<'a, S: ConfigSource + ?Sized> {
    source: &'a S,
    rules: &'a RuleSet,
    farm: FarmInfo,
    report: FarmReport,
}

impl<'a, S: ConfigSource + ?Sized> FarmChecker<'a, S> {
    /// Accepts a wfid or a cid-style id (`GS_320908`).
    pub fn new(source: &'a S, rules: &'a RuleSet, farm_id: &str) -> Result<Self> {
        let wfid = FarmId::parse(farm_id)?;
        let farm = source.farm_info(wfid.as_str())?;
        debug!(wfid = %wfid, cid = ?farm.cid, powercap = ?farm.powercap, "loaded farm info");
        let report = FarmReport::new(wfid.as_str(), farm.cid.clone());
        Ok(Self {
            source,
            rules,
            farm,
            report,
        })
    }

    pub fn wfid(&self) -> &str {
        &self.report.wfid
    }

    pub fn farm(&self) -> &FarmInfo {
        &self.farm
    }

    pub fn findings(&self) -> &[Finding] {
        &self.report.findings
    }

    pub fn into_report(self) -> FarmReport {
        self.report
    }

    fn cid(&self) -> &str {
        self.farm.cid_or_empty()
    }

    /// Run every check. A farm without a usable cid gets a single finding.
    pub fn check_all(mut self) -> Result<FarmReport> {
        let span = info_span!("farm", wfid = %self.wfid());
        let _guard = span.enter();

        if !self.farm.has_valid_cid() {
            let cid = self.cid().to_string();
            self.record(FARM_SECTION, FindingKind::InvalidCid { cid });
            return Ok(self.report);
        }
        self.check_model_config()?;
        self.check_method_config()?;
        self.check_power_fix_config()?;
        Ok(self.report)
    }

    /// Region capacity and manual model of the farm-level model settings.
    pub fn check_model_config(&mut self) -> Result<()> {
        let Some(config) = self.source.model_config(self.cid())? else {
            self.record(MODEL_SECTION, FindingKind::ModelConfigMissing);
            return Ok(());
        };

        let region = region::check(
            config.region.as_deref(),
            self.farm.powercap,
            self.rules.capacity_tolerance,
        );
        self.record(MODEL_SECTION, region);

        let method_ids = self.source.method_ids(self.cid())?;
        let manual = manual_model::check(config.manual_model.as_deref(), &method_ids);
        self.record(MODEL_SECTION, manual);
        Ok(())
    }

    /// Weather sources referenced by each forecasting method.
    pub fn check_method_config(&mut self) -> Result<()> {
        let mut monitored = self.source.nwp_sources(self.wfid())?;
        monitored.extend(self.source.third_party_sources(self.wfid())?);
        let farm_sources = self.rules.expand_sources(&monitored);
        let allowed = self.rules.allowed_sources();
        debug!(sources = ?farm_sources, "farm weather sources");

        for method in self.source.method_ids(self.cid())? {
            let section = format!("model-list/{method}/model-config");
            let kind = match self.source.method_config(&method)? {
                Some(config) => weather::check(config.region.as_deref(), &farm_sources, &allowed),
                None => FindingKind::MethodConfigMissing { method },
            };
            self.record(&section, kind);
        }
        Ok(())
    }

    /// Names and parameters of the post-processing functions.
    pub fn check_power_fix_config(&mut self) -> Result<()> {
        let rows = self.source.power_fix_configs(self.cid())?;
        if rows.is_empty() {
            self.record(POWER_FIX_SECTION, FindingKind::NoPowerFix);
            return Ok(());
        }

        for row in rows {
            let section = format!("{POWER_FIX_SECTION}/{}/{}", row.id, row.func_name);
            if !self.rules.is_known_function(&row.func_name) {
                let name = row.func_name.clone();
                self.record(&section, FindingKind::UnknownPowerFixFunction { name });
                continue;
            }
            for kind in power_fix::check(&row) {
                self.record(&section, kind);
            }
        }
        Ok(())
    }

    fn record(&mut self, section: &str, kind: FindingKind) {
        let finding = Finding::new(self.wfid(), section, kind);
        log_finding(&finding);
        self.report.add(finding);
    }
}

fn log_finding(finding: &Finding) {
    let category = finding.category().label();
    match finding.status() {
        Status::Pass => info!(
            wfid = %finding.wfid,
            section = %finding.section,
            category,
            "{finding}"
        ),
        Status::Error => warn!(
            wfid = %finding.wfid,
            section = %finding.section,
            category,
            "{finding}"
        ),
    }
}
