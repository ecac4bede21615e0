use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use comfy_table::{Cell, Table};
use serde::Serialize;
use tracing::{info, info_span};

use wfcheck_model::FarmInfo;
use wfcheck_source::{ConfigSource, CsvDirectorySource};
use wfcheck_validate::{
    BatchReport, FarmSelection, RuleSet, check_farms, is_selected, select_active_farms,
};

use crate::cli::{CheckArgs, FarmsArgs};
use crate::config::Settings;
use crate::summary::{apply_table_style, dim_cell, header_cell};

pub fn run_check(args: &CheckArgs, settings: &Settings) -> Result<BatchReport> {
    let data_dir = settings.data_dir(args.data_dir.as_deref());
    let source = open_source(&data_dir)?;
    let farm_ids = resolve_farm_ids(args, &source, &settings.selection)?;

    let span = info_span!("check", data_dir = %data_dir.display(), farms = farm_ids.len());
    let _guard = span.enter();
    let start = Instant::now();
    let batch = check_farms(&source, &settings.rules, &farm_ids);
    info!(
        farms = batch.farms.len(),
        failures = batch.failures.len(),
        passed = batch.pass_count(),
        errors = batch.error_count(),
        duration_ms = start.elapsed().as_millis() as u64,
        "check complete"
    );

    if let Some(path) = &args.report {
        write_report(&batch, path)?;
        info!(path = %path.display(), "report written");
    }
    Ok(batch)
}

/// Explicit ids first, then active farms not already listed.
fn resolve_farm_ids(
    args: &CheckArgs,
    source: &dyn ConfigSource,
    selection: &FarmSelection,
) -> Result<Vec<String>> {
    let mut farm_ids = args.farm_ids.clone();
    if args.active {
        let active = select_active_farms(source, selection).context("select active farms")?;
        info!(count = active.len(), "active farms selected");
        for wfid in active {
            if !farm_ids.contains(&wfid) {
                farm_ids.push(wfid);
            }
        }
    }
    if farm_ids.is_empty() {
        bail!("no farms to check: pass FARM_ID arguments or --active");
    }
    Ok(farm_ids)
}

pub fn write_report(batch: &BatchReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create report directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(batch).context("serialize report")?;
    fs::write(path, json).with_context(|| format!("write report {}", path.display()))
}

pub fn run_farms(args: &FarmsArgs, settings: &Settings) -> Result<()> {
    let data_dir = settings.data_dir(args.data_dir.as_deref());
    let source = open_source(&data_dir)?;
    let mut farms = source.farms().context("load farms")?;
    if args.active {
        farms.retain(|farm| is_selected(farm, &settings.selection));
    }
    farms.sort_by(|a, b| a.wfid.cmp(&b.wfid));
    println!("{}", farms_table(&farms, &settings.selection));
    Ok(())
}

pub fn farms_table(farms: &[FarmInfo], selection: &FarmSelection) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Farm"),
        header_cell("CID"),
        header_cell("Name"),
        header_cell("Type"),
        header_cell("Capacity"),
        header_cell("State"),
        header_cell("Active"),
    ]);
    apply_table_style(&mut table);
    for farm in farms {
        table.add_row(vec![
            Cell::new(&farm.wfid),
            optional_cell(farm.cid.as_deref()),
            optional_cell(farm.name.as_deref()),
            optional_cell(farm.farm_type.as_deref()),
            farm.powercap.map_or_else(|| dim_cell("-"), Cell::new),
            optional_cell(farm.inspection_state.as_deref()),
            if is_selected(farm, selection) {
                Cell::new("✓")
            } else {
                dim_cell("-")
            },
        ]);
    }
    table
}

#[derive(Serialize)]
struct EffectiveRules<'a> {
    rules: &'a RuleSet,
    selection: &'a FarmSelection,
}

pub fn run_rules(settings: &Settings) -> Result<()> {
    print!("{}", rules_toml(settings)?);
    Ok(())
}

pub fn rules_toml(settings: &Settings) -> Result<String> {
    let effective = EffectiveRules {
        rules: &settings.rules,
        selection: &settings.selection,
    };
    toml::to_string_pretty(&effective).context("serialize rules")
}

fn open_source(data_dir: &Path) -> Result<CsvDirectorySource> {
    CsvDirectorySource::open(data_dir)
        .with_context(|| format!("open data directory {}", data_dir.display()))
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(text) if !text.is_empty() => Cell::new(text),
        _ => dim_cell("-"),
    }
}
