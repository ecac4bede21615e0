use serde::Serialize;

use crate::finding::{Category, Finding};

/// Findings of one farm, in the order the checks ran.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FarmReport {
    pub wfid: String,
    pub cid: Option<String>,
    pub findings: Vec<Finding>,
}

impl FarmReport {
    pub fn new(wfid: impl Into<String>, cid: Option<String>) -> Self {
        Self {
            wfid: wfid.into(),
            cid,
            findings: Vec::new(),
        }
    }

    pub fn add(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn error_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_error()).count()
    }

    pub fn pass_count(&self) -> usize {
        self.findings.len() - self.error_count()
    }

    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(Finding::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_error())
    }

    /// Error count for one configuration area.
    pub fn error_count_in(&self, category: Category) -> usize {
        self.errors().filter(|f| f.category() == category).count()
    }
}

/// A farm that could not be checked.
#[derive(Debug, Clone, Serialize)]
pub struct FarmFailure {
    pub farm_id: String,
    pub message: String,
}

/// Outcome of checking several farms.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub farms: Vec<FarmReport>,
    pub failures: Vec<FarmFailure>,
}

impl BatchReport {
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty() || self.farms.iter().any(FarmReport::has_errors)
    }

    pub fn error_count(&self) -> usize {
        self.farms.iter().map(FarmReport::error_count).sum()
    }

    pub fn pass_count(&self) -> usize {
        self.farms.iter().map(FarmReport::pass_count).sum()
    }
}
