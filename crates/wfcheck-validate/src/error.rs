use thiserror::Error;

use wfcheck_model::ModelError;
use wfcheck_source::SourceError;

/// Failures that stop a farm from being checked at all.
///
/// Bad configuration values never surface here; they become findings.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    InvalidId(#[from] ModelError),

    #[error(transparent)]
    Source(#[from] SourceError),
}

pub type Result<T> = std::result::Result<T, CheckError>;
