use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid farm id: '{0}'")]
    InvalidFarmId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
