//! Record types for wind-farm forecasting configuration tables.
//!
//! - [`FarmId`]: normalized wind-farm identifier
//! - [`FarmInfo`], [`FarmModelConfig`], [`MethodConfig`], [`PowerFixConfig`]:
//!   one struct per configuration table
//! - [`Value`]: the loosely-typed literal stored in blob columns

pub mod error;
pub mod ids;
pub mod records;
pub mod value;

pub use error::{ModelError, Result};
pub use ids::FarmId;
pub use records::{
    FarmInfo, FarmModelConfig, MethodConfig, NwpMonitorRow, PowerFixConfig, ThirdPartyInfo,
};
pub use value::Value;
