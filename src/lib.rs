pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;
pub use crate::config::ServiceConfig;

#[cfg(feature = "aws")]
pub use crate::adapters::aws::{IntakeConfig, Route53ZoneDirectory, S3IntakeEngine};
pub use crate::adapters::local::{DryRunEngine, StaticZoneDirectory};

pub use crate::core::builder::StackBuilder;
pub use crate::core::deploy::DeployEngine;
pub use crate::utils::error::{Result, StackError};
