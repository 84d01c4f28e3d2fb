pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::pipelines::ReportPipeline;
pub use config::{cli::LocalStorage, toml_config::ReportConfig};
pub use core::etl::ReportEngine;
pub use domain::model::{DateRange, GameRecord, OutputFormat, PlayerStatRecord, TeamReport};
pub use utils::error::{Result, StatsError};
