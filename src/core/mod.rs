pub mod etl;
pub mod loader;
pub mod render;

pub use crate::domain::model::{Dataset, Table, TeamReport, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
