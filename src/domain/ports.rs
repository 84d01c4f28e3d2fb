use crate::domain::model::{Dataset, DateRange, OutputFormat, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn games_file(&self) -> &str;
    fn player_stats_file(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn team(&self) -> &str;
    fn player(&self) -> Option<&str>;
    fn date_range(&self) -> DateRange;
    fn output_formats(&self) -> &[OutputFormat];
    fn compress(&self) -> bool;

    fn archive_name(&self) -> &str {
        "report.zip"
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Dataset>;
    async fn transform(&self, data: Dataset) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
