use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting report run");

        let dataset = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} games and {} player stat rows",
            dataset.games.len(),
            dataset.player_stats.len()
        );
        self.monitor.log_stats("extract");

        let result = self.pipeline.transform(dataset).await?;
        tracing::info!(
            "Built report for {}: {} games, {} players",
            result.report.team,
            result.report.games.len(),
            result.report.players.len()
        );
        self.monitor.log_stats("transform");

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("load");
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
