use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Drives a pipeline through extract, transform and load.
pub struct AnalysisEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> AnalysisEngine<P> {
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
        tracing::info!("Starting chat analysis...");
        self.monitor.log_stats("Start");

        // Extract
        tracing::info!("Reading transcript...");
        let rows = self.pipeline.extract().await?;
        tracing::info!("Read {} rows", rows.len());
        self.monitor.log_stats("Extract");

        // Transform
        tracing::info!("Analyzing rows...");
        let report = self.pipeline.transform(rows).await?;
        tracing::info!(
            "Analyzed {} conversations, {} messages",
            report.analysis.conversation_count(),
            report.analysis.total_messages()
        );
        self.monitor.log_stats("Transform");

        // Load
        tracing::info!("Writing exports...");
        let output_path = self.pipeline.load(report).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load");

        self.monitor.log_final_stats();
        Ok(output_path)
    }
}
