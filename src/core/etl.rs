use crate::core::Pipeline;
use crate::domain::model::RunSummary;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

#[derive(Debug, Clone)]
pub struct EtlReport {
    pub output_path: String,
    pub summary: RunSummary,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn run(&self) -> Result<EtlReport> {
        let started = Instant::now();
        tracing::info!("Starting feed conversion");
        self.monitor.log_stats("Start");

        let phase = Instant::now();
        let raw_data = self.pipeline.extract()?;
        tracing::info!("Extracted {} bytes in {:?}", raw_data.len(), phase.elapsed());
        self.monitor.log_stats("Extract");

        let phase = Instant::now();
        let transformed = self.pipeline.transform(raw_data)?;
        let summary = transformed.summary.clone();
        tracing::info!(
            "Transformed {} lines into {} records in {:?} (rejected: {}, failed: {}, duplicates: {})",
            summary.total_lines,
            transformed.records.len(),
            phase.elapsed(),
            summary.rejected_total(),
            summary.failed,
            summary.duplicates_removed
        );
        for (reason, count) in &summary.rejected {
            tracing::debug!("  {}: {}", reason, count);
        }
        self.monitor.log_stats("Transform");

        let phase = Instant::now();
        let output_path = self.pipeline.load(transformed)?;
        tracing::info!("Loaded into {} in {:?}", output_path, phase.elapsed());

        tracing::info!("Execution time: {:?}", started.elapsed());
        self.monitor.log_final_stats();

        Ok(EtlReport {
            output_path,
            summary,
        })
    }
}
