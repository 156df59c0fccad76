use crate::core::record::{build_records, process_line};
use crate::core::serialize::serialize;
use crate::core::{Canonicalizer, ConfigProvider, Pipeline, Storage, TransformResult};
use crate::domain::model::{LineOutcome, RunSummary};
use crate::utils::dedupe::dedupe_by_key;
use crate::utils::error::{EtlError, Result};

/// Feed-to-JSON conversion: read the feed, turn every line into an
/// outcome, write the surviving records as escaped JSON.
pub struct FeedPipeline<S: Storage, C: ConfigProvider, K: Canonicalizer> {
    storage: S,
    config: C,
    canonicalizer: K,
}

impl<S: Storage, C: ConfigProvider, K: Canonicalizer> FeedPipeline<S, C, K> {
    pub fn new(storage: S, config: C, canonicalizer: K) -> Self {
        Self {
            storage,
            config,
            canonicalizer,
        }
    }
}

impl<S: Storage, C: ConfigProvider, K: Canonicalizer> Pipeline for FeedPipeline<S, C, K> {
    fn extract(&self) -> Result<String> {
        let source = self.config.source_path();
        tracing::debug!("Reading feed from: {}", source.display());

        let bytes = self.storage.read_file(source)?;
        tracing::debug!("Read {} bytes", bytes.len());

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn transform(&self, data: String) -> Result<TransformResult> {
        let mut summary = RunSummary::default();
        let mut outcomes = Vec::new();

        for (index, line) in data.lines().enumerate() {
            summary.total_lines += 1;
            let outcome = process_line(line, &self.canonicalizer);

            match &outcome {
                LineOutcome::Kept(_) => summary.kept += 1,
                LineOutcome::Rejected(reason) => {
                    *summary.rejected.entry(*reason).or_insert(0) += 1;
                }
                LineOutcome::Failed { input, reason } => {
                    if self.config.strict() {
                        return Err(EtlError::CanonicalizeError {
                            input: input.clone(),
                            reason: format!("line {}: {}", index + 1, reason),
                        });
                    }
                    tracing::warn!(
                        "Skipping line {}: cannot canonicalize {:?} ({})",
                        index + 1,
                        input,
                        reason
                    );
                    summary.failed += 1;
                }
            }
            outcomes.push(outcome);
        }

        let mut records = build_records(outcomes);

        if self.config.dedupe() {
            let before = records.len();
            records = dedupe_by_key(records, |record| record.u.clone());
            summary.duplicates_removed = before - records.len();
            tracing::debug!("Removed {} duplicate URLs", summary.duplicates_removed);
        }

        summary.written = records.len();
        Ok(TransformResult { records, summary })
    }

    fn load(&self, result: TransformResult) -> Result<String> {
        let destination = self.config.destination_path();
        let json = serialize(&result.records)?;

        tracing::debug!(
            "Writing {} records ({} bytes) to {}",
            result.records.len(),
            json.len(),
            destination.display()
        );
        self.storage.write_file(destination, json.as_bytes())?;

        Ok(destination.display().to_string())
    }
}
