use crate::core::classify::classify;
use crate::core::filter::{check, FilterVerdict};
use crate::domain::model::{LineOutcome, OutputRecord, RawEntry};
use crate::domain::ports::Canonicalizer;
use crate::utils::error::EtlError;

/// Classifies, filters and canonicalizes one raw line.
///
/// The category and the URL are decided together, so a dropped line can
/// never lend its category to a neighbouring record.
pub fn process_line<C: Canonicalizer + ?Sized>(line: &str, canonicalizer: &C) -> LineOutcome {
    let entry = RawEntry::parse(line);
    let category = classify(entry.second_field);

    if let FilterVerdict::Rejected(reason) = check(entry.first_field) {
        tracing::debug!("Dropping {:?} ({})", entry.first_field, reason);
        return LineOutcome::Rejected(reason);
    }

    match canonicalizer.canonicalize(entry.first_field) {
        Ok(url) => LineOutcome::Kept(OutputRecord { u: url, m: category }),
        Err(EtlError::CanonicalizeError { input, reason }) => LineOutcome::Failed { input, reason },
        Err(other) => LineOutcome::Failed {
            input: entry.first_field.to_string(),
            reason: other.to_string(),
        },
    }
}

/// Collects the records of the kept lines, in source order.
pub fn build_records(outcomes: Vec<LineOutcome>) -> Vec<OutputRecord> {
    outcomes
        .into_iter()
        .filter_map(|outcome| match outcome {
            LineOutcome::Kept(record) => Some(record),
            LineOutcome::Rejected(_) | LineOutcome::Failed { .. } => None,
        })
        .collect()
}
