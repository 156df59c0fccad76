use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Classification tag carried by a feed line's second column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryCode {
    #[default]
    None,
    Phishing,
    Malware,
}

impl CategoryCode {
    pub fn code(self) -> u8 {
        match self {
            CategoryCode::None => 0,
            CategoryCode::Phishing => 1,
            CategoryCode::Malware => 2,
        }
    }
}

// Downstream consumers expect the bare integer, not the variant name.
impl Serialize for CategoryCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// One source line split on its first tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEntry<'a> {
    pub first_field: &'a str,
    pub second_field: Option<&'a str>,
}

impl<'a> RawEntry<'a> {
    /// Surrounding whitespace (including a trailing `\r`) is trimmed first.
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        match line.split_once('\t') {
            Some((first, rest)) => {
                // Only the second column matters; anything after a further tab is ignored.
                let second = rest.split('\t').next().unwrap_or_default();
                Self {
                    first_field: first,
                    second_field: Some(second),
                }
            }
            None => Self {
                first_field: line,
                second_field: None,
            },
        }
    }
}

/// A single entry of the output dataset. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OutputRecord {
    pub u: String,
    pub m: CategoryCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RejectReason {
    Empty,
    EncodedColon,
    MalformedScheme,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RejectReason::Empty => "empty",
            RejectReason::EncodedColon => "encoded-colon",
            RejectReason::MalformedScheme => "malformed-scheme",
        };
        f.write_str(label)
    }
}

/// What happened to one raw line during the single transform pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Kept(OutputRecord),
    Rejected(RejectReason),
    Failed { input: String, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total_lines: usize,
    pub kept: usize,
    pub rejected: BTreeMap<RejectReason, usize>,
    pub failed: usize,
    pub duplicates_removed: usize,
    /// Records in the output file, after deduplication.
    pub written: usize,
}

impl RunSummary {
    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<OutputRecord>,
    pub summary: RunSummary,
}
