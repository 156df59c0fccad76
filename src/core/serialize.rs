use crate::domain::model::OutputRecord;
use crate::utils::error::Result;

/// Renders the dataset as compact JSON with every `/` written as `\/`.
///
/// Consumers embed the file in HTML and compare it byte for byte, so the
/// escaping is applied to the whole text, not only to string values.
pub fn serialize(records: &[OutputRecord]) -> Result<String> {
    let json = serde_json::to_string(records)?;
    Ok(json.replace('/', "\\/"))
}
