use crate::domain::model::TransformResult;
use crate::utils::error::Result;
use std::path::Path;

pub trait Storage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn source_path(&self) -> &Path;
    fn destination_path(&self) -> &Path;
    /// Abort on the first entry the canonicalizer cannot handle.
    fn strict(&self) -> bool;
    fn dedupe(&self) -> bool;
}

/// Turns a raw feed field into its scheme-less canonical form.
pub trait Canonicalizer {
    fn canonicalize(&self, raw: &str) -> Result<String>;
}

pub trait Pipeline {
    fn extract(&self) -> Result<String>;
    fn transform(&self, data: String) -> Result<TransformResult>;
    fn load(&self, result: TransformResult) -> Result<String>;
}
