pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_distinct_paths, validate_path, Validate};
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

pub const DEFAULT_SOURCE: &str = "test-source/malwaredomains.txt";
pub const DEFAULT_DESTINATION: &str = "release-json/malwaredomains.withmeta.json";

/// The resolved settings a conversion run is driven by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub strict: bool,
    pub dedupe: bool,
    pub monitor: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE, DEFAULT_DESTINATION)
    }
}

impl ConvertConfig {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            strict: false,
            dedupe: false,
            monitor: false,
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    /// Layers file settings over the current values.
    pub fn merge_toml(mut self, file: &TomlConfig) -> Self {
        if let Some(source) = &file.paths.source {
            self.source = PathBuf::from(source);
        }
        if let Some(destination) = &file.paths.destination {
            self.destination = PathBuf::from(destination);
        }
        self.strict = file.options.strict.unwrap_or(self.strict);
        self.dedupe = file.options.dedupe.unwrap_or(self.dedupe);
        self.monitor = file.options.monitor.unwrap_or(self.monitor);
        self
    }
}

impl Validate for ConvertConfig {
    fn validate(&self) -> Result<()> {
        let source = self.source.to_string_lossy();
        let destination = self.destination.to_string_lossy();
        validate_path("source", &source)?;
        validate_path("destination", &destination)?;
        validate_distinct_paths(&source, &destination)
    }
}

impl ConfigProvider for ConvertConfig {
    fn source_path(&self) -> &Path {
        &self.source
    }

    fn destination_path(&self) -> &Path {
        &self.destination
    }

    fn strict(&self) -> bool {
        self.strict
    }

    fn dedupe(&self) -> bool {
        self.dedupe
    }
}

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use super::{ConvertConfig, TomlConfig};
    use crate::utils::error::Result;
    use crate::utils::validation::Validate;
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "threatfeed-etl")]
    #[command(about = "Convert a tab-delimited threat feed into a normalized JSON dataset")]
    pub struct CliConfig {
        #[arg(short = 's', long = "source", help = "Feed file to read")]
        pub source: Option<String>,

        #[arg(short = 'd', long = "destination", help = "JSON file to write")]
        pub destination: Option<String>,

        #[arg(short = 'c', long, help = "TOML config file")]
        pub config: Option<String>,

        #[arg(long, help = "Abort on the first entry that cannot be canonicalized")]
        pub strict: bool,

        #[arg(long, help = "Drop records whose URL was already emitted")]
        pub dedupe: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log timing and memory usage")]
        pub monitor: bool,
    }

    impl CliConfig {
        /// Defaults, then the TOML file, then explicit flags.
        pub fn resolve(&self) -> Result<ConvertConfig> {
            let mut resolved = ConvertConfig::default();

            if let Some(path) = &self.config {
                tracing::debug!("Loading config file: {}", path);
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                resolved = resolved.merge_toml(&file);
            }

            if let Some(source) = &self.source {
                resolved.source = source.into();
            }
            if let Some(destination) = &self.destination {
                resolved.destination = destination.into();
            }
            resolved.strict |= self.strict;
            resolved.dedupe |= self.dedupe;
            resolved.monitor |= self.monitor;

            resolved.validate()?;
            Ok(resolved)
        }
    }
}
