pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, ConvertConfig};

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::{
    canonical::UrlCanonicalizer,
    etl::{EtlEngine, EtlReport},
    pipeline::FeedPipeline,
};
pub use domain::model::{CategoryCode, OutputRecord, RejectReason};
pub use utils::error::{EtlError, Result};
