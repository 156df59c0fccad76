pub mod canonical;
pub mod classify;
pub mod etl;
pub mod filter;
pub mod pipeline;
pub mod record;
pub mod serialize;

pub use crate::domain::model::{OutputRecord, TransformResult};
pub use crate::domain::ports::{Canonicalizer, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
