pub mod checker;
pub mod engine;
pub mod export;
pub mod normalize;
pub mod pipeline;
pub mod places;
pub mod query;

pub use crate::domain::model::{ListingRecord, RawListing, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
