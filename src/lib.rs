pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "web")]
pub mod web;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliConfig, LocalStorage};

pub use crate::config::ApiConfig;
pub use crate::core::engine::SearchEngine;
pub use crate::core::pipeline::SearchPipeline;
pub use crate::core::places::PlacesClient;
pub use crate::utils::error::{FinderError, Result};
