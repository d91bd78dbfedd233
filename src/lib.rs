pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig, GeneratorConfig};
pub use crate::core::{engine::GeneratorEngine, pipeline::CodegenPipeline};
pub use crate::domain::model::GenerationModel;
pub use crate::utils::error::{GenError, Result};
