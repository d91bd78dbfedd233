pub mod builder;
pub mod engine;
pub mod pipeline;
pub mod reader;
pub mod renderer;

pub use crate::domain::model::{GenerationModel, Table};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
