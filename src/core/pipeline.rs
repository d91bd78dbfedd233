use crate::core::builder::ModelBuilder;
use crate::core::reader::parse_table;
use crate::core::renderer::{output_file_name, render_source};
use crate::core::{ConfigProvider, GenerationModel, Pipeline, Storage, Table};
use crate::utils::error::Result;
use std::path::Path;

/// Reader, builder and renderer wired to a storage backend.
pub struct CodegenPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CodegenPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn output_path(&self, package: &str) -> String {
        Path::new(self.config.output_dir())
            .join(output_file_name(package))
            .to_string_lossy()
            .into_owned()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CodegenPipeline<S, C> {
    async fn extract(&self) -> Result<Table> {
        tracing::debug!("Reading {}", self.config.input_file());
        let data = self.storage.read_file(self.config.input_file()).await?;
        parse_table(&data, self.config.delimiter())
    }

    async fn transform(&self, table: Table) -> Result<GenerationModel> {
        let mut builder = ModelBuilder::from_header(
            &table.header,
            self.config.key_column(),
            self.config.key_type(),
            self.config.record_name(),
            self.config.table_name(),
        )?;
        builder.push_rows(&table.rows)?;
        Ok(builder.finish())
    }

    async fn load(&self, model: GenerationModel) -> Result<String> {
        let source = render_source(&model)?;
        let output_path = self.output_path(&model.package);

        tracing::debug!(
            "Rendered {} bytes for package {}",
            source.len(),
            model.package
        );
        self.storage
            .write_file(&output_path, source.as_bytes())
            .await?;

        Ok(output_path)
    }
}
