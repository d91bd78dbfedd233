use crate::core::{GenerationModel, Pipeline};
use crate::utils::error::Result;

/// Drives a pipeline through its phases, one after the other.
pub struct GeneratorEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> GeneratorEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Extract and transform only; nothing is written.
    pub async fn plan(&self) -> Result<GenerationModel> {
        tracing::info!("Reading input...");
        let table = self.pipeline.extract().await?;
        tracing::info!(
            "Read {} columns, {} rows",
            table.header.len(),
            table.rows.len()
        );

        tracing::info!("Building model...");
        let model = self.pipeline.transform(table).await?;
        tracing::info!(
            "Record type {} with {} fields, table {} with {} entries",
            model.record.name,
            model.record.fields.len(),
            model.table.name,
            model.table.entries.len()
        );

        Ok(model)
    }

    pub async fn run(&self) -> Result<String> {
        let model = self.plan().await?;

        tracing::info!("Rendering source...");
        let output_path = self.pipeline.load(model).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
