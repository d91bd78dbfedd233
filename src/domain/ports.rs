use crate::domain::model::{GenerationModel, Table};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_file(&self) -> &str;
    fn delimiter(&self) -> u8;
    fn key_column(&self) -> &str;
    fn key_type(&self) -> &str;
    fn record_name(&self) -> &str;
    fn table_name(&self) -> &str;
    fn output_dir(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Table>;
    async fn transform(&self, table: Table) -> Result<GenerationModel>;
    async fn load(&self, model: GenerationModel) -> Result<String>;
}
