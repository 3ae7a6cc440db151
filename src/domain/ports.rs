use crate::domain::model::{AnalysisReport, ChatRow, OutputFormat};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    /// Size in bytes, available without reading the contents.
    fn file_size(&self, path: &str) -> impl std::future::Future<Output = Result<u64>> + Send;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Transcript location; `-` reads pasted text from stdin.
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> Vec<OutputFormat>;
    /// Archive name when exports should be bundled into a zip.
    fn zip_filename(&self) -> Option<&str>;
    fn max_input_bytes(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<ChatRow>>;
    async fn transform(&self, rows: Vec<ChatRow>) -> Result<AnalysisReport>;
    async fn load(&self, report: AnalysisReport) -> Result<String>;
}
