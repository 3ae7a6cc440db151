use crate::core::analysis;
use crate::core::export;
use crate::core::parser::{self, TranscriptParser, PASTED_SOURCE_NAME};
use crate::core::{AnalysisReport, ChatRow, ConfigProvider, Pipeline, Storage};
use crate::utils::error::{AnalyzerError, Result};
use chrono::Utc;
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Input path that reads pasted transcript text from stdin.
pub const STDIN_INPUT: &str = "-";

/// CSV transcript in, JSON/CSV analysis exports out.
pub struct AnalysisPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) parser: TranscriptParser,
}

impl<S: Storage, C: ConfigProvider> AnalysisPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let parser = TranscriptParser::new(config.max_input_bytes());
        Self {
            storage,
            config,
            parser,
        }
    }

    /// Name recorded on the report: the input file name, or the pasted-data placeholder.
    pub fn source_name(&self) -> String {
        let input = self.config.input_path();
        if input == STDIN_INPUT {
            return PASTED_SOURCE_NAME.to_string();
        }
        Path::new(input)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(input)
            .to_string()
    }

    async fn read_source(&self) -> Result<Vec<u8>> {
        let input = self.config.input_path();
        if input == STDIN_INPUT {
            tracing::debug!("Reading pasted transcript from stdin");
            let mut data = Vec::new();
            // 多讀一個位元組，讓解析器能判斷是否超過上限
            let limit = self.parser.max_input_bytes() as u64 + 1;
            tokio::io::stdin().take(limit).read_to_end(&mut data).await?;
            return Ok(data);
        }

        parser::validate_source_name(input)?;

        let limit = self.parser.max_input_bytes();
        let size = self.storage.file_size(input).await?;
        if size > limit as u64 {
            return Err(AnalyzerError::InputTooLarge {
                size: usize::try_from(size).unwrap_or(usize::MAX),
                limit,
            });
        }

        tracing::debug!("Reading transcript file: {} ({} bytes)", input, size);
        self.storage.read_file(input).await
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for AnalysisPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<ChatRow>> {
        tracing::info!("📥 Extracting transcript from: {}", self.config.input_path());

        let data = self.read_source().await?;
        tracing::debug!("Transcript size: {} bytes", data.len());

        let rows = self.parser.parse_bytes(&data)?;
        if rows.is_empty() {
            tracing::warn!("Transcript has no rows; the analysis will be empty");
        }
        Ok(rows)
    }

    async fn transform(&self, rows: Vec<ChatRow>) -> Result<AnalysisReport> {
        let source_name = self.source_name();
        tracing::debug!("Analyzing {} rows from {}", rows.len(), source_name);

        // 各分析 pass 為純 CPU 計算，在 blocking pool 上並行
        let analysis = analysis::analyze_concurrently(rows).await?;

        Ok(AnalysisReport {
            source_name,
            generated_at: Utc::now(),
            analysis,
        })
    }

    async fn load(&self, report: AnalysisReport) -> Result<String> {
        let formats = self.config.output_formats();
        let files = export::render(&report, &formats)?;
        let output_dir = Path::new(self.config.output_path());

        if let Some(zip_name) = self.config.zip_filename() {
            tracing::debug!("Creating ZIP file with {} files", files.len());
            let zip_data = export::bundle_zip(&files)?;
            let zip_path = output_dir.join(zip_name).to_string_lossy().into_owned();

            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(&zip_path, &zip_data).await?;
            return Ok(zip_path);
        }

        let mut written = Vec::with_capacity(files.len());
        for (name, data) in &files {
            let path = output_dir.join(name).to_string_lossy().into_owned();
            tracing::debug!("Writing {} ({} bytes)", path, data.len());
            self.storage.write_file(&path, data).await?;
            written.push(path);
        }
        Ok(written.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::OutputFormat;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        reads: Arc<Mutex<Vec<String>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
                reads: Arc::new(Mutex::new(Vec::new())),
            }
        }

        async fn put_file(&self, path: &str, data: &str) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.as_bytes().to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    fn not_found(path: &str) -> AnalyzerError {
        AnalyzerError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path),
        ))
    }

    impl Storage for MockStorage {
        async fn file_size(&self, path: &str) -> Result<u64> {
            let files = self.files.lock().await;
            files
                .get(path)
                .map(|data| data.len() as u64)
                .ok_or_else(|| not_found(path))
        }

        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.reads.lock().await.push(path.to_string());
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| not_found(path))
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        input_path: String,
        output_path: String,
        output_formats: Vec<OutputFormat>,
        zip_filename: Option<String>,
        max_input_bytes: usize,
    }

    impl MockConfig {
        fn new(input_path: &str) -> Self {
            Self {
                input_path: input_path.to_string(),
                output_path: "test_output".to_string(),
                output_formats: OutputFormat::ALL.to_vec(),
                zip_filename: None,
                max_input_bytes: 1024,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            &self.input_path
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_formats(&self) -> Vec<OutputFormat> {
            self.output_formats.clone()
        }

        fn zip_filename(&self) -> Option<&str> {
            self.zip_filename.as_deref()
        }

        fn max_input_bytes(&self) -> usize {
            self.max_input_bytes
        }
    }

    const TRANSCRIPT: &str = "ChatLogID,UserType,MessageText\n\
                              1,visitor,This is broken and wrong\n\
                              1,agent,Thanks for reporting\n";

    #[tokio::test]
    async fn test_extract_reads_rows_from_storage() {
        let storage = MockStorage::new();
        storage.put_file("chats.csv", TRANSCRIPT).await;
        let pipeline = AnalysisPipeline::new(storage, MockConfig::new("chats.csv"));

        let rows = pipeline.extract().await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].role(), "agent");
    }

    #[tokio::test]
    async fn test_extract_rejects_non_csv_source() {
        let storage = MockStorage::new();
        storage.put_file("chats.txt", TRANSCRIPT).await;
        let pipeline = AnalysisPipeline::new(storage, MockConfig::new("chats.txt"));

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, AnalyzerError::UnsupportedFileType { .. }));
    }

    #[tokio::test]
    async fn test_extract_enforces_size_limit() {
        let storage = MockStorage::new();
        storage.put_file("chats.csv", TRANSCRIPT).await;
        let mut config = MockConfig::new("chats.csv");
        config.max_input_bytes = 10;
        let pipeline = AnalysisPipeline::new(storage, config);

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, AnalyzerError::InputTooLarge { limit: 10, .. }));
    }

    #[tokio::test]
    async fn test_oversized_file_is_rejected_before_reading() {
        let storage = MockStorage::new();
        storage.put_file("chats.csv", TRANSCRIPT).await;
        let mut config = MockConfig::new("chats.csv");
        config.max_input_bytes = 10;
        let pipeline = AnalysisPipeline::new(storage.clone(), config);

        let err = pipeline.extract().await.unwrap_err();

        assert!(matches!(
            err,
            AnalyzerError::InputTooLarge { size, limit: 10 } if size == TRANSCRIPT.len()
        ));
        assert!(storage.reads.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_file_within_limit_is_read_once() {
        let storage = MockStorage::new();
        storage.put_file("chats.csv", TRANSCRIPT).await;
        let pipeline = AnalysisPipeline::new(storage.clone(), MockConfig::new("chats.csv"));

        pipeline.extract().await.unwrap();

        assert_eq!(*storage.reads.lock().await, vec!["chats.csv".to_string()]);
    }

    #[tokio::test]
    async fn test_transform_stamps_source_name() {
        let storage = MockStorage::new();
        let pipeline = AnalysisPipeline::new(storage, MockConfig::new("data/chats.csv"));
        let rows = pipeline.parser.parse_str(TRANSCRIPT).unwrap();

        let report = pipeline.transform(rows).await.unwrap();

        assert_eq!(report.source_name, "chats.csv");
        assert_eq!(report.analysis.conversation_count(), 1);
        assert_eq!(report.analysis.top_issues()[0].issue, "broken");
    }

    #[test]
    fn test_stdin_source_name() {
        let pipeline = AnalysisPipeline::new(MockStorage::new(), MockConfig::new(STDIN_INPUT));
        assert_eq!(pipeline.source_name(), "pasted-data.csv");
    }

    #[tokio::test]
    async fn test_load_writes_each_format() {
        let storage = MockStorage::new();
        storage.put_file("chats.csv", TRANSCRIPT).await;
        let pipeline = AnalysisPipeline::new(storage.clone(), MockConfig::new("chats.csv"));

        let rows = pipeline.extract().await.unwrap();
        let report = pipeline.transform(rows).await.unwrap();
        let output = pipeline.load(report).await.unwrap();

        assert_eq!(
            output,
            "test_output/chat-analysis.json, test_output/chat-analysis.csv"
        );
        let summary = storage.get_file("test_output/chat-analysis.csv").await.unwrap();
        let summary = String::from_utf8(summary).unwrap();
        assert!(summary.starts_with("Category,Value\nTotal Conversations,1\n"));
        assert!(storage.get_file("test_output/chat-analysis.json").await.is_some());
    }

    #[tokio::test]
    async fn test_load_bundles_zip_when_configured() {
        let storage = MockStorage::new();
        storage.put_file("chats.csv", TRANSCRIPT).await;
        let mut config = MockConfig::new("chats.csv");
        config.output_formats = vec![OutputFormat::Csv];
        config.zip_filename = Some("bundle.zip".to_string());
        let pipeline = AnalysisPipeline::new(storage.clone(), config);

        let rows = pipeline.extract().await.unwrap();
        let report = pipeline.transform(rows).await.unwrap();
        let output = pipeline.load(report).await.unwrap();

        assert_eq!(output, "test_output/bundle.zip");
        let zip_bytes = storage.get_file("test_output/bundle.zip").await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_bytes)).unwrap();
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.by_index(0).unwrap().name(), "chat-analysis.csv");
        assert!(storage.get_file("test_output/chat-analysis.csv").await.is_none());
    }
}
