use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Transcript parse error at line {line}: {message}")]
    ParseError { line: u64, message: String },

    #[error("Transcript does not match the expected row shape: {message}")]
    ContractViolation { message: String },

    #[error("Input is {size} bytes, which exceeds the {limit} byte limit")]
    InputTooLarge { size: usize, limit: usize },

    #[error("Unsupported file type: {path}")]
    UnsupportedFileType { path: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl AnalyzerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnalyzerError::CsvError(_)
            | AnalyzerError::ParseError { .. }
            | AnalyzerError::ContractViolation { .. }
            | AnalyzerError::InputTooLarge { .. }
            | AnalyzerError::UnsupportedFileType { .. } => ErrorCategory::Input,
            AnalyzerError::ConfigError { .. }
            | AnalyzerError::ConfigValidationError { .. }
            | AnalyzerError::InvalidConfigValueError { .. }
            | AnalyzerError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AnalyzerError::SerializationError(_)
            | AnalyzerError::ProcessingError { .. } => ErrorCategory::Processing,
            AnalyzerError::ZipError(_) | AnalyzerError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 輸入錯誤可由使用者修正後重試
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AnalyzerError::CsvError(_) | AnalyzerError::ParseError { .. } => {
                "Check that every row has the same number of fields as the header".to_string()
            }
            AnalyzerError::ContractViolation { .. } => {
                "Make sure the header contains ChatLogID, UserType and MessageText columns"
                    .to_string()
            }
            AnalyzerError::InputTooLarge { limit, .. } => format!(
                "Split the transcript into files smaller than {:.2}MB",
                *limit as f64 / (1024.0 * 1024.0)
            ),
            AnalyzerError::UnsupportedFileType { .. } => {
                "Only CSV files are supported; export the transcript as .csv".to_string()
            }
            AnalyzerError::ConfigError { .. }
            | AnalyzerError::ConfigValidationError { .. }
            | AnalyzerError::InvalidConfigValueError { .. }
            | AnalyzerError::MissingConfigError { .. } => {
                "Review the configuration file or command line flags".to_string()
            }
            AnalyzerError::IoError(_) | AnalyzerError::ZipError(_) => {
                "Check file paths and permissions of the input and output locations".to_string()
            }
            AnalyzerError::SerializationError(_) | AnalyzerError::ProcessingError { .. } => {
                "Retry with corrected input; the analysis is deterministic".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AnalyzerError::InputTooLarge { size, limit } => format!(
                "File size exceeds the {:.0}MB limit ({:.2}MB)",
                *limit as f64 / (1024.0 * 1024.0),
                *size as f64 / (1024.0 * 1024.0)
            ),
            AnalyzerError::UnsupportedFileType { .. } => "Only CSV files are supported".to_string(),
            AnalyzerError::CsvError(e) => format!("Error parsing CSV: {}", e),
            AnalyzerError::ParseError { line, message } => {
                format!("Error parsing CSV (line {}): {}", line, message)
            }
            AnalyzerError::ContractViolation { message }
            | AnalyzerError::ProcessingError { message } => {
                format!("Error processing data: {}", message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
