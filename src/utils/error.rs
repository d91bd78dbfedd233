use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cannot access file '{path}': {source}")]
    FileAccessError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Render error: failed to expand {fragment} fragment")]
    RenderError { fragment: &'static str },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Key column '{column}' not found in header")]
    KeyColumnNotFound { column: String },

    #[error("Header cell '{header}' (column {column}) normalizes to an empty field name")]
    EmptyFieldName { header: String, column: usize },

    #[error("Field name '{name}' produced by columns {first_column} and {second_column}")]
    DuplicateFieldName {
        name: String,
        first_column: usize,
        second_column: usize,
    },

    #[error("Row at line {line} has {found} cells, header has {expected}")]
    RowLengthMismatch {
        line: u64,
        expected: usize,
        found: usize,
    },
}

/// 對應錯誤分類表：設定、IO、解析、索引、渲染
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Io,
    Parse,
    Index,
    Render,
}

impl GenError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GenError::IoError(_) | GenError::FileAccessError { .. } => ErrorCategory::Io,
            GenError::CsvError(e) => match e.kind() {
                csv::ErrorKind::Io(_) => ErrorCategory::Io,
                _ => ErrorCategory::Parse,
            },
            GenError::ParseError { .. } | GenError::SerializationError(_) => ErrorCategory::Parse,
            GenError::RenderError { .. } => ErrorCategory::Render,
            GenError::RowLengthMismatch { .. } => ErrorCategory::Index,
            GenError::ConfigError { .. }
            | GenError::ConfigValidationError { .. }
            | GenError::MissingConfigError { .. }
            | GenError::InvalidConfigValueError { .. }
            | GenError::KeyColumnNotFound { .. }
            | GenError::EmptyFieldName { .. }
            | GenError::DuplicateFieldName { .. } => ErrorCategory::Configuration,
        }
    }

    /// 所有錯誤都會中止本次生成，因此退出碼永遠非零
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 2,
            ErrorCategory::Io => 3,
            ErrorCategory::Parse => 4,
            ErrorCategory::Index => 5,
            ErrorCategory::Render => 6,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid generator configuration: {}", self),
            ErrorCategory::Io => format!("File operation failed: {}", self),
            ErrorCategory::Parse => format!("Input file could not be parsed: {}", self),
            ErrorCategory::Index => format!("Input rows do not match the header: {}", self),
            ErrorCategory::Render => format!("Source rendering failed: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GenError::KeyColumnNotFound { .. } => {
                "Check --hashKey against the exact header text of the input file"
            }
            GenError::EmptyFieldName { .. } | GenError::DuplicateFieldName { .. } => {
                "Rename the offending header cells so each yields a distinct identifier"
            }
            GenError::RowLengthMismatch { .. } => {
                "Make every data row carry exactly one cell per header column"
            }
            GenError::MissingConfigError { .. } | GenError::InvalidConfigValueError { .. } => {
                "Pass the value on the command line or set it in the config file"
            }
            _ => match self.category() {
                ErrorCategory::Configuration => "Review the command line flags and config file",
                ErrorCategory::Io => "Verify the input path exists and the output directory is writable",
                ErrorCategory::Parse => "Make sure the input is a non-empty, delimiter-separated text file",
                ErrorCategory::Index => "Fix the row lengths in the input file",
                ErrorCategory::Render => "Regenerate; no output file was written",
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
