use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Malformed input at line {line}: {message}")]
    MalformedInputError { line: u64, message: String },

    #[error("Column '{field}' is not numeric: '{value}'")]
    NumericParseError { field: String, value: String },

    #[error("Index {index} is out of range for '{input}' (length {len})")]
    IndexOutOfRangeError {
        input: String,
        index: usize,
        len: usize,
    },

    #[error("Product '{title}' has duplicate variants: {pairs}")]
    DuplicateVariantError { title: String, pairs: String },

    #[error("Failed to create product '{title}': {message}\npayload: {payload}")]
    SubmissionError {
        title: String,
        message: String,
        payload: String,
    },

    #[error("Store responded with {status}: {body}")]
    ApiStatusError { status: u16, body: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

/// 錯誤影響範圍：決定同步流程要中止到哪一層
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorScope {
    /// 中止整個執行
    Run,
    /// 中止目前的產品類型，繼續下一個
    ProductType,
    /// 目前的產品群組失敗（同類型剩餘群組亦中止）
    Group,
}

impl SyncError {
    pub fn config(message: impl Into<String>) -> Self {
        SyncError::ConfigError {
            message: message.into(),
        }
    }

    pub fn scope(&self) -> ErrorScope {
        match self {
            SyncError::ConfigError { .. } | SyncError::InvalidConfigValueError { .. } => {
                ErrorScope::Run
            }
            SyncError::MalformedInputError { .. }
            | SyncError::CsvError(_)
            | SyncError::IoError(_) => ErrorScope::ProductType,
            _ => ErrorScope::Group,
        }
    }

    /// 對應 CLI 結束碼
    pub fn exit_code(&self) -> i32 {
        match self.scope() {
            ErrorScope::Run => 3,
            ErrorScope::ProductType => 2,
            ErrorScope::Group => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
