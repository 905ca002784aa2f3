use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Places API error (status {status}): {message}")]
    ApiStatus { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Spreadsheet file unreadable: {0}")]
    FileFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Missing configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },
}

impl From<calamine::XlsxError> for FinderError {
    fn from(e: calamine::XlsxError) -> Self {
        FinderError::FileFormat(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Io,
    Data,
    Config,
}

impl FinderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FinderError::Http(_) | FinderError::ApiStatus { .. } => ErrorCategory::Network,
            FinderError::Io(_) | FinderError::Xlsx(_) => ErrorCategory::Io,
            FinderError::FileFormat(_) | FinderError::Serialization(_) => ErrorCategory::Data,
            FinderError::MissingConfig { .. } | FinderError::InvalidInput { .. } => {
                ErrorCategory::Config
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FinderError::Http(_) | FinderError::ApiStatus { .. } => ErrorSeverity::Medium,
            FinderError::Io(_) | FinderError::Xlsx(_) | FinderError::FileFormat(_) => {
                ErrorSeverity::High
            }
            FinderError::Serialization(_) => ErrorSeverity::High,
            FinderError::MissingConfig { .. } => ErrorSeverity::Critical,
            FinderError::InvalidInput { .. } => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FinderError::Http(e) => format!("Could not reach the Places API: {}", e),
            FinderError::ApiStatus { status, message } => {
                format!("The Places API rejected the request ({}): {}", status, message)
            }
            FinderError::Io(e) => format!("Could not read or write the output file: {}", e),
            FinderError::Xlsx(e) => format!("Could not build the spreadsheet: {}", e),
            FinderError::FileFormat(e) => {
                format!("The file is not a readable .xlsx workbook: {}", e)
            }
            FinderError::Serialization(e) => format!("Unexpected API payload: {}", e),
            FinderError::MissingConfig { field } => {
                format!("Missing required configuration: {}", field)
            }
            FinderError::InvalidInput {
                field,
                value,
                reason,
            } => format!("'{}' is not a valid {}: {}", value, field, reason),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Network => {
                "Check your network connection, API key, and Places API quota".to_string()
            }
            ErrorCategory::Io => {
                "Check that the output path exists and is writable".to_string()
            }
            ErrorCategory::Data => {
                "Check that the file is an .xlsx workbook produced by this tool".to_string()
            }
            ErrorCategory::Config => {
                "Set GOOGLE_API_KEY in the environment or a .env file, and pick areas/specialties from the supported lists".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;
