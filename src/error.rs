use thiserror::Error;

/// Source text that is not syntactically valid PHP
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    /// 1-based line of the first syntax error, when known
    pub line: Option<u32>,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
        }
    }

    pub fn at_line(line: u32) -> Self {
        Self {
            message: format!("Syntax error on line {}", line),
            line: Some(line),
        }
    }
}

/// Failure reported by a document store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Value cannot be encoded for storage: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Store rejected the write: {0}")]
    Rejected(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
}
