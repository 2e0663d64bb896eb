//! Error types for logger setup

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Encoding token outside the supported set
    #[error("unknown log format: {value}, supported values {}", supported.join(", "))]
    InvalidFormat {
        value: String,
        supported: Vec<&'static str>,
    },

    /// Level name that does not map to a severity
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// A logger could not be built because one of its outputs failed to open
    #[error("failed to build logger: cannot open output '{path}': {source}")]
    Construction {
        path: String,
        #[source]
        source: Box<LoggerError>,
    },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),
}

impl LoggerError {
    /// Create an invalid format error listing the supported tokens
    pub fn invalid_format(value: impl Into<String>, supported: &[&'static str]) -> Self {
        LoggerError::InvalidFormat {
            value: value.into(),
            supported: supported.to_vec(),
        }
    }

    /// Wrap a sink failure raised while building a logger
    pub fn construction(path: impl Into<String>, source: LoggerError) -> Self {
        LoggerError::Construction {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    pub fn is_construction(&self) -> bool {
        matches!(self, LoggerError::Construction { .. })
    }
}
