use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("invalid date key '{key}' in series {series}")]
    InvalidDateKey { series: String, key: String },

    #[error("malformed metric file {path}: {reason}")]
    MetricFile { path: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MetricsError>;
