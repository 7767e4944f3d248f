use thiserror::Error;

/// 模板引用了不存在的片段。組合唯一的失敗模式。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing fragment: {name}")]
pub struct MissingFragmentError {
    pub name: String,
}

impl MissingFragmentError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Error, Debug)]
pub enum SiteError {
    #[error(transparent)]
    MissingFragment(#[from] MissingFragmentError),

    #[error("Unknown page: {route}")]
    UnknownPage { route: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },
}

impl SiteError {
    pub fn is_missing_fragment(&self) -> bool {
        matches!(self, SiteError::MissingFragment(_))
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
