pub type CaptureResult<T> = Result<T, CaptureError>;

#[derive(thiserror::Error, Debug)]
pub enum CaptureError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("navigation error: {0}")]
    Navigation(String),

    #[error("page query error: {0}")]
    Query(String),

    #[error("capture error: {0}")]
    Capture(String),

    #[error("recorder error: {0}")]
    Recorder(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CaptureError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn navigation(msg: impl Into<String>) -> Self {
        Self::Navigation(msg.into())
    }

    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    pub fn recorder(msg: impl Into<String>) -> Self {
        Self::Recorder(msg.into())
    }
}
