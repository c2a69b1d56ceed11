#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("incomplete level: missing {0} chunk")]
    MissingChunk(&'static str),

    #[error("bad map format: {0}")]
    Format(String),

    #[error("unexpected end of data")]
    UnexpectedEof,

    #[error("io error: {0}")]
    Io(String),

    #[error("json error: {0}")]
    Json(String),
}

impl Error {
    /// True for every error caused by malformed bytes rather than a missing chunk or I/O.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_) | Self::UnexpectedEof)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
