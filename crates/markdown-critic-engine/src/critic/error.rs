/// Failures of the stream collaborators. Malformed markup is never an
/// error: it passes through as literal text.
#[derive(Debug, thiserror::Error)]
pub enum CriticError {
    #[error("failed to read input: {0}")]
    Read(#[source] std::io::Error),
    #[error("failed to write output: {0}")]
    Write(#[source] std::io::Error),
}

impl CriticError {
    /// The underlying I/O error, unchanged.
    pub fn into_io(self) -> std::io::Error {
        match self {
            CriticError::Read(e) | CriticError::Write(e) => e,
        }
    }

    pub fn io(&self) -> &std::io::Error {
        match self {
            CriticError::Read(e) | CriticError::Write(e) => e,
        }
    }
}

pub type Result<T> = std::result::Result<T, CriticError>;
