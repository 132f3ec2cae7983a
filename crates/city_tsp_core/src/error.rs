use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("format error in {location} line {line}: {message}")]
    Format {
        location: String,
        line: usize,
        message: String,
    },
    #[error("unknown node id {id} ({context})")]
    Range { id: usize, context: String },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn format(location: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            location: location.into(),
            line,
            message: message.into(),
        }
    }

    pub fn range(id: usize, context: impl Into<String>) -> Self {
        Self::Range {
            id,
            context: context.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}
