use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriterError {
    /// Header and row disagree on the number of fields.
    #[error("Malformed CSV row on line {line}: expected {expected} fields, found {found}")]
    MalformedRow { line: u64, expected: usize, found: usize },

    #[error("CSV error: Missing id column {column} on line {line}")]
    MissingIdentifier { column: String, line: u64 },

    /// The bulk call (or any other backend call) failed as a whole.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Load failed for: {0}")]
    LoadFailed(String),
}

impl WriterError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<csv::Error> for WriterError {
    fn from(e: csv::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
