use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// A required report field (title, creation date) was never supplied.
    MissingField(&'static str),
    InvalidRow(String),
    InvalidConfig(String),
    Json(serde_json::Error),
    Pdf(String),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingField(name) => write!(f, "report is missing required field: {name}"),
            Error::InvalidRow(reason) => write!(f, "invalid field row: {reason}"),
            Error::InvalidConfig(reason) => write!(f, "invalid layout configuration: {reason}"),
            Error::Json(e) => write!(f, "JSON error: {e}"),
            Error::Pdf(e) => write!(f, "PDF error: {e}"),
            Error::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
