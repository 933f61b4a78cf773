//! Error types for XML binding

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Unexpected node: expected <{expected}>, found <{found}>")]
    UnexpectedNode { expected: String, found: String },

    #[error("Missing expected element <{0}>")]
    MissingElement(String),

    #[error("Invalid content in <{element}>: '{value}' is not a valid {expected}")]
    InvalidContent {
        element: String,
        value: String,
        expected: &'static str,
    },

    #[error("{field} is out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },

    #[error("Invalid argument {field}: {reason}")]
    InvalidArgument {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Cannot serialize {record}: mandatory field '{field}' is not set")]
    MissingMandatory {
        record: &'static str,
        field: &'static str,
    },

    #[error("XML write error: {0}")]
    XmlWrite(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    pub(crate) fn missing(record: &'static str, field: &'static str) -> Self {
        Error::MissingMandatory { record, field }
    }

    /// True for errors raised when a value is assigned (range and argument checks).
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::OutOfRange { .. } | Error::InvalidArgument { .. })
    }

    /// True for the write-time precondition failure.
    pub fn is_serialization(&self) -> bool {
        matches!(self, Error::MissingMandatory { .. })
    }

    /// True for errors that abort parsing of the input document.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::Xml(_)
                | Error::UnexpectedNode { .. }
                | Error::MissingElement(_)
                | Error::InvalidContent { .. }
        )
    }
}
