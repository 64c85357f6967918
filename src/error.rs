//! Errors for the eland library
use thiserror::Error;

/// Error for the eland library
#[derive(Debug, Error)]
pub enum ElandError {
    /// An IO Error
    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),

    /// An error found during the parsing of an underlying format
    #[error("Parsing Error: {0}")]
    ParserError(#[from] Box<dyn std::error::Error>),

    /// Data has been given that we cannot make sense of or that would
    /// result in an invalid classification
    #[error("Validity Error: {0}")]
    ValidityError(String),

    /// A command has been given that is invalid
    #[error("Command Error: {0}")]
    CommandError(String),
}

macro_rules! invalid {
    ($($arg:tt)*) => {
        $crate::error::ElandError::ValidityError(format!($($arg)*))
    }
}
pub(crate) use invalid;

impl From<quick_xml::Error> for ElandError {
    fn from(e: quick_xml::Error) -> Self {
        Self::ParserError(e.into())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ElandError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::ParserError(e.into())
    }
}

impl From<serde_json::Error> for ElandError {
    fn from(e: serde_json::Error) -> Self {
        Self::ParserError(e.into())
    }
}
