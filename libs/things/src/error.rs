//! Error types for thing parsing and routing

use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Binding(#[from] hrecord_binding::Error),

    #[error("Unknown thing type id: {0}")]
    UnknownTypeId(Uuid),

    #[error("No thing type has root element <{0}>")]
    UnknownRootElement(String),
}
