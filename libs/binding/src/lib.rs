//! Optional-field XML binding for health record types
//!
//! Every record type in the workspace follows the same contract:
//!
//! - **Parse**: locate the record's element, decode each known child by name,
//!   run the field's validator, leave absent fields unset.
//! - **Validate**: setters check ranges and string policies on assignment.
//! - **Write**: check mandatory fields first, then emit children in a fixed
//!   order, omitting unset optional elements.
//!
//! This crate supplies the pieces that contract is built from: document
//! navigation ([`XmlDocument`], [`XmlNode`]), the output sink ([`XmlSink`]),
//! the [`Bindable`] trait, validators, lenient ordinal enumerations and the
//! injectable [`Clock`].
//!
//! # Example
//!
//! ```rust
//! use hrecord_binding::XmlDocument;
//!
//! let doc = XmlDocument::parse("<pulse><value>72</value></pulse>").unwrap();
//! let root = doc.expect_root("pulse").unwrap();
//! assert_eq!(root.read::<i32>("value").unwrap(), Some(72));
//! ```

#![forbid(unsafe_code)]

mod bindable;
mod clock;
mod compare;
mod error;
mod ordinal;
mod reader;
pub mod validate;
mod value;
mod writer;

pub use bindable::{
    from_xml_str, parse_record, require, require_items, to_xml_string, Bindable,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use compare::compare_optional;
pub use error::{Error, Result};
pub use ordinal::OrdinalEnum;
pub use reader::{XmlDocument, XmlNode};
pub use validate::TextPolicy;
pub use value::XmlValue;
pub use writer::{WriteSettings, XmlSink};
