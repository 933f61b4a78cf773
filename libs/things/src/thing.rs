use crate::error::Result;
use hrecord_binding::{from_xml_str, to_xml_string, Bindable, WriteSettings};
use uuid::Uuid;

/// A top-level record type stored by the health record service.
///
/// Each thing type is named by a stable [`Uuid`] and written under a fixed
/// root element.
pub trait Thing: Bindable + Default + Clone + std::fmt::Debug {
    /// Identifier of the document schema.
    const TYPE_ID: Uuid;

    /// Human-readable type name.
    const TYPE_NAME: &'static str;

    const ROOT_ELEMENT: &'static str;

    /// One-line description of the record's content.
    fn summary(&self) -> String;

    fn from_xml(xml: &str) -> Result<Self> {
        Ok(from_xml_str(xml, Self::ROOT_ELEMENT)?)
    }

    fn to_xml(&self) -> Result<String> {
        self.to_xml_with(&WriteSettings::default())
    }

    fn to_xml_with(&self, settings: &WriteSettings) -> Result<String> {
        Ok(to_xml_string(self, Self::ROOT_ELEMENT, settings)?)
    }
}
