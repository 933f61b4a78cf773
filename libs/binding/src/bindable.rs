//! The record contract: parse from an element, check, write back.

use crate::error::{Error, Result};
use crate::reader::{XmlDocument, XmlNode};
use crate::writer::{WriteSettings, XmlSink};

/// A record bound to an XML element.
///
/// Writing is two-phase: [`Bindable::ensure_complete`] runs first and must
/// reject a record whose mandatory fields are unset, so a failed write never
/// emits a partial element. Implementations of `ensure_complete` recurse into
/// nested records that are set.
pub trait Bindable {
    /// Record name used in error messages and logs.
    const RECORD: &'static str;

    /// Replaces every bound field of `self` with the contents of `node`.
    ///
    /// Fields absent from `node` become unset, lists are cleared and
    /// repopulated. Mandatory elements may be absent; the omission surfaces
    /// when the record is written.
    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()>;

    /// Fails with [`Error::MissingMandatory`] when a mandatory field is unset.
    fn ensure_complete(&self) -> Result<()> {
        Ok(())
    }

    /// Attributes written on the record's own element.
    fn attributes(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Writes the children of the record's element in declared order.
    fn write_body(&self, sink: &mut XmlSink) -> Result<()>;

    fn write_xml(&self, element: &str, sink: &mut XmlSink) -> Result<()> {
        self.ensure_complete()?;
        tracing::trace!(record = Self::RECORD, element, "writing record");

        let attributes = self.attributes();
        if attributes.is_empty() {
            sink.start(element)?;
        } else {
            let borrowed: Vec<(&str, &str)> = attributes
                .iter()
                .map(|(name, value)| (*name, value.as_str()))
                .collect();
            sink.start_with_attributes(element, &borrowed)?;
        }
        self.write_body(sink)?;
        sink.end(element)
    }
}

/// Builds a record from the element `node`.
pub fn parse_record<T: Bindable + Default>(node: XmlNode<'_, '_>) -> Result<T> {
    tracing::trace!(record = T::RECORD, element = node.name(), "parsing record");
    let mut record = T::default();
    record.parse_xml(node)?;
    Ok(record)
}

/// Parses `xml` whose root element must be `root`.
pub fn from_xml_str<T: Bindable + Default>(xml: &str, root: &str) -> Result<T> {
    let doc = XmlDocument::parse(xml)?;
    parse_record(doc.expect_root(root)?)
}

/// Serializes `value` as a standalone `root` element.
pub fn to_xml_string<T: Bindable>(value: &T, root: &str, settings: &WriteSettings) -> Result<String> {
    let mut sink = XmlSink::with_settings(settings);
    value.write_xml(root, &mut sink)?;
    sink.into_string()
}

/// Returns the mandatory `field` of `record` or the serialization error naming it.
pub fn require<'v, T>(record: &'static str, field: &'static str, value: &'v Option<T>) -> Result<&'v T> {
    value.as_ref().ok_or_else(|| Error::missing(record, field))
}

/// Fails when a mandatory list is empty.
pub fn require_items<T>(record: &'static str, field: &'static str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(Error::missing(record, field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{ensure_range, ensure_text, TextPolicy};

    #[derive(Debug, Default, PartialEq)]
    struct Reading {
        label: Option<String>,
        level: Option<i32>,
        tags: Vec<String>,
    }

    impl Reading {
        fn set_level(&mut self, level: i32) -> Result<()> {
            self.level = Some(ensure_range("level", level, 0, 10)?);
            Ok(())
        }
    }

    impl Bindable for Reading {
        const RECORD: &'static str = "Reading";

        fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
            let mut parsed = Reading {
                label: node.read_text("label"),
                tags: node.read_texts("tag"),
                ..Reading::default()
            };
            if let Some(level) = node.read("level")? {
                parsed.set_level(level)?;
            }
            *self = parsed;
            Ok(())
        }

        fn ensure_complete(&self) -> Result<()> {
            require(Self::RECORD, "label", &self.label)?;
            Ok(())
        }

        fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
            let label = require(Self::RECORD, "label", &self.label)?;
            sink.text_element("label", &ensure_text("label", label.clone(), TextPolicy::NotNull)?)?;
            sink.optional("level", self.level.as_ref())?;
            sink.texts("tag", &self.tags)
        }
    }

    #[test]
    fn missing_mandatory_field_blocks_write() {
        let reading = Reading {
            level: Some(3),
            ..Reading::default()
        };
        let mut sink = XmlSink::new();
        let err = reading.write_xml("reading", &mut sink).unwrap_err();
        assert!(err.is_serialization());
        assert!(err.to_string().contains("label"));
        assert_eq!(sink.into_string().unwrap(), "");
    }

    #[test]
    fn reparse_replaces_all_fields() {
        let mut reading: Reading = from_xml_str(
            "<reading><label>a</label><level>2</level><tag>x</tag><tag>y</tag></reading>",
            "reading",
        )
        .unwrap();
        assert_eq!(reading.tags, vec!["x", "y"]);

        let doc = XmlDocument::parse("<reading><label>b</label><tag>z</tag></reading>").unwrap();
        reading.parse_xml(doc.root()).unwrap();
        assert_eq!(reading.label.as_deref(), Some("b"));
        assert_eq!(reading.level, None);
        assert_eq!(reading.tags, vec!["z"]);
    }

    #[test]
    fn out_of_range_input_is_rejected_while_parsing() {
        let err = from_xml_str::<Reading>(
            "<reading><label>a</label><level>11</level></reading>",
            "reading",
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn round_trip_is_stable() {
        let reading = Reading {
            label: Some("resting".into()),
            level: Some(4),
            tags: vec!["am".into()],
        };
        let settings = WriteSettings::default();
        let first = to_xml_string(&reading, "reading", &settings).unwrap();
        let second = to_xml_string(&reading, "reading", &settings).unwrap();
        assert_eq!(first, second);

        let back: Reading = from_xml_str(&first, "reading").unwrap();
        assert_eq!(back, reading);
    }
}
