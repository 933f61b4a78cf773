//! Write side of the binding: an in-memory XML sink.

use crate::bindable::Bindable;
use crate::error::Result;
use crate::ordinal::OrdinalEnum;
use crate::value::XmlValue;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

/// Output formatting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteSettings {
    /// Spaces per nesting level; `None` writes everything on one line.
    pub indent: Option<usize>,
}

impl WriteSettings {
    pub fn indented(indent: usize) -> Self {
        Self {
            indent: Some(indent),
        }
    }
}

/// Collects XML events into a UTF-8 buffer.
///
/// Output is deterministic: the same sequence of calls always produces the
/// same bytes.
pub struct XmlSink {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl Default for XmlSink {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlSink {
    pub fn new() -> Self {
        Self::with_settings(&WriteSettings::default())
    }

    pub fn with_settings(settings: &WriteSettings) -> Self {
        let buffer = Cursor::new(Vec::new());
        let writer = match settings.indent {
            Some(width) => Writer::new_with_indent(buffer, b' ', width),
            None => Writer::new(buffer),
        };
        Self { writer }
    }

    pub fn start(&mut self, name: &str) -> Result<()> {
        self.writer
            .write_event(Event::Start(BytesStart::new(name)))?;
        Ok(())
    }

    pub fn start_with_attributes(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let mut start = BytesStart::new(name);
        for attribute in attributes {
            start.push_attribute(*attribute);
        }
        self.writer.write_event(Event::Start(start))?;
        Ok(())
    }

    pub fn end(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Writes escaped character data inside the currently open element.
    pub fn text(&mut self, text: &str) -> Result<()> {
        if !text.is_empty() {
            self.writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        Ok(())
    }

    /// Writes `<name>text</name>`; empty text becomes `<name/>`.
    pub fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        if text.is_empty() {
            self.writer
                .write_event(Event::Empty(BytesStart::new(name)))?;
            return Ok(());
        }
        self.start(name)?;
        self.text(text)?;
        self.end(name)
    }

    pub fn element<T: XmlValue>(&mut self, name: &str, value: &T) -> Result<()> {
        self.text_element(name, &value.encode())
    }

    /// Writes the element only when `value` is set.
    pub fn optional<T: XmlValue>(&mut self, name: &str, value: Option<&T>) -> Result<()> {
        match value {
            Some(value) => self.element(name, value),
            None => Ok(()),
        }
    }

    pub fn texts(&mut self, name: &str, values: &[String]) -> Result<()> {
        for value in values {
            self.text_element(name, value)?;
        }
        Ok(())
    }

    /// Writes an enumeration ordinal, skipping the `Unknown` member.
    pub fn enumeration<E: OrdinalEnum>(&mut self, name: &str, value: E) -> Result<()> {
        if value.is_unknown() {
            return Ok(());
        }
        self.element(name, &value.ordinal())
    }

    pub fn record<T: Bindable>(&mut self, name: &str, value: &T) -> Result<()> {
        value.write_xml(name, self)
    }

    pub fn optional_record<T: Bindable>(&mut self, name: &str, value: Option<&T>) -> Result<()> {
        match value {
            Some(value) => value.write_xml(name, self),
            None => Ok(()),
        }
    }

    /// Writes one `name` element per item, in list order.
    pub fn records<T: Bindable>(&mut self, name: &str, values: &[T]) -> Result<()> {
        for value in values {
            value.write_xml(name, self)?;
        }
        Ok(())
    }

    pub fn into_string(self) -> Result<String> {
        let bytes = self.writer.into_inner().into_inner();
        Ok(String::from_utf8(bytes)?)
    }
}
