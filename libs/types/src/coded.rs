//! Vocabulary-coded values.

use hrecord_binding::validate::{ensure_optional_text, ensure_text};
use hrecord_binding::{require, Bindable, Result, TextPolicy, XmlNode, XmlSink};
use std::fmt;

/// A single code from a vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodedValue {
    value: Option<String>,
    family: Option<String>,
    vocabulary: Option<String>,
    version: Option<String>,
}

impl CodedValue {
    pub fn new(value: impl Into<String>, vocabulary: impl Into<String>) -> Result<Self> {
        let mut code = Self::default();
        code.set_value(value)?;
        code.set_vocabulary(vocabulary)?;
        Ok(code)
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    /// Name of the vocabulary, written as `<type>`.
    pub fn vocabulary(&self) -> Option<&str> {
        self.vocabulary.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn set_value(&mut self, value: impl Into<String>) -> Result<()> {
        self.value = Some(ensure_text("value", value.into(), TextPolicy::NotWhitespace)?);
        Ok(())
    }

    pub fn set_family(&mut self, family: Option<String>) -> Result<()> {
        self.family = ensure_optional_text("family", family, TextPolicy::NotWhitespace)?;
        Ok(())
    }

    pub fn set_vocabulary(&mut self, vocabulary: impl Into<String>) -> Result<()> {
        self.vocabulary = Some(ensure_text(
            "type",
            vocabulary.into(),
            TextPolicy::NotWhitespace,
        )?);
        Ok(())
    }

    pub fn set_version(&mut self, version: Option<String>) -> Result<()> {
        self.version = ensure_optional_text("version", version, TextPolicy::NotWhitespace)?;
        Ok(())
    }
}

impl fmt::Display for CodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(family) = &self.family {
            write!(f, "{family}:")?;
        }
        write!(
            f,
            "{}:{}",
            self.vocabulary.as_deref().unwrap_or_default(),
            self.value.as_deref().unwrap_or_default()
        )?;
        if let Some(version) = &self.version {
            write!(f, ":{version}")?;
        }
        Ok(())
    }
}

impl Bindable for CodedValue {
    const RECORD: &'static str = "CodedValue";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        let mut parsed = Self::default();
        if let Some(value) = node.read_text("value") {
            parsed.set_value(value)?;
        }
        parsed.set_family(node.read_text("family"))?;
        if let Some(vocabulary) = node.read_text("type") {
            parsed.set_vocabulary(vocabulary)?;
        }
        parsed.set_version(node.read_text("version"))?;
        *self = parsed;
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        require(Self::RECORD, "value", &self.value)?;
        require(Self::RECORD, "type", &self.vocabulary)?;
        Ok(())
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        sink.element("value", require(Self::RECORD, "value", &self.value)?)?;
        sink.optional("family", self.family.as_ref())?;
        sink.element("type", require(Self::RECORD, "type", &self.vocabulary)?)?;
        sink.optional("version", self.version.as_ref())
    }
}

/// Free text with zero or more codes that express the same concept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodableValue {
    text: Option<String>,
    codes: Vec<CodedValue>,
}

impl CodableValue {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let mut value = Self::default();
        value.set_text(text)?;
        Ok(value)
    }

    pub fn with_code(text: impl Into<String>, code: CodedValue) -> Result<Self> {
        let mut value = Self::new(text)?;
        value.codes.push(code);
        Ok(value)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.text = Some(ensure_text("text", text.into(), TextPolicy::NotWhitespace)?);
        Ok(())
    }

    pub fn codes(&self) -> &[CodedValue] {
        &self.codes
    }

    pub fn codes_mut(&mut self) -> &mut Vec<CodedValue> {
        &mut self.codes
    }
}

impl fmt::Display for CodableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text.as_deref().unwrap_or_default())
    }
}

impl Bindable for CodableValue {
    const RECORD: &'static str = "CodableValue";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        let mut parsed = Self {
            text: None,
            codes: node.read_records("code")?,
        };
        if let Some(text) = node.read_text("text") {
            parsed.set_text(text)?;
        }
        *self = parsed;
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        require(Self::RECORD, "text", &self.text)?;
        self.codes.iter().try_for_each(Bindable::ensure_complete)
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        sink.element("text", require(Self::RECORD, "text", &self.text)?)?;
        sink.records("code", &self.codes)
    }
}
