//! People and organizations referenced from records.

use crate::coded::CodableValue;
use hrecord_binding::validate::{ensure_optional_text, ensure_text};
use hrecord_binding::{require, Bindable, Result, TextPolicy, XmlNode, XmlSink};
use std::fmt;

/// A person's name. Only the full name is mandatory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Name {
    full: Option<String>,
    title: Option<CodableValue>,
    first: Option<String>,
    middle: Option<String>,
    last: Option<String>,
    suffix: Option<CodableValue>,
}

impl Name {
    pub fn new(full: impl Into<String>) -> Result<Self> {
        let mut name = Self::default();
        name.set_full(full)?;
        Ok(name)
    }

    pub fn from_parts(first: impl Into<String>, last: impl Into<String>) -> Result<Self> {
        let first = ensure_text("first", first.into(), TextPolicy::NotWhitespace)?;
        let last = ensure_text("last", last.into(), TextPolicy::NotWhitespace)?;
        let mut name = Self::new(format!("{first} {last}"))?;
        name.first = Some(first);
        name.last = Some(last);
        Ok(name)
    }

    pub fn full(&self) -> Option<&str> {
        self.full.as_deref()
    }

    pub fn title(&self) -> Option<&CodableValue> {
        self.title.as_ref()
    }

    pub fn first(&self) -> Option<&str> {
        self.first.as_deref()
    }

    pub fn middle(&self) -> Option<&str> {
        self.middle.as_deref()
    }

    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    pub fn suffix(&self) -> Option<&CodableValue> {
        self.suffix.as_ref()
    }

    pub fn set_full(&mut self, full: impl Into<String>) -> Result<()> {
        self.full = Some(ensure_text("full", full.into(), TextPolicy::NotWhitespace)?);
        Ok(())
    }

    pub fn set_title(&mut self, title: Option<CodableValue>) {
        self.title = title;
    }

    pub fn set_first(&mut self, first: Option<String>) -> Result<()> {
        self.first = ensure_optional_text("first", first, TextPolicy::NotWhitespace)?;
        Ok(())
    }

    pub fn set_middle(&mut self, middle: Option<String>) -> Result<()> {
        self.middle = ensure_optional_text("middle", middle, TextPolicy::NotWhitespace)?;
        Ok(())
    }

    pub fn set_last(&mut self, last: Option<String>) -> Result<()> {
        self.last = ensure_optional_text("last", last, TextPolicy::NotWhitespace)?;
        Ok(())
    }

    pub fn set_suffix(&mut self, suffix: Option<CodableValue>) {
        self.suffix = suffix;
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full.as_deref().unwrap_or_default())
    }
}

impl Bindable for Name {
    const RECORD: &'static str = "Name";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        let mut parsed = Self {
            title: node.read_record("title")?,
            suffix: node.read_record("suffix")?,
            ..Self::default()
        };
        if let Some(full) = node.read_text("full") {
            parsed.set_full(full)?;
        }
        parsed.set_first(node.read_text("first"))?;
        parsed.set_middle(node.read_text("middle"))?;
        parsed.set_last(node.read_text("last"))?;
        *self = parsed;
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        require(Self::RECORD, "full", &self.full)?;
        for coded in [&self.title, &self.suffix].into_iter().flatten() {
            coded.ensure_complete()?;
        }
        Ok(())
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        sink.element("full", require(Self::RECORD, "full", &self.full)?)?;
        sink.optional_record("title", self.title.as_ref())?;
        sink.optional("first", self.first.as_ref())?;
        sink.optional("middle", self.middle.as_ref())?;
        sink.optional("last", self.last.as_ref())?;
        sink.optional_record("suffix", self.suffix.as_ref())
    }
}

/// An organization such as a health plan, clinic or employer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Organization {
    name: Option<String>,
    kind: Option<CodableValue>,
    website: Option<String>,
}

impl Organization {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let mut organization = Self::default();
        organization.set_name(name)?;
        Ok(organization)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Kind of organization, written as `<type>`.
    pub fn kind(&self) -> Option<&CodableValue> {
        self.kind.as_ref()
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.name = Some(ensure_text("name", name.into(), TextPolicy::NotWhitespace)?);
        Ok(())
    }

    pub fn set_kind(&mut self, kind: Option<CodableValue>) {
        self.kind = kind;
    }

    pub fn set_website(&mut self, website: Option<String>) -> Result<()> {
        self.website = ensure_optional_text("website", website, TextPolicy::NotWhitespace)?;
        Ok(())
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_deref().unwrap_or_default())
    }
}

impl Bindable for Organization {
    const RECORD: &'static str = "Organization";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        let mut parsed = Self {
            kind: node.read_record("type")?,
            ..Self::default()
        };
        if let Some(name) = node.read_text("name") {
            parsed.set_name(name)?;
        }
        parsed.set_website(node.read_text("website"))?;
        *self = parsed;
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        require(Self::RECORD, "name", &self.name)?;
        if let Some(kind) = &self.kind {
            kind.ensure_complete()?;
        }
        Ok(())
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        sink.element("name", require(Self::RECORD, "name", &self.name)?)?;
        sink.optional_record("type", self.kind.as_ref())?;
        sink.optional("website", self.website.as_ref())
    }
}

/// A person and their role relative to the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PersonItem {
    name: Option<Name>,
    organization: Option<String>,
    professional_training: Option<String>,
    id: Option<String>,
    kind: Option<CodableValue>,
}

impl PersonItem {
    pub fn new(name: Name) -> Self {
        Self {
            name: Some(name),
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    pub fn professional_training(&self) -> Option<&str> {
        self.professional_training.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Role of the person, written as `<type>`.
    pub fn kind(&self) -> Option<&CodableValue> {
        self.kind.as_ref()
    }

    pub fn set_name(&mut self, name: Name) {
        self.name = Some(name);
    }

    pub fn set_organization(&mut self, organization: Option<String>) -> Result<()> {
        self.organization =
            ensure_optional_text("organization", organization, TextPolicy::NotWhitespace)?;
        Ok(())
    }

    pub fn set_professional_training(&mut self, training: Option<String>) -> Result<()> {
        self.professional_training =
            ensure_optional_text("professional-training", training, TextPolicy::NotWhitespace)?;
        Ok(())
    }

    pub fn set_id(&mut self, id: Option<String>) -> Result<()> {
        self.id = ensure_optional_text("id", id, TextPolicy::NotEmpty)?;
        Ok(())
    }

    pub fn set_kind(&mut self, kind: Option<CodableValue>) {
        self.kind = kind;
    }
}

impl fmt::Display for PersonItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name}")?;
        }
        if let Some(organization) = &self.organization {
            write!(f, " ({organization})")?;
        }
        Ok(())
    }
}

impl Bindable for PersonItem {
    const RECORD: &'static str = "PersonItem";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        let mut parsed = Self {
            name: node.read_record("name")?,
            kind: node.read_record("type")?,
            ..Self::default()
        };
        parsed.set_organization(node.read_text("organization"))?;
        parsed.set_professional_training(node.read_text("professional-training"))?;
        parsed.set_id(node.read_text("id"))?;
        *self = parsed;
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        require(Self::RECORD, "name", &self.name)?.ensure_complete()?;
        if let Some(kind) = &self.kind {
            kind.ensure_complete()?;
        }
        Ok(())
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        sink.record("name", require(Self::RECORD, "name", &self.name)?)?;
        sink.optional("organization", self.organization.as_ref())?;
        sink.optional("professional-training", self.professional_training.as_ref())?;
        sink.optional("id", self.id.as_ref())?;
        sink.optional_record("type", self.kind.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrecord_binding::{from_xml_str, to_xml_string, Error, WriteSettings};

    #[test]
    fn name_from_parts_builds_full_name() {
        let name = Name::from_parts("Ada", "Lovelace").unwrap();
        assert_eq!(name.full(), Some("Ada Lovelace"));
        assert!(Name::from_parts(" ", "Lovelace").is_err());
    }

    #[test]
    fn person_round_trip() {
        let mut person = PersonItem::new(Name::from_parts("Grace", "Hopper").unwrap());
        person.set_organization(Some("Navy".into())).unwrap();
        person.set_id(Some("GH-1".into())).unwrap();
        person.set_kind(Some(CodableValue::new("Provider").unwrap()));

        let xml = to_xml_string(&person, "person", &WriteSettings::default()).unwrap();
        assert_eq!(
            xml,
            "<person><name><full>Grace Hopper</full><first>Grace</first><last>Hopper</last></name>\
             <organization>Navy</organization><id>GH-1</id><type><text>Provider</text></type></person>"
        );
        assert_eq!(from_xml_str::<PersonItem>(&xml, "person").unwrap(), person);
    }

    #[test]
    fn person_without_name_cannot_be_written() {
        let err = to_xml_string(&PersonItem::default(), "person", &WriteSettings::default())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingMandatory {
                record: "PersonItem",
                field: "name"
            }
        ));
    }

    #[test]
    fn id_policy_allows_whitespace_but_not_empty() {
        let mut person = PersonItem::default();
        assert!(person.set_id(Some(String::new())).is_err());
        assert!(person.set_id(Some(" ".into())).is_ok());
    }

    #[test]
    fn organization_round_trip() {
        let mut org = Organization::new("Contoso Health").unwrap();
        org.set_website(Some("https://contoso.example".into())).unwrap();
        let xml = to_xml_string(&org, "plan", &WriteSettings::default()).unwrap();
        assert_eq!(from_xml_str::<Organization>(&xml, "plan").unwrap(), org);
        assert_eq!(org.to_string(), "Contoso Health");
    }
}
