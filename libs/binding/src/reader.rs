//! Read side of the binding: navigation over a parsed XML document.

use crate::bindable::{parse_record, Bindable};
use crate::error::{Error, Result};
use crate::ordinal::OrdinalEnum;
use crate::value::XmlValue;
use roxmltree::{Document, Node};

/// A parsed XML document.
pub struct XmlDocument<'input> {
    doc: Document<'input>,
}

impl<'input> XmlDocument<'input> {
    pub fn parse(text: &'input str) -> Result<Self> {
        Ok(Self {
            doc: Document::parse(text)?,
        })
    }

    pub fn root(&self) -> XmlNode<'_, 'input> {
        XmlNode {
            node: self.doc.root_element(),
        }
    }

    /// Returns the root element, failing unless it is named `name`.
    pub fn expect_root(&self, name: &str) -> Result<XmlNode<'_, 'input>> {
        let root = self.root();
        root.expect(name)?;
        Ok(root)
    }
}

/// An element inside an [`XmlDocument`].
///
/// Child lookups match on the local name only; the record vocabulary is not
/// namespaced.
#[derive(Clone, Copy)]
pub struct XmlNode<'a, 'input: 'a> {
    node: Node<'a, 'input>,
}

impl<'a, 'input: 'a> XmlNode<'a, 'input> {
    pub fn name(&self) -> &'a str {
        self.node.tag_name().name()
    }

    pub fn expect(&self, name: &str) -> Result<()> {
        if self.name() != name {
            return Err(Error::UnexpectedNode {
                expected: name.to_string(),
                found: self.name().to_string(),
            });
        }
        Ok(())
    }

    /// Text content of the element, or `""` when it has none.
    pub fn text(&self) -> &'a str {
        self.node.text().unwrap_or("")
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.node.attribute(name)
    }

    pub fn child(&self, name: &str) -> Option<XmlNode<'a, 'input>> {
        self.node
            .children()
            .find(|n| n.is_element() && n.tag_name().name() == name)
            .map(|node| XmlNode { node })
    }

    pub fn require_child(&self, name: &str) -> Result<XmlNode<'a, 'input>> {
        self.child(name)
            .ok_or_else(|| Error::MissingElement(name.to_string()))
    }

    pub fn children<'n>(&self, name: &'n str) -> impl Iterator<Item = XmlNode<'a, 'input>> + 'n
    where
        'a: 'n,
    {
        self.node
            .children()
            .filter(move |n| n.is_element() && n.tag_name().name() == name)
            .map(|node| XmlNode { node })
    }

    /// Decodes the text of this element.
    pub fn value<T: XmlValue>(&self) -> Result<T> {
        let text = self.text();
        T::decode(text).ok_or_else(|| Error::InvalidContent {
            element: self.name().to_string(),
            value: text.to_string(),
            expected: T::KIND,
        })
    }

    /// Decodes the text of child `name`, if present.
    pub fn read<T: XmlValue>(&self, name: &str) -> Result<Option<T>> {
        self.child(name).map(|c| c.value()).transpose()
    }

    pub fn read_text(&self, name: &str) -> Option<String> {
        self.child(name).map(|c| c.text().to_string())
    }

    /// Text of every child named `name`, in document order.
    pub fn read_texts(&self, name: &str) -> Vec<String> {
        self.children(name).map(|c| c.text().to_string()).collect()
    }

    pub fn read_enum<E: OrdinalEnum>(&self, name: &str) -> Result<Option<E>> {
        Ok(self.read::<i32>(name)?.map(E::from_ordinal))
    }

    pub fn read_record<T: Bindable + Default>(&self, name: &str) -> Result<Option<T>> {
        self.child(name).map(parse_record).transpose()
    }

    pub fn read_records<T: Bindable + Default>(&self, name: &str) -> Result<Vec<T>> {
        self.children(name).map(parse_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <sample kind="demo">
            <count>3</count>
            <ratio>0.25</ratio>
            <label>first</label>
            <label>second</label>
            <empty/>
        </sample>
    "#;

    #[test]
    fn expect_root_checks_name() {
        let doc = XmlDocument::parse(SAMPLE).unwrap();
        assert!(doc.expect_root("sample").is_ok());

        let err = doc.expect_root("other").err().unwrap();
        assert!(matches!(err, Error::UnexpectedNode { .. }));
        assert!(err.is_structural());
    }

    #[test]
    fn reads_typed_children() {
        let doc = XmlDocument::parse(SAMPLE).unwrap();
        let root = doc.root();
        assert_eq!(root.read::<i32>("count").unwrap(), Some(3));
        assert_eq!(root.read::<f64>("ratio").unwrap(), Some(0.25));
        assert_eq!(root.read::<i32>("missing").unwrap(), None);
        assert_eq!(root.read_text("empty"), Some(String::new()));
        assert_eq!(root.read_texts("label"), vec!["first", "second"]);
        assert_eq!(root.attribute("kind"), Some("demo"));
    }

    #[test]
    fn undecodable_text_is_reported() {
        let doc = XmlDocument::parse(SAMPLE).unwrap();
        let err = doc.root().read::<i32>("label").unwrap_err();
        match err {
            Error::InvalidContent {
                element, expected, ..
            } => {
                assert_eq!(element, "label");
                assert_eq!(expected, "integer");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_xml_fails_to_parse() {
        assert!(matches!(
            XmlDocument::parse("<a><b></a>"),
            Err(Error::Xml(_))
        ));
    }
}
