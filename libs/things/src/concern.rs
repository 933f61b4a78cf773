//! A health concern the person has.

use crate::thing::Thing;
use hrecord_binding::{require, Bindable, Result, XmlNode, XmlSink};
use hrecord_types::CodableValue;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Concern {
    description: Option<CodableValue>,
    status: Option<CodableValue>,
}

impl Concern {
    pub fn new(description: CodableValue) -> Self {
        Self {
            description: Some(description),
            status: None,
        }
    }

    pub fn description(&self) -> Option<&CodableValue> {
        self.description.as_ref()
    }

    /// Whether the concern is active or resolved.
    pub fn status(&self) -> Option<&CodableValue> {
        self.status.as_ref()
    }

    pub fn set_description(&mut self, description: CodableValue) {
        self.description = Some(description);
    }

    pub fn set_status(&mut self, status: Option<CodableValue>) {
        self.status = status;
    }
}

impl Bindable for Concern {
    const RECORD: &'static str = "Concern";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        *self = Self {
            description: node.read_record("description")?,
            status: node.read_record("status")?,
        };
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        require(Self::RECORD, "description", &self.description)?.ensure_complete()?;
        if let Some(status) = &self.status {
            status.ensure_complete()?;
        }
        Ok(())
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        sink.record(
            "description",
            require(Self::RECORD, "description", &self.description)?,
        )?;
        sink.optional_record("status", self.status.as_ref())
    }
}

impl Thing for Concern {
    const TYPE_ID: Uuid = Uuid::from_u128(0xaea2e8f2_11dd_4a7d_ab43_1d58764ebc19);
    const TYPE_NAME: &'static str = "Concern";
    const ROOT_ELEMENT: &'static str = "concern";

    fn summary(&self) -> String {
        self.description
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}
