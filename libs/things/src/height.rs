//! Body height.

use crate::thing::Thing;
use hrecord_binding::{require, Bindable, Clock, Result, XmlNode, XmlSink};
use hrecord_types::{HealthServiceDateTime, Length};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Height {
    when: Option<HealthServiceDateTime>,
    value: Option<Length>,
}

impl Height {
    pub fn new(clock: &dyn Clock, value: Length) -> Result<Self> {
        Ok(Self::at(HealthServiceDateTime::now(clock)?, value))
    }

    pub fn at(when: HealthServiceDateTime, value: Length) -> Self {
        Self {
            when: Some(when),
            value: Some(value),
        }
    }

    pub fn when(&self) -> Option<&HealthServiceDateTime> {
        self.when.as_ref()
    }

    pub fn value(&self) -> Option<&Length> {
        self.value.as_ref()
    }

    pub fn set_when(&mut self, when: HealthServiceDateTime) {
        self.when = Some(when);
    }

    pub fn set_value(&mut self, value: Length) {
        self.value = Some(value);
    }
}

impl Bindable for Height {
    const RECORD: &'static str = "Height";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        *self = Self {
            when: node.read_record("when")?,
            value: node.read_record("value")?,
        };
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        require(Self::RECORD, "when", &self.when)?.ensure_complete()?;
        require(Self::RECORD, "value", &self.value)?.ensure_complete()
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        sink.record("when", require(Self::RECORD, "when", &self.when)?)?;
        sink.record("value", require(Self::RECORD, "value", &self.value)?)
    }
}

impl Thing for Height {
    const TYPE_ID: Uuid = Uuid::from_u128(0x40750a6a_89b2_455c_bd8d_b420a4cb500b);
    const TYPE_NAME: &'static str = "Height";
    const ROOT_ELEMENT: &'static str = "height";

    fn summary(&self) -> String {
        self.value.as_ref().map(ToString::to_string).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hrecord_binding::{Error, FixedClock};
    use hrecord_types::DisplayValue;

    #[test]
    fn round_trip_keeps_display_value() {
        let clock = FixedClock(
            NaiveDate::from_ymd_opt(2021, 1, 2)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        );
        let length = Length::with_display(1.8, DisplayValue::new(180.0, "cm").unwrap()).unwrap();
        let height = Height::new(&clock, length).unwrap();
        let xml = height.to_xml().unwrap();
        assert!(xml.contains(r#"<value><m>1.8</m><display units="cm">180</display></value>"#));
        assert_eq!(Height::from_xml(&xml).unwrap(), height);
        assert_eq!(height.summary(), "180 cm");
    }

    #[test]
    fn value_is_mandatory() {
        let mut height = Height::default();
        height.set_when(HealthServiceDateTime::new(
            hrecord_types::HealthServiceDate::new(2021, 1, 2).unwrap(),
        ));
        let err = height.to_xml().unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Binding(Error::MissingMandatory { field: "value", .. })
        ));
    }
}
