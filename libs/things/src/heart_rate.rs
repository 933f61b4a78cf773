//! Heart rate measurement.

use crate::thing::Thing;
use hrecord_binding::validate::ensure_at_least;
use hrecord_binding::{require, Bindable, Clock, Result, XmlNode, XmlSink};
use hrecord_types::{CodableValue, HealthServiceDateTime};
use uuid::Uuid;

/// Beats per minute, measured at `when`.
///
/// ```xml
/// <heart-rate>
///   <when>...</when>
///   <value>72</value>
///   <measurement-method>...</measurement-method>
///   <measurement-conditions>...</measurement-conditions>
///   <measurement-flags>...</measurement-flags>
/// </heart-rate>
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeartRate {
    when: Option<HealthServiceDateTime>,
    value: Option<i32>,
    measurement_method: Option<CodableValue>,
    measurement_conditions: Option<CodableValue>,
    measurement_flags: Option<CodableValue>,
}

impl HeartRate {
    pub fn new(clock: &dyn Clock, value: i32) -> Result<Self> {
        Self::at(HealthServiceDateTime::now(clock)?, value)
    }

    pub fn at(when: HealthServiceDateTime, value: i32) -> Result<Self> {
        let mut heart_rate = Self {
            when: Some(when),
            ..Self::default()
        };
        heart_rate.set_value(value)?;
        Ok(heart_rate)
    }

    pub fn when(&self) -> Option<&HealthServiceDateTime> {
        self.when.as_ref()
    }

    pub fn value(&self) -> Option<i32> {
        self.value
    }

    pub fn measurement_method(&self) -> Option<&CodableValue> {
        self.measurement_method.as_ref()
    }

    pub fn measurement_conditions(&self) -> Option<&CodableValue> {
        self.measurement_conditions.as_ref()
    }

    pub fn measurement_flags(&self) -> Option<&CodableValue> {
        self.measurement_flags.as_ref()
    }

    pub fn set_when(&mut self, when: HealthServiceDateTime) {
        self.when = Some(when);
    }

    pub fn set_value(&mut self, value: i32) -> Result<()> {
        self.value = Some(ensure_at_least("value", value, 0)?);
        Ok(())
    }

    pub fn set_measurement_method(&mut self, method: Option<CodableValue>) {
        self.measurement_method = method;
    }

    pub fn set_measurement_conditions(&mut self, conditions: Option<CodableValue>) {
        self.measurement_conditions = conditions;
    }

    pub fn set_measurement_flags(&mut self, flags: Option<CodableValue>) {
        self.measurement_flags = flags;
    }

    fn coded_fields(&self) -> [(&'static str, Option<&CodableValue>); 3] {
        [
            ("measurement-method", self.measurement_method.as_ref()),
            ("measurement-conditions", self.measurement_conditions.as_ref()),
            ("measurement-flags", self.measurement_flags.as_ref()),
        ]
    }
}

impl Bindable for HeartRate {
    const RECORD: &'static str = "HeartRate";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        let mut parsed = Self {
            when: node.read_record("when")?,
            value: None,
            measurement_method: node.read_record("measurement-method")?,
            measurement_conditions: node.read_record("measurement-conditions")?,
            measurement_flags: node.read_record("measurement-flags")?,
        };
        if let Some(value) = node.read("value")? {
            parsed.set_value(value)?;
        }
        *self = parsed;
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        require(Self::RECORD, "when", &self.when)?.ensure_complete()?;
        require(Self::RECORD, "value", &self.value)?;
        for (_, coded) in self.coded_fields() {
            if let Some(coded) = coded {
                coded.ensure_complete()?;
            }
        }
        Ok(())
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        sink.record("when", require(Self::RECORD, "when", &self.when)?)?;
        sink.element("value", require(Self::RECORD, "value", &self.value)?)?;
        for (name, coded) in self.coded_fields() {
            sink.optional_record(name, coded)?;
        }
        Ok(())
    }
}

impl Thing for HeartRate {
    const TYPE_ID: Uuid = Uuid::from_u128(0xb81eb4a6_6eac_4292_ae93_3872d6870994);
    const TYPE_NAME: &'static str = "Heart Rate";
    const ROOT_ELEMENT: &'static str = "heart-rate";

    fn summary(&self) -> String {
        match self.value {
            Some(value) => format!("{value} bpm"),
            None => String::new(),
        }
    }
}
