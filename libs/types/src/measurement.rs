//! Measured quantities and their display form.

use hrecord_binding::validate::{ensure_at_least, ensure_optional_text, ensure_text};
use hrecord_binding::{require, Bindable, Error, Result, TextPolicy, XmlNode, XmlSink};
use std::fmt;

/// A value as the user entered it, with the units it was entered in.
///
/// ```xml
/// <display units="ft" units-code="ft">6</display>
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayValue {
    value: f64,
    units: Option<String>,
    units_code: Option<String>,
}

impl DisplayValue {
    pub fn new(value: f64, units: impl Into<String>) -> Result<Self> {
        let mut display = Self::default();
        display.set_value(value)?;
        display.set_units(units)?;
        Ok(display)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    pub fn units_code(&self) -> Option<&str> {
        self.units_code.as_deref()
    }

    pub fn set_value(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::InvalidArgument {
                field: "display",
                reason: "must be a finite number",
            });
        }
        self.value = value;
        Ok(())
    }

    pub fn set_units(&mut self, units: impl Into<String>) -> Result<()> {
        self.units = Some(ensure_text("units", units.into(), TextPolicy::NotWhitespace)?);
        Ok(())
    }

    pub fn set_units_code(&mut self, units_code: Option<String>) -> Result<()> {
        self.units_code = ensure_optional_text("units-code", units_code, TextPolicy::NotWhitespace)?;
        Ok(())
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.units {
            Some(units) => write!(f, "{} {}", self.value, units),
            None => write!(f, "{}", self.value),
        }
    }
}

impl Bindable for DisplayValue {
    const RECORD: &'static str = "DisplayValue";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        let mut parsed = Self::default();
        parsed.set_value(node.value()?)?;
        if let Some(units) = node.attribute("units") {
            parsed.set_units(units)?;
        }
        parsed.set_units_code(node.attribute("units-code").map(str::to_string))?;
        *self = parsed;
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        require(Self::RECORD, "units", &self.units)?;
        Ok(())
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attributes = Vec::with_capacity(2);
        if let Some(units) = &self.units {
            attributes.push(("units", units.clone()));
        }
        if let Some(code) = &self.units_code {
            attributes.push(("units-code", code.clone()));
        }
        attributes
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        sink.text(&self.value.to_string())
    }
}

/// A length in meters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Length {
    meters: Option<f64>,
    display: Option<DisplayValue>,
}

impl Length {
    pub fn new(meters: f64) -> Result<Self> {
        let mut length = Self::default();
        length.set_meters(meters)?;
        Ok(length)
    }

    pub fn with_display(meters: f64, display: DisplayValue) -> Result<Self> {
        let mut length = Self::new(meters)?;
        length.display = Some(display);
        Ok(length)
    }

    pub fn meters(&self) -> Option<f64> {
        self.meters
    }

    pub fn display(&self) -> Option<&DisplayValue> {
        self.display.as_ref()
    }

    pub fn set_meters(&mut self, meters: f64) -> Result<()> {
        if !meters.is_finite() {
            return Err(Error::InvalidArgument {
                field: "m",
                reason: "must be a finite number",
            });
        }
        self.meters = Some(ensure_at_least("m", meters, 0.0)?);
        Ok(())
    }

    pub fn set_display(&mut self, display: Option<DisplayValue>) {
        self.display = display;
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.display, self.meters) {
            (Some(display), _) => write!(f, "{display}"),
            (None, Some(meters)) => write!(f, "{meters} m"),
            (None, None) => Ok(()),
        }
    }
}

impl Bindable for Length {
    const RECORD: &'static str = "Length";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        let mut parsed = Self {
            meters: None,
            display: node.read_record("display")?,
        };
        if let Some(meters) = node.read("m")? {
            parsed.set_meters(meters)?;
        }
        *self = parsed;
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        require(Self::RECORD, "m", &self.meters)?;
        if let Some(display) = &self.display {
            display.ensure_complete()?;
        }
        Ok(())
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        sink.element("m", require(Self::RECORD, "m", &self.meters)?)?;
        sink.optional_record("display", self.display.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrecord_binding::{from_xml_str, to_xml_string, WriteSettings};

    #[test]
    fn display_value_uses_attributes() {
        let mut display = DisplayValue::new(6.0, "ft").unwrap();
        display.set_units_code(Some("ft_i".into())).unwrap();
        let xml = to_xml_string(&display, "display", &WriteSettings::default()).unwrap();
        assert_eq!(xml, r#"<display units="ft" units-code="ft_i">6</display>"#);
        assert_eq!(from_xml_str::<DisplayValue>(&xml, "display").unwrap(), display);
    }

    #[test]
    fn display_value_requires_numeric_text() {
        let err = from_xml_str::<DisplayValue>(r#"<display units="ft">six</display>"#, "display")
            .unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn length_rejects_negative_values() {
        assert!(Length::new(-0.1).is_err());
        assert!(Length::new(f64::NAN).is_err());
        assert!(Length::new(0.0).is_ok());
    }

    #[test]
    fn length_round_trip() {
        let length = Length::with_display(1.8288, DisplayValue::new(6.0, "ft").unwrap()).unwrap();
        let xml = to_xml_string(&length, "value", &WriteSettings::default()).unwrap();
        assert_eq!(
            xml,
            r#"<value><m>1.8288</m><display units="ft">6</display></value>"#
        );
        assert_eq!(from_xml_str::<Length>(&xml, "value").unwrap(), length);
        assert_eq!(length.to_string(), "6 ft");
    }
}
