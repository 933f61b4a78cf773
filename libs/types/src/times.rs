//! Time of day with optional second and millisecond precision.

use chrono::{NaiveTime, Timelike};
use hrecord_binding::validate::{ensure_optional_range, ensure_range};
use hrecord_binding::{compare_optional, require, Bindable, Result, XmlNode, XmlSink};
use std::cmp::Ordering;
use std::fmt;

/// A time of day. Hour and minute are mandatory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ApproximateTime {
    hour: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
    millisecond: Option<u32>,
}

impl ApproximateTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        let mut time = Self::default();
        time.set_hour(hour)?;
        time.set_minute(minute)?;
        Ok(time)
    }

    pub fn with_seconds(hour: u32, minute: u32, second: u32) -> Result<Self> {
        let mut time = Self::new(hour, minute)?;
        time.set_second(Some(second))?;
        Ok(time)
    }

    pub fn from_time(time: NaiveTime) -> Self {
        let millis = time.nanosecond() / 1_000_000;
        Self {
            hour: Some(time.hour()),
            minute: Some(time.minute()),
            second: Some(time.second()),
            // leap-second nanos go past 999ms
            millisecond: Some(millis.min(999)),
        }
    }

    pub fn hour(&self) -> Option<u32> {
        self.hour
    }

    pub fn minute(&self) -> Option<u32> {
        self.minute
    }

    pub fn second(&self) -> Option<u32> {
        self.second
    }

    pub fn millisecond(&self) -> Option<u32> {
        self.millisecond
    }

    pub fn set_hour(&mut self, hour: u32) -> Result<()> {
        self.hour = Some(ensure_range("hour", hour, 0, 23)?);
        Ok(())
    }

    pub fn set_minute(&mut self, minute: u32) -> Result<()> {
        self.minute = Some(ensure_range("minute", minute, 0, 59)?);
        Ok(())
    }

    pub fn set_second(&mut self, second: Option<u32>) -> Result<()> {
        self.second = ensure_optional_range("second", second, 0, 59)?;
        Ok(())
    }

    pub fn set_millisecond(&mut self, millisecond: Option<u32>) -> Result<()> {
        self.millisecond = ensure_optional_range("millisecond", millisecond, 0, 999)?;
        Ok(())
    }

    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_milli_opt(
            self.hour?,
            self.minute?,
            self.second.unwrap_or(0),
            self.millisecond.unwrap_or(0),
        )
    }

    /// Orders this value against an exact time; unset components sort first.
    pub fn compare_to_time(&self, time: &NaiveTime) -> Ordering {
        self.cmp(&Self::from_time(*time))
    }
}

impl Ord for ApproximateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_optional(self.hour.as_ref(), other.hour.as_ref())
            .then_with(|| compare_optional(self.minute.as_ref(), other.minute.as_ref()))
            .then_with(|| compare_optional(self.second.as_ref(), other.second.as_ref()))
            .then_with(|| {
                compare_optional(self.millisecond.as_ref(), other.millisecond.as_ref())
            })
    }
}

impl PartialOrd for ApproximateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ApproximateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Some(hour), Some(minute)) = (self.hour, self.minute) else {
            return Ok(());
        };
        write!(f, "{hour:02}:{minute:02}")?;
        if let Some(second) = self.second {
            write!(f, ":{second:02}")?;
            if let Some(ms) = self.millisecond {
                write!(f, ".{ms:03}")?;
            }
        }
        Ok(())
    }
}

impl Bindable for ApproximateTime {
    const RECORD: &'static str = "ApproximateTime";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        let mut parsed = Self::default();
        if let Some(hour) = node.read("h")? {
            parsed.set_hour(hour)?;
        }
        if let Some(minute) = node.read("m")? {
            parsed.set_minute(minute)?;
        }
        parsed.set_second(node.read("s")?)?;
        parsed.set_millisecond(node.read("f")?)?;
        *self = parsed;
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        require(Self::RECORD, "h", &self.hour)?;
        require(Self::RECORD, "m", &self.minute)?;
        Ok(())
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        sink.element("h", require(Self::RECORD, "h", &self.hour)?)?;
        sink.element("m", require(Self::RECORD, "m", &self.minute)?)?;
        sink.optional("s", self.second.as_ref())?;
        sink.optional("f", self.millisecond.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrecord_binding::{from_xml_str, to_xml_string, Error, WriteSettings};

    #[test]
    fn components_are_range_checked() {
        assert!(ApproximateTime::new(24, 0).is_err());
        assert!(ApproximateTime::new(23, 60).is_err());
        assert!(ApproximateTime::with_seconds(23, 59, 60).is_err());

        let mut time = ApproximateTime::new(0, 0).unwrap();
        assert!(time.set_millisecond(Some(1000)).is_err());
        time.set_millisecond(Some(999)).unwrap();
    }

    #[test]
    fn unset_seconds_sort_first() {
        let minute = ApproximateTime::new(8, 30).unwrap();
        let second = ApproximateTime::with_seconds(8, 30, 0).unwrap();
        assert!(minute < second);
        assert!(ApproximateTime::new(9, 0).unwrap() > second);
    }

    #[test]
    fn xml_round_trip_omits_unset_parts() {
        let time = ApproximateTime::with_seconds(7, 5, 9).unwrap();
        let xml = to_xml_string(&time, "time", &WriteSettings::default()).unwrap();
        assert_eq!(xml, "<time><h>7</h><m>5</m><s>9</s></time>");
        assert_eq!(from_xml_str::<ApproximateTime>(&xml, "time").unwrap(), time);
    }

    #[test]
    fn minute_is_mandatory_on_write() {
        let mut time = ApproximateTime::default();
        time.set_hour(7).unwrap();
        let err = to_xml_string(&time, "time", &WriteSettings::default()).unwrap_err();
        assert!(matches!(err, Error::MissingMandatory { field: "m", .. }));
    }

    #[test]
    fn converts_from_chrono() {
        let naive = NaiveTime::from_hms_milli_opt(13, 45, 30, 250).unwrap();
        let time = ApproximateTime::from_time(naive);
        assert_eq!(time.to_string(), "13:45:30.250");
        assert_eq!(time.to_naive_time(), Some(naive));
        assert_eq!(time.compare_to_time(&naive), Ordering::Equal);
    }
}
