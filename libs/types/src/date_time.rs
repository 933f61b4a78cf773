//! Date-times built from the date and time types, plus date ranges.

use crate::coded::CodableValue;
use crate::dates::{ApproximateDate, HealthServiceDate};
use crate::times::ApproximateTime;
use chrono::NaiveDateTime;
use hrecord_binding::validate::ensure_text;
use hrecord_binding::{
    compare_optional, require, Bindable, Clock, Error, Result, TextPolicy, XmlNode, XmlSink,
};
use std::cmp::Ordering;
use std::fmt;

/// An exact service date with an optional time and time zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HealthServiceDateTime {
    date: Option<HealthServiceDate>,
    time: Option<ApproximateTime>,
    time_zone: Option<CodableValue>,
}

impl HealthServiceDateTime {
    pub fn new(date: HealthServiceDate) -> Self {
        Self {
            date: Some(date),
            time: None,
            time_zone: None,
        }
    }

    pub fn with_time(date: HealthServiceDate, time: ApproximateTime) -> Self {
        Self {
            date: Some(date),
            time: Some(time),
            time_zone: None,
        }
    }

    pub fn from_datetime(value: NaiveDateTime) -> Result<Self> {
        Ok(Self::with_time(
            HealthServiceDate::from_date(value.date())?,
            ApproximateTime::from_time(value.time()),
        ))
    }

    /// The current local date and time as read from `clock`.
    pub fn now(clock: &dyn Clock) -> Result<Self> {
        Self::from_datetime(clock.now())
    }

    pub fn date(&self) -> Option<&HealthServiceDate> {
        self.date.as_ref()
    }

    pub fn time(&self) -> Option<&ApproximateTime> {
        self.time.as_ref()
    }

    pub fn time_zone(&self) -> Option<&CodableValue> {
        self.time_zone.as_ref()
    }

    pub fn set_date(&mut self, date: HealthServiceDate) {
        self.date = Some(date);
    }

    pub fn set_time(&mut self, time: Option<ApproximateTime>) {
        self.time = time;
    }

    pub fn set_time_zone(&mut self, time_zone: Option<CodableValue>) {
        self.time_zone = time_zone;
    }

    /// Orders by date, then time. The time zone is not taken into account.
    pub fn compare(&self, other: &Self) -> Ordering {
        compare_optional(self.date.as_ref(), other.date.as_ref())
            .then_with(|| compare_optional(self.time.as_ref(), other.time.as_ref()))
    }

    pub fn compare_to_datetime(&self, value: &NaiveDateTime) -> Ordering {
        let date = match &self.date {
            Some(date) => date.compare_to_date(&value.date()),
            None => Ordering::Less,
        };
        date.then_with(|| match &self.time {
            Some(time) => time.compare_to_time(&value.time()),
            None => Ordering::Less,
        })
    }
}

impl fmt::Display for HealthServiceDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(date) = &self.date {
            write!(f, "{date}")?;
        }
        if let Some(time) = &self.time {
            write!(f, " {time}")?;
        }
        if let Some(tz) = &self.time_zone {
            write!(f, " {tz}")?;
        }
        Ok(())
    }
}

impl Bindable for HealthServiceDateTime {
    const RECORD: &'static str = "HealthServiceDateTime";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        *self = Self {
            date: node.read_record("date")?,
            time: node.read_record("time")?,
            time_zone: node.read_record("tz")?,
        };
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        require(Self::RECORD, "date", &self.date)?.ensure_complete()?;
        if let Some(time) = &self.time {
            time.ensure_complete()?;
        }
        if let Some(tz) = &self.time_zone {
            tz.ensure_complete()?;
        }
        Ok(())
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        sink.record("date", require(Self::RECORD, "date", &self.date)?)?;
        sink.optional_record("time", self.time.as_ref())?;
        sink.optional_record("tz", self.time_zone.as_ref())
    }
}

/// A date-time known to some precision, or a free-text description of one.
///
/// The structured and descriptive forms are exclusive: setting one clears the
/// other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ApproximateDateTime {
    date: Option<ApproximateDate>,
    time: Option<ApproximateTime>,
    time_zone: Option<CodableValue>,
    description: Option<String>,
}

impl ApproximateDateTime {
    pub fn new(date: ApproximateDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    pub fn with_time(date: ApproximateDate, time: ApproximateTime) -> Self {
        Self {
            date: Some(date),
            time: Some(time),
            ..Self::default()
        }
    }

    pub fn descriptive(description: impl Into<String>) -> Result<Self> {
        let mut value = Self::default();
        value.set_description(description)?;
        Ok(value)
    }

    pub fn from_datetime(value: NaiveDateTime) -> Result<Self> {
        Ok(Self::with_time(
            ApproximateDate::from_date(value.date())?,
            ApproximateTime::from_time(value.time()),
        ))
    }

    pub fn now(clock: &dyn Clock) -> Result<Self> {
        Self::from_datetime(clock.now())
    }

    pub fn date(&self) -> Option<&ApproximateDate> {
        self.date.as_ref()
    }

    pub fn time(&self) -> Option<&ApproximateTime> {
        self.time.as_ref()
    }

    pub fn time_zone(&self) -> Option<&CodableValue> {
        self.time_zone.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_structured(&self) -> bool {
        self.date.is_some()
    }

    pub fn set_date(&mut self, date: ApproximateDate) {
        self.date = Some(date);
        self.description = None;
    }

    /// Sets the time of a structured value.
    pub fn set_time(&mut self, time: Option<ApproximateTime>) -> Result<()> {
        if time.is_some() && self.date.is_none() {
            return Err(Error::InvalidArgument {
                field: "time",
                reason: "cannot be set without a date",
            });
        }
        self.time = time;
        Ok(())
    }

    pub fn set_time_zone(&mut self, time_zone: Option<CodableValue>) -> Result<()> {
        if time_zone.is_some() && self.date.is_none() {
            return Err(Error::InvalidArgument {
                field: "tz",
                reason: "cannot be set without a date",
            });
        }
        self.time_zone = time_zone;
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<()> {
        self.description = Some(ensure_text(
            "descriptive",
            description.into(),
            TextPolicy::NotWhitespace,
        )?);
        self.date = None;
        self.time = None;
        self.time_zone = None;
        Ok(())
    }

    /// Orders structured values by date then time; descriptive values sort
    /// before structured ones and among themselves by text.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (&self.date, &other.date) {
            (Some(l), Some(r)) => l
                .cmp(r)
                .then_with(|| compare_optional(self.time.as_ref(), other.time.as_ref())),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => compare_optional(self.description.as_ref(), other.description.as_ref()),
        }
    }

    /// Orders against an exact date-time. Descriptive values sort first.
    pub fn compare_to_datetime(&self, value: &NaiveDateTime) -> Ordering {
        let Some(date) = &self.date else {
            return Ordering::Less;
        };
        date.compare_to_date(&value.date())
            .then_with(|| match &self.time {
                Some(time) => time.compare_to_time(&value.time()),
                None => Ordering::Less,
            })
    }
}

impl fmt::Display for ApproximateDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(description) = &self.description {
            return f.write_str(description);
        }
        if let Some(date) = &self.date {
            write!(f, "{date}")?;
        }
        if let Some(time) = &self.time {
            write!(f, " {time}")?;
        }
        if let Some(tz) = &self.time_zone {
            write!(f, " {tz}")?;
        }
        Ok(())
    }
}

impl Bindable for ApproximateDateTime {
    const RECORD: &'static str = "ApproximateDateTime";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        let mut parsed = Self::default();
        if let Some(structured) = node.child("structured") {
            parsed.date = structured.read_record("date")?;
            parsed.time = structured.read_record("time")?;
            parsed.time_zone = structured.read_record("tz")?;
        } else if let Some(description) = node.read_text("descriptive") {
            parsed.set_description(description)?;
        }
        *self = parsed;
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        match &self.date {
            Some(date) => {
                date.ensure_complete()?;
                if let Some(time) = &self.time {
                    time.ensure_complete()?;
                }
                if let Some(tz) = &self.time_zone {
                    tz.ensure_complete()?;
                }
                Ok(())
            }
            None => {
                require(Self::RECORD, "structured", &self.description)?;
                Ok(())
            }
        }
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        match (&self.date, &self.description) {
            (Some(date), _) => {
                sink.start("structured")?;
                sink.record("date", date)?;
                sink.optional_record("time", self.time.as_ref())?;
                sink.optional_record("tz", self.time_zone.as_ref())?;
                sink.end("structured")
            }
            (None, Some(description)) => sink.text_element("descriptive", description),
            (None, None) => Err(Error::MissingMandatory {
                record: Self::RECORD,
                field: "structured",
            }),
        }
    }
}

/// A span of dates; the end is optional for ongoing spans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DurationValue {
    start: Option<ApproximateDate>,
    end: Option<ApproximateDate>,
}

impl DurationValue {
    pub fn new(start: ApproximateDate) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    pub fn between(start: ApproximateDate, end: ApproximateDate) -> Result<Self> {
        let mut duration = Self::new(start);
        duration.set_end(Some(end))?;
        Ok(duration)
    }

    pub fn start(&self) -> Option<&ApproximateDate> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&ApproximateDate> {
        self.end.as_ref()
    }

    pub fn set_start(&mut self, start: ApproximateDate) -> Result<()> {
        Self::check_order(Some(&start), self.end.as_ref())?;
        self.start = Some(start);
        Ok(())
    }

    pub fn set_end(&mut self, end: Option<ApproximateDate>) -> Result<()> {
        Self::check_order(self.start.as_ref(), end.as_ref())?;
        self.end = end;
        Ok(())
    }

    fn check_order(start: Option<&ApproximateDate>, end: Option<&ApproximateDate>) -> Result<()> {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(Error::InvalidArgument {
                    field: "end-date",
                    reason: "must not precede start-date",
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for DurationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = &self.start {
            write!(f, "{start}")?;
        }
        if let Some(end) = &self.end {
            write!(f, " - {end}")?;
        }
        Ok(())
    }
}

impl Bindable for DurationValue {
    const RECORD: &'static str = "DurationValue";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        let start: Option<ApproximateDate> = node.read_record("start-date")?;
        let end: Option<ApproximateDate> = node.read_record("end-date")?;
        Self::check_order(start.as_ref(), end.as_ref())?;
        *self = Self { start, end };
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        require(Self::RECORD, "start-date", &self.start)?.ensure_complete()?;
        if let Some(end) = &self.end {
            end.ensure_complete()?;
        }
        Ok(())
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        sink.record("start-date", require(Self::RECORD, "start-date", &self.start)?)?;
        sink.optional_record("end-date", self.end.as_ref())
    }
}
