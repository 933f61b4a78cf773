//! Calendar dates: partially specified ([`ApproximateDate`]) and exact
//! ([`HealthServiceDate`]).

use chrono::{Datelike, NaiveDate};
use hrecord_binding::validate::{ensure_optional_range, ensure_range};
use hrecord_binding::{compare_optional, require, Bindable, Error, Result, XmlNode, XmlSink};
use std::cmp::Ordering;
use std::fmt;

pub(crate) const MIN_YEAR: i32 = 1000;
pub(crate) const MAX_YEAR: i32 = 9999;

fn check_year(year: i32) -> Result<i32> {
    ensure_range("year", year, MIN_YEAR, MAX_YEAR)
}

fn check_month(month: Option<i32>) -> Result<Option<i32>> {
    ensure_optional_range("month", month, 1, 12)
}

fn check_day(day: Option<i32>) -> Result<Option<i32>> {
    ensure_optional_range("day", day, 1, 31)
}

/// A date known to year, month or day precision.
///
/// Ordering compares year, then month, then day; an unset component sorts
/// before any set one, so `2020` < `2020-05` < `2020-05-01`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ApproximateDate {
    year: Option<i32>,
    month: Option<i32>,
    day: Option<i32>,
}

impl ApproximateDate {
    pub fn new(year: i32) -> Result<Self> {
        Self::from_parts(year, None, None)
    }

    pub fn with_month(year: i32, month: i32) -> Result<Self> {
        Self::from_parts(year, Some(month), None)
    }

    pub fn with_day(year: i32, month: i32, day: i32) -> Result<Self> {
        Self::from_parts(year, Some(month), Some(day))
    }

    pub fn from_parts(year: i32, month: Option<i32>, day: Option<i32>) -> Result<Self> {
        Self::validated(Some(year), month, day)
    }

    pub fn from_date(date: NaiveDate) -> Result<Self> {
        check_year(date.year())?;
        Ok(Self::unchecked(date))
    }

    fn unchecked(date: NaiveDate) -> Self {
        Self {
            year: Some(date.year()),
            month: Some(date.month() as i32),
            day: Some(date.day() as i32),
        }
    }

    fn validated(year: Option<i32>, month: Option<i32>, day: Option<i32>) -> Result<Self> {
        let year = year.map(check_year).transpose()?;
        let month = check_month(month)?;
        let day = check_day(day)?;
        if day.is_some() && month.is_none() {
            return Err(Error::InvalidArgument {
                field: "day",
                reason: "cannot be set without a month",
            });
        }
        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn month(&self) -> Option<i32> {
        self.month
    }

    pub fn day(&self) -> Option<i32> {
        self.day
    }

    pub fn set_year(&mut self, year: i32) -> Result<()> {
        self.year = Some(check_year(year)?);
        Ok(())
    }

    /// Sets or clears the month. Clearing the month also clears the day.
    pub fn set_month(&mut self, month: Option<i32>) -> Result<()> {
        self.month = check_month(month)?;
        if self.month.is_none() {
            self.day = None;
        }
        Ok(())
    }

    pub fn set_day(&mut self, day: Option<i32>) -> Result<()> {
        let day = check_day(day)?;
        if day.is_some() && self.month.is_none() {
            return Err(Error::InvalidArgument {
                field: "day",
                reason: "cannot be set without a month",
            });
        }
        self.day = day;
        Ok(())
    }

    /// The exact date, when every component is set and forms a real date.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month? as u32, self.day? as u32)
    }

    /// Orders this value against an exact calendar date.
    ///
    /// Unset components compare as less than the date's component.
    pub fn compare_to_date(&self, date: &NaiveDate) -> Ordering {
        self.cmp(&Self::unchecked(*date))
    }
}

impl Ord for ApproximateDate {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_optional(self.year.as_ref(), other.year.as_ref())
            .then_with(|| compare_optional(self.month.as_ref(), other.month.as_ref()))
            .then_with(|| compare_optional(self.day.as_ref(), other.day.as_ref()))
    }
}

impl PartialOrd for ApproximateDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ApproximateDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(year) = self.year else {
            return Ok(());
        };
        write!(f, "{year:04}")?;
        if let Some(month) = self.month {
            write!(f, "-{month:02}")?;
            if let Some(day) = self.day {
                write!(f, "-{day:02}")?;
            }
        }
        Ok(())
    }
}

impl Bindable for ApproximateDate {
    const RECORD: &'static str = "ApproximateDate";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        *self = Self::validated(node.read("y")?, node.read("m")?, node.read("d")?)?;
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        require(Self::RECORD, "y", &self.year)?;
        Ok(())
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        sink.element("y", require(Self::RECORD, "y", &self.year)?)?;
        sink.optional("m", self.month.as_ref())?;
        sink.optional("d", self.day.as_ref())
    }
}

/// A calendar date with year, month and day all required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HealthServiceDate {
    year: Option<i32>,
    month: Option<i32>,
    day: Option<i32>,
}

impl HealthServiceDate {
    pub fn new(year: i32, month: i32, day: i32) -> Result<Self> {
        let mut date = Self::default();
        date.set_year(year)?;
        date.set_month(month)?;
        date.set_day(day)?;
        Ok(date)
    }

    pub fn from_date(date: NaiveDate) -> Result<Self> {
        check_year(date.year())?;
        Ok(Self::unchecked(date))
    }

    fn unchecked(date: NaiveDate) -> Self {
        Self {
            year: Some(date.year()),
            month: Some(date.month() as i32),
            day: Some(date.day() as i32),
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn month(&self) -> Option<i32> {
        self.month
    }

    pub fn day(&self) -> Option<i32> {
        self.day
    }

    pub fn set_year(&mut self, year: i32) -> Result<()> {
        self.year = Some(check_year(year)?);
        Ok(())
    }

    pub fn set_month(&mut self, month: i32) -> Result<()> {
        self.month = Some(ensure_range("month", month, 1, 12)?);
        Ok(())
    }

    pub fn set_day(&mut self, day: i32) -> Result<()> {
        self.day = Some(ensure_range("day", day, 1, 31)?);
        Ok(())
    }

    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month? as u32, self.day? as u32)
    }

    pub fn compare_to_date(&self, date: &NaiveDate) -> Ordering {
        self.cmp(&Self::unchecked(*date))
    }
}

impl Ord for HealthServiceDate {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_optional(self.year.as_ref(), other.year.as_ref())
            .then_with(|| compare_optional(self.month.as_ref(), other.month.as_ref()))
            .then_with(|| compare_optional(self.day.as_ref(), other.day.as_ref()))
    }
}

impl PartialOrd for HealthServiceDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HealthServiceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.year, self.month, self.day) {
            (Some(y), Some(m), Some(d)) => write!(f, "{y:04}-{m:02}-{d:02}"),
            _ => Ok(()),
        }
    }
}

impl Bindable for HealthServiceDate {
    const RECORD: &'static str = "HealthServiceDate";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        let mut parsed = Self::default();
        if let Some(year) = node.read("y")? {
            parsed.set_year(year)?;
        }
        if let Some(month) = node.read("m")? {
            parsed.set_month(month)?;
        }
        if let Some(day) = node.read("d")? {
            parsed.set_day(day)?;
        }
        *self = parsed;
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        require(Self::RECORD, "y", &self.year)?;
        require(Self::RECORD, "m", &self.month)?;
        require(Self::RECORD, "d", &self.day)?;
        Ok(())
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        sink.element("y", require(Self::RECORD, "y", &self.year)?)?;
        sink.element("m", require(Self::RECORD, "m", &self.month)?)?;
        sink.element("d", require(Self::RECORD, "d", &self.day)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrecord_binding::{from_xml_str, to_xml_string, WriteSettings};

    #[test]
    fn year_bounds_are_inclusive() {
        assert!(ApproximateDate::new(1000).is_ok());
        assert!(ApproximateDate::new(9999).is_ok());

        let err = ApproximateDate::new(999).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { field: "year", .. }));
        assert!(ApproximateDate::new(10000).is_err());
    }

    #[test]
    fn month_and_day_ranges() {
        assert!(ApproximateDate::with_month(2020, 0).is_err());
        assert!(ApproximateDate::with_month(2020, 13).is_err());
        assert!(ApproximateDate::with_day(2020, 1, 32).is_err());
        assert!(ApproximateDate::with_day(2020, 12, 31).is_ok());
    }

    #[test]
    fn day_requires_month() {
        let mut date = ApproximateDate::new(2020).unwrap();
        assert!(date.set_day(Some(3)).is_err());

        date.set_month(Some(4)).unwrap();
        date.set_day(Some(3)).unwrap();
        date.set_month(None).unwrap();
        assert_eq!(date.day(), None);
    }

    #[test]
    fn failed_set_keeps_previous_value() {
        let mut date = ApproximateDate::with_month(2020, 5).unwrap();
        assert!(date.set_month(Some(14)).is_err());
        assert_eq!(date.month(), Some(5));
    }

    #[test]
    fn unset_month_is_omitted_and_stays_unset() {
        let date = ApproximateDate::new(2020).unwrap();
        let xml = to_xml_string(&date, "date", &WriteSettings::default()).unwrap();
        assert_eq!(xml, "<date><y>2020</y></date>");

        let back: ApproximateDate = from_xml_str(&xml, "date").unwrap();
        assert_eq!(back.month(), None);
        assert_eq!(back, date);
    }

    #[test]
    fn ordering_treats_unset_as_earlier() {
        let year_only = ApproximateDate::new(2020).unwrap();
        let with_month = ApproximateDate::with_month(2020, 5).unwrap();
        assert!(year_only < with_month);

        let tenth = ApproximateDate::with_day(2020, 5, 10).unwrap();
        let ninth = ApproximateDate::with_day(2020, 5, 9).unwrap();
        assert!(tenth > ninth);
        assert!(with_month < ninth);
    }

    #[test]
    fn compares_against_exact_dates() {
        let date = NaiveDate::from_ymd_opt(2020, 5, 10).unwrap();
        assert_eq!(
            ApproximateDate::with_day(2020, 5, 10)
                .unwrap()
                .compare_to_date(&date),
            Ordering::Equal
        );
        assert_eq!(
            ApproximateDate::with_month(2020, 5)
                .unwrap()
                .compare_to_date(&date),
            Ordering::Less
        );
        assert_eq!(
            ApproximateDate::new(2021).unwrap().compare_to_date(&date),
            Ordering::Greater
        );
    }

    #[test]
    fn display_follows_precision() {
        assert_eq!(ApproximateDate::new(2020).unwrap().to_string(), "2020");
        assert_eq!(
            ApproximateDate::with_day(2020, 5, 1).unwrap().to_string(),
            "2020-05-01"
        );
    }

    #[test]
    fn service_date_requires_all_parts() {
        let mut date = HealthServiceDate::default();
        date.set_year(2021).unwrap();
        let err = to_xml_string(&date, "date", &WriteSettings::default()).unwrap_err();
        assert!(matches!(err, Error::MissingMandatory { field: "m", .. }));

        let date = HealthServiceDate::new(2021, 3, 4).unwrap();
        let xml = to_xml_string(&date, "date", &WriteSettings::default()).unwrap();
        assert_eq!(xml, "<date><y>2021</y><m>3</m><d>4</d></date>");
        assert_eq!(from_xml_str::<HealthServiceDate>(&xml, "date").unwrap(), date);
    }

    #[test]
    fn out_of_range_xml_is_rejected() {
        let err = from_xml_str::<ApproximateDate>("<date><y>999</y></date>", "date").unwrap_err();
        assert!(err.is_validation());
    }
}
