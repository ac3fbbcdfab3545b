//! Calendar values: dates, date-times and times of day.
//!
//! Typst builds all three shapes with the same `datetime(..)` constructor, keyed by
//! which components are present. The core never looks inside a calendar library's
//! types; instead the embedding application implements [`CalendarValue`] to say
//! which of the three shapes a value is. Implementations for chrono's naive types
//! and `DateTime<Tz>` are provided.
//!
//! ## Serde integration
//!
//! chrono serializes dates as strings, which would come out as Typst strings. Mark a
//! field with [`serialize`] (or [`serialize_option`]) to keep it a `datetime`:
//!
//! ```rust
//! use chrono::NaiveDate;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Invoice {
//!     #[serde(serialize_with = "serde_typst::calendar::serialize")]
//!     issued: NaiveDate,
//! }
//!
//! let invoice = Invoice { issued: NaiveDate::from_ymd_opt(2023, 10, 1).unwrap() };
//! assert_eq!(
//!     serde_typst::to_string(&invoice).unwrap(),
//!     r#"("issued":datetime(year:2023,month:10,day:1))"#
//! );
//! ```
//!
//! The calendar types serialize through reserved struct names. Other serde formats
//! see an ordinary struct such as `{"year":2023,"month":10,"day":1}`.

use crate::{Error, Record, Result, Value};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

pub(crate) const DATE_MARKER: &str = "$serde_typst::private::CalendarDate";
pub(crate) const DATETIME_MARKER: &str = "$serde_typst::private::CalendarDateTime";
pub(crate) const TIME_MARKER: &str = "$serde_typst::private::CalendarTime";

/// A calendar date without a time of day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// A calendar date with a time of day, at whole-second precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CalendarDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// A time of day without a date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CalendarTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CalendarDate {
    #[must_use]
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        CalendarDate { year, month, day }
    }
}

impl CalendarDateTime {
    #[must_use]
    pub const fn new(date: CalendarDate, time: CalendarTime) -> Self {
        CalendarDateTime {
            year: date.year,
            month: date.month,
            day: date.day,
            hour: time.hour,
            minute: time.minute,
            second: time.second,
        }
    }

    #[must_use]
    pub const fn date(&self) -> CalendarDate {
        CalendarDate::new(self.year, self.month, self.day)
    }

    #[must_use]
    pub const fn time(&self) -> CalendarTime {
        CalendarTime::new(self.hour, self.minute, self.second)
    }
}

impl CalendarTime {
    #[must_use]
    pub const fn new(hour: u32, minute: u32, second: u32) -> Self {
        CalendarTime {
            hour,
            minute,
            second,
        }
    }
}

/// One of the three calendar shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Calendar {
    Date(CalendarDate),
    DateTime(CalendarDateTime),
    Time(CalendarTime),
}

/// Marks a type as a calendar value and exposes its numeric components.
///
/// Implement this for a calendar library's types to serialize them as Typst
/// `datetime` literals.
///
/// # Examples
///
/// ```rust
/// use serde_typst::calendar::{Calendar, CalendarTime, CalendarValue};
/// use serde_typst::{value_to_string, Value};
///
/// struct Alarm { minutes_after_midnight: u32 }
///
/// impl CalendarValue for Alarm {
///     fn to_calendar(&self) -> Calendar {
///         let m = self.minutes_after_midnight;
///         Calendar::Time(CalendarTime::new(m / 60, m % 60, 0))
///     }
/// }
///
/// let value = Value::from_calendar(&Alarm { minutes_after_midnight: 390 });
/// assert_eq!(value_to_string(&value).unwrap(), "datetime(hour:6,minute:30,second:0)");
/// ```
pub trait CalendarValue {
    fn to_calendar(&self) -> Calendar;
}

impl CalendarValue for Calendar {
    fn to_calendar(&self) -> Calendar {
        *self
    }
}

impl CalendarValue for CalendarDate {
    fn to_calendar(&self) -> Calendar {
        Calendar::Date(*self)
    }
}

impl CalendarValue for CalendarDateTime {
    fn to_calendar(&self) -> Calendar {
        Calendar::DateTime(*self)
    }
}

impl CalendarValue for CalendarTime {
    fn to_calendar(&self) -> Calendar {
        Calendar::Time(*self)
    }
}

impl CalendarValue for NaiveDate {
    fn to_calendar(&self) -> Calendar {
        Calendar::Date(CalendarDate::from(*self))
    }
}

impl CalendarValue for NaiveDateTime {
    fn to_calendar(&self) -> Calendar {
        Calendar::DateTime(CalendarDateTime::from(*self))
    }
}

impl CalendarValue for NaiveTime {
    fn to_calendar(&self) -> Calendar {
        Calendar::Time(CalendarTime::from(*self))
    }
}

// Wall-clock fields in the value's own offset.
impl<Tz: TimeZone> CalendarValue for DateTime<Tz> {
    fn to_calendar(&self) -> Calendar {
        Calendar::DateTime(CalendarDateTime::from(self.naive_local()))
    }
}

impl<T: CalendarValue + ?Sized> CalendarValue for &T {
    fn to_calendar(&self) -> Calendar {
        (**self).to_calendar()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        CalendarDate::new(date.year(), date.month(), date.day())
    }
}

impl From<NaiveTime> for CalendarTime {
    // Sub-second precision is truncated, never rounded.
    fn from(time: NaiveTime) -> Self {
        CalendarTime::new(time.hour(), time.minute(), time.second())
    }
}

impl From<NaiveDateTime> for CalendarDateTime {
    fn from(datetime: NaiveDateTime) -> Self {
        CalendarDateTime::new(datetime.date().into(), datetime.time().into())
    }
}

impl From<Calendar> for Value {
    fn from(calendar: Calendar) -> Self {
        match calendar {
            Calendar::Date(date) => Value::Date(date),
            Calendar::DateTime(datetime) => Value::DateTime(datetime),
            Calendar::Time(time) => Value::Time(time),
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl fmt::Display for CalendarDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date(), self.time())
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct(DATE_MARKER, 3)?;
        s.serialize_field("year", &self.year)?;
        s.serialize_field("month", &self.month)?;
        s.serialize_field("day", &self.day)?;
        s.end()
    }
}

impl Serialize for CalendarDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct(DATETIME_MARKER, 6)?;
        s.serialize_field("year", &self.year)?;
        s.serialize_field("month", &self.month)?;
        s.serialize_field("day", &self.day)?;
        s.serialize_field("hour", &self.hour)?;
        s.serialize_field("minute", &self.minute)?;
        s.serialize_field("second", &self.second)?;
        s.end()
    }
}

impl Serialize for CalendarTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct(TIME_MARKER, 3)?;
        s.serialize_field("hour", &self.hour)?;
        s.serialize_field("minute", &self.minute)?;
        s.serialize_field("second", &self.second)?;
        s.end()
    }
}

impl Serialize for Calendar {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Calendar::Date(date) => date.serialize(serializer),
            Calendar::DateTime(datetime) => datetime.serialize(serializer),
            Calendar::Time(time) => time.serialize(serializer),
        }
    }
}

/// Serializes any [`CalendarValue`] as a Typst `datetime`.
///
/// Use with `#[serde(serialize_with = "serde_typst::calendar::serialize")]`.
pub fn serialize<T, S>(value: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    T: CalendarValue,
    S: Serializer,
{
    value.to_calendar().serialize(serializer)
}

/// Like [`serialize`], for optional fields. `None` serializes as a unit.
pub fn serialize_option<T, S>(
    value: &Option<T>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    T: CalendarValue,
    S: Serializer,
{
    match value {
        Some(value) => serializer.serialize_some(&value.to_calendar()),
        None => serializer.serialize_none(),
    }
}

/// Rebuilds a calendar value from the fields collected for a reserved struct name.
///
/// Returns `None` when `name` is not one of the calendar markers.
pub(crate) fn from_marker(name: &str, fields: &Record) -> Option<Result<Value>> {
    let calendar = match name {
        DATE_MARKER => date_from(fields).map(Calendar::Date),
        DATETIME_MARKER => {
            date_from(fields).and_then(|date| {
                time_from(fields).map(|time| Calendar::DateTime(CalendarDateTime::new(date, time)))
            })
        }
        TIME_MARKER => time_from(fields).map(Calendar::Time),
        _ => return None,
    };
    Some(calendar.map(Value::from))
}

fn date_from(fields: &Record) -> Result<CalendarDate> {
    Ok(CalendarDate::new(
        field(fields, "year")?,
        field(fields, "month")?,
        field(fields, "day")?,
    ))
}

fn time_from(fields: &Record) -> Result<CalendarTime> {
    Ok(CalendarTime::new(
        field(fields, "hour")?,
        field(fields, "minute")?,
        field(fields, "second")?,
    ))
}

fn field<T: TryFrom<i64>>(fields: &Record, name: &str) -> Result<T> {
    let raw = fields
        .get(name)
        .and_then(Value::as_i64)
        .ok_or_else(|| Error::invalid_calendar(&format!("missing numeric field `{}`", name)))?;
    T::try_from(raw)
        .map_err(|_| Error::invalid_calendar(&format!("field `{}` out of range: {}", name, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chrono_datetime_truncates_fraction() {
        let datetime = NaiveDate::from_ymd_opt(2025, 5, 15)
            .unwrap()
            .and_hms_milli_opt(10, 21, 25, 648)
            .unwrap();
        assert_eq!(
            datetime.to_calendar(),
            Calendar::DateTime(CalendarDateTime {
                year: 2025,
                month: 5,
                day: 15,
                hour: 10,
                minute: 21,
                second: 25,
            })
        );
    }

    #[test]
    fn test_zoned_datetime_uses_local_fields() {
        let offset = chrono::FixedOffset::east_opt(2 * 3600).unwrap();
        let zoned = offset.with_ymd_and_hms(2023, 10, 1, 12, 34, 56).unwrap();
        assert_eq!(
            zoned.to_calendar(),
            Calendar::DateTime(CalendarDateTime::new(
                CalendarDate::new(2023, 10, 1),
                CalendarTime::new(12, 34, 56)
            ))
        );
    }

    #[test]
    fn test_from_marker() {
        let mut fields = Record::new();
        fields.insert("hour".to_string(), Value::from(7));
        fields.insert("minute".to_string(), Value::from(5));
        fields.insert("second".to_string(), Value::from(0));

        let value = from_marker(TIME_MARKER, &fields).unwrap().unwrap();
        assert_eq!(value, Value::Time(CalendarTime::new(7, 5, 0)));

        assert!(from_marker("Point", &fields).is_none());
        assert!(matches!(
            from_marker(DATE_MARKER, &fields),
            Some(Err(Error::InvalidCalendar(_)))
        ));
    }

    #[test]
    fn test_negative_month_is_rejected() {
        let mut fields = Record::new();
        fields.insert("year".to_string(), Value::from(2020));
        fields.insert("month".to_string(), Value::from(-1));
        fields.insert("day".to_string(), Value::from(1));
        assert!(matches!(
            from_marker(DATE_MARKER, &fields),
            Some(Err(Error::InvalidCalendar(_)))
        ));
    }

    #[test]
    fn test_display() {
        let datetime =
            CalendarDateTime::new(CalendarDate::new(2023, 1, 2), CalendarTime::new(3, 4, 5));
        assert_eq!(datetime.to_string(), "2023-01-02T03:04:05");
    }
}
