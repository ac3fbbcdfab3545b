//! Dynamic value representation for Typst literal data.
//!
//! [`Value`] is a closed set of the kinds that can be written as Typst literals,
//! plus two kinds that exist only to be handled explicitly: [`Value::Absent`], a
//! record field that should be left out, and [`Value::Unsupported`], a host value
//! with no literal form.
//!
//! ## Core Types
//!
//! - [`Value`]: any serializable value
//! - [`Number`]: a 64-bit integer or a float, including NaN and the infinities
//! - [`Kind`]: the tag of a value, used in diagnostics
//! - [`Opaque`]: a description of a host value that cannot be serialized
//!
//! ## Usage Patterns
//!
//! ```rust
//! use serde_typst::{typst, value_to_string, Value};
//!
//! let value = typst!({
//!     "name": "Alice",
//!     "nickname": absent,
//!     "tags": ["rust"]
//! });
//! assert_eq!(value_to_string(&value).unwrap(), r#"("name":"Alice","tags":("rust",))"#);
//! ```

use crate::calendar::{Calendar, CalendarDate, CalendarDateTime, CalendarTime, CalendarValue};
use crate::Record;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use num_bigint::BigInt;
use serde::{Serialize, Serializer};
use std::fmt;

pub(crate) const ABSENT_MARKER: &str = "$serde_typst::private::Absent";
pub(crate) const OPAQUE_MARKER: &str = "$serde_typst::private::Opaque";

/// A dynamically-typed value that can be rendered as a Typst literal.
///
/// # Examples
///
/// ```rust
/// use serde_typst::{Number, Value};
///
/// let null = Value::Null;
/// let num = Value::Number(Number::Integer(42));
/// let text = Value::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// Marks a record field to omit. Rejected anywhere else.
    Absent,
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    BigInt(BigInt),
    Array(Vec<Value>),
    Record(Record),
    Date(CalendarDate),
    DateTime(CalendarDateTime),
    Time(CalendarTime),
    /// A host value with no literal form. Always rejected by the writer.
    Unsupported(Opaque),
}

/// A numeric value that fits in 64 bits.
///
/// Integers too large for `i64` are carried as [`Value::BigInt`].
///
/// # Examples
///
/// ```rust
/// use serde_typst::Number;
///
/// assert_eq!(Number::Integer(42).to_string(), "42");
/// assert_eq!(Number::Float(1.5).to_string(), "1.5");
/// assert_eq!(Number::Float(f64::NAN).to_string(), "float.nan");
/// assert_eq!(Number::Float(f64::NEG_INFINITY).to_string(), "-float.inf");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Returns `true` for NaN and the infinities.
    #[inline]
    #[must_use]
    pub fn is_special(&self) -> bool {
        match self {
            Number::Integer(_) => false,
            Number::Float(f) => !f.is_finite(),
        }
    }

    /// Converts this number to an `i64` if it is an integer or a whole float in range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_typst::Number;
    ///
    /// assert_eq!(Number::Integer(42).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.5).as_i64(), None);
    /// assert_eq!(Number::Float(f64::INFINITY).as_i64(), None);
    /// assert_eq!(Number::Float(9223372036854775808.0).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

/// Writes the Typst literal for the number.
///
/// Finite floats use the shortest text that reads back as the same `f64` and always
/// carry a `.` or an exponent, so `1.0` stays a float rather than becoming the
/// integer `1`.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) if fl.is_nan() => f.write_str("float.nan"),
            Number::Float(fl) if *fl == f64::INFINITY => f.write_str("float.inf"),
            Number::Float(fl) if *fl == f64::NEG_INFINITY => f.write_str("-float.inf"),
            Number::Float(fl) => write!(f, "{:?}", fl),
        }
    }
}

/// The kind tag of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Absent,
    Null,
    Bool,
    String,
    Integer,
    Float,
    BigInt,
    Array,
    Record,
    Date,
    DateTime,
    Time,
    Unsupported,
}

impl Kind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Kind::Absent => "absent",
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::BigInt => "bigint",
            Kind::Array => "array",
            Kind::Record => "record",
            Kind::Date => "date",
            Kind::DateTime => "datetime",
            Kind::Time => "time",
            Kind::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A host value that has no Typst literal form, such as a function or a byte buffer.
///
/// Only a description is kept; it shows up in the error message when the value is
/// rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Opaque {
    description: String,
}

impl Opaque {
    pub fn new(description: impl Into<String>) -> Self {
        Opaque {
            description: description.into(),
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

impl Value {
    /// Builds the matching calendar variant from any [`CalendarValue`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use serde_typst::Value;
    ///
    /// let date = NaiveDate::from_ymd_opt(2023, 10, 1).unwrap();
    /// assert!(Value::from_calendar(&date).is_calendar());
    /// ```
    pub fn from_calendar<T: CalendarValue + ?Sized>(value: &T) -> Self {
        Value::from(value.to_calendar())
    }

    /// Returns the kind tag of this value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_typst::{Kind, Value};
    ///
    /// assert_eq!(Value::from(1.5).kind(), Kind::Float);
    /// assert_eq!(Value::Absent.kind(), Kind::Absent);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Absent => Kind::Absent,
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(Number::Integer(_)) => Kind::Integer,
            Value::Number(Number::Float(_)) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::BigInt(_) => Kind::BigInt,
            Value::Array(_) => Kind::Array,
            Value::Record(_) => Kind::Record,
            Value::Date(_) => Kind::Date,
            Value::DateTime(_) => Kind::DateTime,
            Value::Time(_) => Kind::Time,
            Value::Unsupported(_) => Kind::Unsupported,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bigint(&self) -> bool {
        matches!(self, Value::BigInt(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    /// Returns `true` for dates, date-times and times.
    #[inline]
    #[must_use]
    pub const fn is_calendar(&self) -> bool {
        matches!(self, Value::Date(_) | Value::DateTime(_) | Value::Time(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer or a whole-number float, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_typst::{Number, Value};
    ///
    /// assert_eq!(Value::Number(Number::Integer(42)).as_i64(), Some(42));
    /// assert_eq!(Value::Number(Number::Float(42.5)).as_i64(), None);
    /// assert_eq!(Value::from("42").as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            Value::BigInt(bi) => Some(bi),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the calendar shape of a date, date-time or time value.
    #[must_use]
    pub fn as_calendar(&self) -> Option<Calendar> {
        match self {
            Value::Date(date) => Some(Calendar::Date(*date)),
            Value::DateTime(datetime) => Some(Calendar::DateTime(*datetime)),
            Value::Time(time) => Some(Calendar::Time(*time)),
            _ => None,
        }
    }
}

/// A short human-readable description, used in error messages.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => write!(f, "absent"),
            Value::Null => write!(f, "none"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::BigInt(bi) => write!(f, "{}", bi),
            Value::Array(arr) => write!(f, "array of {} elements", arr.len()),
            Value::Record(record) => write!(f, "record of {} fields", record.len()),
            Value::Date(date) => write!(f, "{}", date),
            Value::DateTime(datetime) => write!(f, "{}", datetime),
            Value::Time(time) => write!(f, "{}", time),
            Value::Unsupported(opaque) => write!(f, "{}", opaque),
        }
    }
}

/// Serializes so that [`to_value`](crate::to_value) rebuilds the same `Value`.
///
/// Absent, unsupported, calendar and big-integer values use reserved names that
/// other serde formats treat as a unit, a string or a plain struct.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Absent => serializer.serialize_unit_struct(ABSENT_MARKER),
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::BigInt(bi) => crate::bigint::serialize(bi, serializer),
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Record(record) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(record.len()))?;
                for (k, v) in record {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::Date(date) => date.serialize(serializer),
            Value::DateTime(datetime) => datetime.serialize(serializer),
            Value::Time(time) => time.serialize(serializer),
            Value::Unsupported(opaque) => {
                serializer.serialize_newtype_struct(OPAQUE_MARKER, opaque.description())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! from_small_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::Integer(i64::from(value)))
                }
            }
        )*
    };
}

from_small_integer!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! from_wide_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    match i64::try_from(value) {
                        Ok(i) => Value::Number(Number::Integer(i)),
                        Err(_) => Value::BigInt(BigInt::from(value)),
                    }
                }
            }
        )*
    };
}

from_wide_integer!(u64, i128, u128, isize, usize);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(Number::Float(f64::from(value)))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::BigInt(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<CalendarDate> for Value {
    fn from(value: CalendarDate) -> Self {
        Value::Date(value)
    }
}

impl From<CalendarDateTime> for Value {
    fn from(value: CalendarDateTime) -> Self {
        Value::DateTime(value)
    }
}

impl From<CalendarTime> for Value {
    fn from(value: CalendarTime) -> Self {
        Value::Time(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value.into())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(value.into())
    }
}

impl From<NaiveTime> for Value {
    fn from(value: NaiveTime) -> Self {
        Value::Time(value.into())
    }
}

impl From<Opaque> for Value {
    fn from(value: Opaque) -> Self {
        Value::Unsupported(value)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}
