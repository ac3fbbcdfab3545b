//! # serde_typst
//!
//! Renders Rust data as Typst literal syntax, so application data can be pasted
//! straight into a Typst document template.
//!
//! ## What it produces
//!
//! | Input | Typst literal |
//! |-------|---------------|
//! | `None` / unit | `none` |
//! | `bool` | `true`, `false` |
//! | integers, big integers | `42`, `45123456789` |
//! | floats | `1.5`, `float.nan`, `float.inf`, `-float.inf` |
//! | strings | `"a \"quoted\" word"` |
//! | sequences | `()`, `(1,)`, `(1,2)` |
//! | maps and structs | `(:)`, `("a":1,"b":2)` |
//! | dates and times | `datetime(year:2023,month:10,day:1)` |
//!
//! Output never contains whitespace between tokens. Conversion is one-way; there is
//! no parser.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::Serialize;
//! use serde_typst::to_string;
//!
//! #[derive(Serialize)]
//! struct LineItem {
//!     count: u32,
//!     name: String,
//! }
//!
//! #[derive(Serialize)]
//! struct Order {
//!     number: String,
//!     items: Vec<LineItem>,
//!     message: Option<String>,
//! }
//!
//! let order = Order {
//!     number: "308".to_string(),
//!     items: vec![LineItem { count: 1, name: "Al tonno".to_string() }],
//!     message: None,
//! };
//!
//! assert_eq!(
//!     to_string(&order).unwrap(),
//!     r#"("number":"308","items":(("count":1,"name":"Al tonno"),),"message":none)"#
//! );
//! ```
//!
//! ### Dynamic values
//!
//! ```rust
//! use serde_typst::{typst, value_to_string};
//!
//! let data = typst!({ "empty": {}, "single": [1], "skipped": absent });
//! assert_eq!(value_to_string(&data).unwrap(), r#"("empty":(:),"single":(1,))"#);
//! ```
//!
//! ### Calendar values
//!
//! Dates and times become `datetime(..)` calls. Use [`calendar::serialize`] on
//! chrono fields, or build values with [`Value::from_calendar`]. Any type can take
//! part by implementing [`calendar::CalendarValue`].
//!
//! ## Errors
//!
//! Conversion stops at the first value with no literal form and returns
//! [`Error::UnsupportedValue`] holding that value. No partial output is returned.
//!
//! ## Logging
//!
//! The crate emits `tracing` events (a `debug` event when a value is rejected) and
//! never installs a subscriber.

pub mod bigint;
pub mod calendar;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;
mod writer;

pub use calendar::{Calendar, CalendarDate, CalendarDateTime, CalendarTime, CalendarValue};
pub use error::{Error, Result};
pub use map::Record;
pub use options::TypstOptions;
pub use ser::ValueSerializer;
pub use value::{Kind, Number, Opaque, Value};

use serde::Serialize;
use std::io;

/// Serialize any `T: Serialize` to a Typst literal.
///
/// # Examples
///
/// ```rust
/// use serde_typst::to_string;
///
/// assert_eq!(to_string(&vec![true]).unwrap(), "(true,)");
/// assert_eq!(to_string(&f64::NAN).unwrap(), "float.nan");
/// ```
///
/// # Errors
///
/// Returns an error if the value contains something with no Typst literal form.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, TypstOptions::default())
}

/// Serialize any `T: Serialize` to a Typst literal with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_typst::{to_string_with_options, TypstOptions};
/// use std::collections::BTreeMap;
///
/// let mut fields = BTreeMap::new();
/// fields.insert("phone", None::<String>);
///
/// let options = TypstOptions::new().with_skip_none_fields(true);
/// assert_eq!(to_string_with_options(&fields, options).unwrap(), "()");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or nests past the depth limit.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: TypstOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let value = to_value_with_options(value, &options)?;
    value_to_string_with_options(&value, &options)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_typst::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: Value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_record());
/// ```
///
/// # Errors
///
/// Returns an error if a map key is not string-like or a reserved marker is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    to_value_with_options(value, &TypstOptions::default())
}

/// Convert any `T: Serialize` to a [`Value`] with custom options.
///
/// # Errors
///
/// See [`to_value`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value_with_options<T>(value: &T, options: &TypstOptions) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer::new(options))
}

/// Render a [`Value`] as a Typst literal.
///
/// # Examples
///
/// ```rust
/// use serde_typst::{value_to_string, Record, Value};
///
/// assert_eq!(value_to_string(&Value::Null).unwrap(), "none");
/// assert_eq!(value_to_string(&Value::Record(Record::new())).unwrap(), "(:)");
/// assert!(value_to_string(&Value::Absent).is_err());
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedValue`] for [`Value::Absent`] outside a record and
/// for [`Value::Unsupported`] anywhere.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn value_to_string(value: &Value) -> Result<String> {
    value_to_string_with_options(value, &TypstOptions::default())
}

/// Render a [`Value`] as a Typst literal with custom options.
///
/// # Errors
///
/// See [`value_to_string`]. Also fails with [`Error::DepthLimitExceeded`] when
/// [`TypstOptions::max_depth`] is set and exceeded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn value_to_string_with_options(value: &Value, options: &TypstOptions) -> Result<String> {
    tracing::trace!(kind = value.kind().as_str(), "rendering typst literal");
    let mut output = String::with_capacity(256);
    writer::write_value(&mut output, value, options, 0)?;
    Ok(output)
}

/// Serialize any `T: Serialize` as a Typst literal into a writer.
///
/// The whole literal is built in memory first, so nothing is written on failure.
///
/// # Examples
///
/// ```rust
/// use serde_typst::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &("a", 1)).unwrap();
/// assert_eq!(buffer, br#"("a",1)"#);
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let typst = to_string(value)?;
    writer
        .write_all(typst.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
