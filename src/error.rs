//! Error types for Typst literal serialization.
//!
//! Serialization is all-or-nothing: the first value that has no Typst literal
//! form aborts the whole conversion and no partial output is returned.
//!
//! ## Error Categories
//!
//! - **Unsupported values**: a value with no literal form (an absent marker outside
//!   a record, byte buffers, opaque host values). The rejected [`Value`] is kept.
//! - **Invalid keys**: a map key that cannot become a dictionary key
//! - **Depth limit**: nesting deeper than [`TypstOptions::max_depth`](crate::TypstOptions)
//! - **Calendar markers**: a reserved calendar marker with missing or out-of-range fields
//! - **I/O Errors**: failures writing the finished text to a writer
//!
//! ## Examples
//!
//! ```rust
//! use serde_typst::{value_to_string, Error, Value};
//!
//! let err = value_to_string(&Value::Absent).unwrap_err();
//! assert!(matches!(err, Error::UnsupportedValue(_)));
//! assert_eq!(err.value(), Some(&Value::Absent));
//! ```

use crate::Value;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while producing Typst literals.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A value with no Typst literal form. Carries the rejected value.
    #[error("unexpected value encountered: {0}")]
    UnsupportedValue(Box<Value>),

    /// A map key that does not serialize to a string, char, integer or bool
    #[error("dictionary keys must be strings, found {0}")]
    InvalidKey(String),

    /// Nesting went past the configured maximum depth
    #[error("nesting exceeds the maximum depth of {0}")]
    DepthLimitExceeded(usize),

    /// A reserved calendar marker arrived with missing or out-of-range fields
    #[error("invalid calendar value: {0}")]
    InvalidCalendar(String),

    /// IO error during writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unsupported value error holding the rejected value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_typst::{Error, Opaque, Value};
    ///
    /// let err = Error::unsupported(Value::Unsupported(Opaque::new("function")));
    /// assert_eq!(err.to_string(), "unexpected value encountered: function");
    /// ```
    pub fn unsupported(value: Value) -> Self {
        Error::UnsupportedValue(Box::new(value))
    }

    /// Creates an invalid key error describing the offending key.
    pub fn invalid_key(found: &str) -> Self {
        Error::InvalidKey(found.to_string())
    }

    /// Creates an invalid calendar error.
    pub fn invalid_calendar(msg: &str) -> Self {
        Error::InvalidCalendar(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_typst::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the rejected value for [`Error::UnsupportedValue`], `None` otherwise.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            Error::UnsupportedValue(value) => Some(&**value),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Opaque;

    #[test]
    fn test_unsupported_keeps_value() {
        let err = Error::unsupported(Value::Unsupported(Opaque::new("symbol")));
        assert_eq!(
            err.value(),
            Some(&Value::Unsupported(Opaque::new("symbol")))
        );
        assert_eq!(err.to_string(), "unexpected value encountered: symbol");
    }

    #[test]
    fn test_other_errors_have_no_value() {
        assert!(Error::invalid_key("array").value().is_none());
        assert!(Error::DepthLimitExceeded(4).value().is_none());
        assert_eq!(
            Error::DepthLimitExceeded(4).to_string(),
            "nesting exceeds the maximum depth of 4"
        );
    }
}
