//! Arbitrary-precision integers.
//!
//! `BigInt` has no `Serialize` impl of its own here. Mark the field with
//! [`serialize`] to write it as plain decimal digits:
//!
//! ```rust
//! use num_bigint::BigInt;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Ledger {
//!     #[serde(serialize_with = "serde_typst::bigint::serialize")]
//!     balance: BigInt,
//! }
//!
//! let ledger = Ledger { balance: "-123456789012345678901234567890".parse().unwrap() };
//! assert_eq!(
//!     serde_typst::to_string(&ledger).unwrap(),
//!     r#"("balance":-123456789012345678901234567890)"#
//! );
//! ```
//!
//! Other serde formats receive the digits as a string.

use crate::{Error, Result, Value};
use num_bigint::BigInt;
use serde::Serializer;

pub(crate) const BIGINT_MARKER: &str = "$serde_typst::private::BigInt";

/// Serializes a big integer as its decimal digits.
pub fn serialize<S>(value: &BigInt, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_newtype_struct(BIGINT_MARKER, &value.to_string())
}

/// Parses the digits carried under the reserved name back into a value.
pub(crate) fn from_marker(digits: Value) -> Result<Value> {
    match digits {
        Value::String(s) => s
            .parse::<BigInt>()
            .map(Value::BigInt)
            .map_err(|e| Error::custom(format!("invalid big integer {:?}: {}", s, e))),
        other => Err(Error::custom(format!(
            "expected big integer digits, found {}",
            other.kind()
        ))),
    }
}
