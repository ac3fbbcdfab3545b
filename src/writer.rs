//! Typst literal emission.
//!
//! Every function here appends to one output `String` lent down the recursion. The
//! output has no whitespace between tokens:
//!
//! ```text
//! value      := "none" | bool | string | number | bigint | array | record | datetime
//! array      := "(" (value ("," value)*)? ")"      -- one element gets a trailing ","
//! record     := "(:)" | "(" entry ("," entry)* ")"
//! entry      := string ":" value
//! datetime   := "datetime(" field ("," field)* ")"
//! field      := name ":" integer
//! ```
//!
//! A record whose keys all hold [`Value::Absent`] is written `()`, not `(:)`.

use crate::calendar::{CalendarDate, CalendarDateTime, CalendarTime};
use crate::{Error, Record, Result, TypstOptions, Value};

pub(crate) fn write_value(
    output: &mut String,
    value: &Value,
    options: &TypstOptions,
    depth: usize,
) -> Result<()> {
    match value {
        Value::Null => output.push_str("none"),
        Value::Bool(b) => output.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => output.push_str(&n.to_string()),
        Value::String(s) => write_string(output, s),
        Value::BigInt(bi) => output.push_str(&bi.to_string()),
        Value::Array(arr) => write_array(output, arr, options, depth)?,
        Value::Record(record) => write_record(output, record, options, depth)?,
        Value::Date(date) => write_date(output, date),
        Value::DateTime(datetime) => write_datetime(output, datetime),
        Value::Time(time) => write_time(output, time),
        Value::Absent | Value::Unsupported(_) => return Err(reject(value)),
    }
    Ok(())
}

fn reject(value: &Value) -> Error {
    tracing::debug!(kind = value.kind().as_str(), %value, "value has no typst literal form");
    Error::unsupported(value.clone())
}

fn write_array(
    output: &mut String,
    arr: &[Value],
    options: &TypstOptions,
    depth: usize,
) -> Result<()> {
    options.check_depth(depth)?;

    output.push('(');
    for (i, element) in arr.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        write_value(output, element, options, depth + 1)?;
    }
    // `(x)` is just a parenthesized `x`
    if arr.len() == 1 {
        output.push(',');
    }
    output.push(')');
    Ok(())
}

fn write_record(
    output: &mut String,
    record: &Record,
    options: &TypstOptions,
    depth: usize,
) -> Result<()> {
    options.check_depth(depth)?;

    if record.is_empty() {
        output.push_str("(:)");
        return Ok(());
    }

    output.push('(');
    for (i, (key, value)) in record.present().enumerate() {
        if i > 0 {
            output.push(',');
        }
        write_string(output, key);
        output.push(':');
        write_value(output, value, options, depth + 1)?;
    }
    output.push(')');
    Ok(())
}

fn write_date(output: &mut String, date: &CalendarDate) {
    output.push_str(&format!(
        "datetime(year:{},month:{},day:{})",
        date.year, date.month, date.day
    ));
}

fn write_datetime(output: &mut String, datetime: &CalendarDateTime) {
    output.push_str(&format!(
        "datetime(year:{},month:{},day:{},hour:{},minute:{},second:{})",
        datetime.year,
        datetime.month,
        datetime.day,
        datetime.hour,
        datetime.minute,
        datetime.second
    ));
}

fn write_time(output: &mut String, time: &CalendarTime) {
    output.push_str(&format!(
        "datetime(hour:{},minute:{},second:{})",
        time.hour, time.minute, time.second
    ));
}

/// JSON string escaping: quote, backslash and C0 controls are escaped, everything
/// else (non-ASCII included) is copied through.
fn write_string(output: &mut String, s: &str) {
    output.reserve(s.len() + 2);
    output.push('"');
    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            '\u{0008}' => output.push_str("\\b"),
            '\u{000C}' => output.push_str("\\f"),
            c if c < '\u{0020}' => output.push_str(&format!("\\u{:04x}", c as u32)),
            _ => output.push(ch),
        }
    }
    output.push('"');
}
