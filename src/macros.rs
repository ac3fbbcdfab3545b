/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// `null` and `none` produce [`Value::Null`](crate::Value::Null), `absent` produces
/// [`Value::Absent`](crate::Value::Absent). Any other single token tree is converted
/// with `Value::from`, so wrap negative numbers or longer expressions in parentheses.
///
/// ```rust
/// use serde_typst::{typst, value_to_string};
///
/// let order = typst!({
///     "number": "308",
///     "items": [{ "count": 13, "name": "Kebabpizza" }],
///     "note": none,
///     "tip": absent
/// });
/// assert_eq!(
///     value_to_string(&order).unwrap(),
///     r#"("number":"308","items":(("count":13,"name":"Kebabpizza"),),"note":none)"#
/// );
/// ```
#[macro_export]
macro_rules! typst {
    (null) => {
        $crate::Value::Null
    };

    (none) => {
        $crate::Value::Null
    };

    (absent) => {
        $crate::Value::Absent
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::typst!($elem)),*])
    };

    ({}) => {
        $crate::Value::Record($crate::Record::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut record = $crate::Record::new();
        $(
            record.insert($key.to_string(), $crate::typst!($value));
        )*
        $crate::Value::Record(record)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}
