//! Working with Value for runtime flexibility.
//!
//! Run with: cargo run --example dynamic_values

use serde::Serialize;
use serde_typst::{to_string, to_value, typst, value_to_string, Error, Opaque, Value};
use std::error::Error as StdError;

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn StdError>> {
    let config = typst!({
        "host": "localhost",
        "port": 8080,
        "features": ["auth", "logging", "metrics"],
        "debug": true
    });

    println!("Config as Typst:\n{}\n", value_to_string(&config)?);

    if let Value::Record(record) = &config {
        if let Some(Value::String(host)) = record.get("host") {
            println!("Accessing field 'host': {}", host);
        }

        if let Some(port) = record.get("port").and_then(|v| v.as_i64()) {
            println!("Accessing field 'port': {}", port);
        }

        if let Some(Value::Array(features)) = record.get("features") {
            println!("Accessing field 'features': {} items\n", features.len());
        }
    }

    let user = User {
        id: 123,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
    };

    let user_value = to_value(&user)?;
    println!("User as Value ({}):\n{}\n", user_value.kind(), to_string(&user_value)?);

    // Values with no Typst counterpart abort the whole call
    let broken = typst!({ "callback": (Opaque::new("function")) });
    match value_to_string(&broken) {
        Err(Error::UnsupportedValue(value)) => println!("Rejected: {}", value),
        other => println!("Unexpected result: {:?}", other),
    }

    Ok(())
}
