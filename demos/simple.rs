//! Basic Typst literal serialization.
//!
//! Run with: cargo run --example simple

use serde::Serialize;
use serde_typst::to_string;
use std::error::Error;

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    email: String,
    nickname: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
            nickname: Some("ali".to_string()),
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            email: "bob@example.com".to_string(),
            nickname: None,
        },
    ];

    let typst = to_string(&users)?;
    println!("Typst output:\n{}\n", typst);

    // A single element keeps its trailing comma so Typst reads it as an array
    let single = to_string(&users[..1])?;
    println!("Single element:\n{}", single);

    Ok(())
}
