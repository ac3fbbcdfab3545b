//! Using the typst! macro for dynamic value construction.
//!
//! Run with: cargo run --example macro

use serde_typst::{typst, value_to_string, CalendarDate};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("Primitives:");
    println!("  none:   {}", value_to_string(&typst!(null))?);
    println!("  bool:   {}", value_to_string(&typst!(true))?);
    println!("  int:    {}", value_to_string(&typst!(42))?);
    println!("  float:  {}", value_to_string(&typst!(1.0))?);
    println!("  nan:    {}", value_to_string(&typst!(f64::NAN))?);
    println!("  text:   {}\n", value_to_string(&typst!("Hello, \"Typst\"!"))?);

    println!("Arrays:");
    println!("  empty:  {}", value_to_string(&typst!([]))?);
    println!("  single: {}", value_to_string(&typst!([1]))?);
    println!("  mixed:  {}\n", value_to_string(&typst!([1, "two", true, null]))?);

    let invoice = typst!({
        "number": "2024-017",
        "issued": (CalendarDate::new(2024, 3, 1)),
        "lines": [
            { "text": "Consulting", "hours": 12, "rate": 95.5 }
        ],
        "note": absent
    });

    println!("Records:");
    println!("  empty:   {}", value_to_string(&typst!({}))?);
    println!("  invoice: {}", value_to_string(&invoice)?);

    Ok(())
}
