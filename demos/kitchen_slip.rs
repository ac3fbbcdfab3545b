//! Rendering a print document with timestamps for a Typst template.
//!
//! Run with: cargo run --example kitchen_slip

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_typst::{to_string_with_options, TypstOptions};
use std::error::Error;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Item {
    count: u32,
    name: String,
    message: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct KitchenSlip {
    #[serde(serialize_with = "serde_typst::calendar::serialize")]
    created_at: NaiveDateTime,
    #[serde(serialize_with = "serde_typst::calendar::serialize_option")]
    delivery_time: Option<NaiveDateTime>,
    order_number: String,
    printer_name: String,
    items: Vec<Item>,
    tip_percentage: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    let created_at = NaiveDate::from_ymd_opt(2025, 5, 15)
        .and_then(|date| date.and_hms_milli_opt(10, 21, 25, 648))
        .ok_or("invalid timestamp")?;

    let slip = KitchenSlip {
        created_at,
        delivery_time: None,
        order_number: "308".to_string(),
        printer_name: "Varmkök".to_string(),
        items: vec![
            Item {
                count: 1,
                name: "Al tonno".to_string(),
                message: Some("Utan tonfisk tack!".to_string()),
            },
            Item {
                count: 13,
                name: "Kebabpizza".to_string(),
                message: None,
            },
        ],
        tip_percentage: 10,
    };

    // Milliseconds are dropped; Typst datetimes have second precision
    let typst = to_string_with_options(&slip, TypstOptions::default())?;
    println!("#let slip = {}", typst);

    let compact = to_string_with_options(&slip, TypstOptions::new().with_skip_none_fields(true))?;
    println!("\nWithout none fields:\n#let slip = {}", compact);

    Ok(())
}
