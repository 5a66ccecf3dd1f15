//! Basic query string serialization and deserialization.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_json_qs::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Search {
    q: String,
    page: u32,
    filter: Filter,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Filter {
    tags: Vec<String>,
    max_price: Option<f64>,
    in_stock: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let search = Search {
        q: "red shoes & socks".to_string(),
        page: 2,
        filter: Filter {
            tags: vec!["new".to_string(), "sale".to_string()],
            max_price: Some(99.5),
            in_stock: true,
        },
    };

    // Serialize to a query string
    let query = to_string(&search)?;
    println!("Query string:\n?{}\n", query);

    // Deserialize back to struct
    let search_back: Search = from_str(&query)?;
    assert_eq!(search, search_back);
    println!("✓ Round-trip successful");

    Ok(())
}
