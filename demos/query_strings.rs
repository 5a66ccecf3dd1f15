//! Decoding real query strings, including malformed and hostile ones.
//!
//! Run with: cargo run --example query_strings

use serde::Deserialize;
use serde_json_qs::{from_query, from_query_str, QueryPairs};
use std::error::Error;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Listing {
    q: String,
    page: u32,
    sort: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // A URL query string, leading '?' included
    let url_query = "?q=red+shoes&page=3&sort=price";
    let listing: Listing = from_query(&url_query.parse::<QueryPairs>()?)?;
    println!("Parsed: {:?}\n", listing);

    // Any query parameter collection works, e.g. a web framework's map
    let mut params = std::collections::HashMap::new();
    params.insert("q".to_string(), "boots".to_string());
    params.insert("page".to_string(), "1".to_string());
    let listing: Listing = from_query(&params)?;
    println!("From a map: {:?}\n", listing);

    // Errors name the failing key and the offset inside its value
    for query in ["a={b:1", "a=(1,2", "a=1x", "__proto__=1", "a={__proto__:{admin:true}}"] {
        match from_query_str(query) {
            Ok(map) => println!("{:<28} => {:?}", query, map),
            Err(e) => println!("{:<28} => {}", query, e),
        }
    }

    Ok(())
}
