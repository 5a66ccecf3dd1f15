//! Customizing the codec with EncodeOptions and DecodeOptions.
//!
//! Run with: cargo run --example custom_options

use serde::{Deserialize, Serialize};
use serde_json_qs::{
    from_query_str, from_query_str_with_options, to_string, to_string_with_options,
    DecodeOptions, EncodeOptions,
};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct Session {
    user: String,
    token: String,
    expires: String,
    debug: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let session = Session {
        user: "alice".to_string(),
        token: "s3cr3t".to_string(),
        expires: "2024-12-31".to_string(),
        debug: true,
    };

    println!("Default:");
    println!("{}\n", to_string(&session)?);

    // Leave keys out of the query string, e.g. before logging a URL
    println!("Skipping root keys:");
    let redacted = EncodeOptions::new().with_skipped_keys(["token", "debug"]);
    println!("{}\n", to_string_with_options(&session, &redacted)?);

    // Date-shaped values decode as dates unless turned off
    let query = "expires=2024-12-31";
    println!("Dates on:  {:?}", from_query_str(query)?.get("expires"));
    let no_dates = DecodeOptions::new().with_dates(false);
    match from_query_str_with_options(query, &no_dates) {
        Ok(map) => println!("Dates off: {:?}", map.get("expires")),
        Err(e) => println!("Dates off: {}", e),
    }
    println!();

    // Bound nesting depth for untrusted input
    let shallow = DecodeOptions::new().with_max_depth(2);
    match from_query_str_with_options("a=(((1)))", &shallow) {
        Ok(map) => println!("Decoded: {:?}", map),
        Err(e) => println!("Rejected: {}", e),
    }

    Ok(())
}
