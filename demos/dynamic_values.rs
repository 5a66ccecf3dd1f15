//! Working with Value for runtime flexibility.
//!
//! Run with: cargo run --example dynamic_values

use serde::{Deserialize, Serialize};
use serde_json_qs::{encode, from_query_str, qs, to_value, Value};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct User {
    id: u64,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Build a filter dynamically with the qs! macro
    let filter = qs!({
        "status": "active",
        "ids": [1, 2, 3],
        "owner": null,
        "label": "true"
    });

    let Some(object) = filter.as_object() else {
        return Err("qs! object literal is always an object".into());
    };
    let query = encode(object);
    println!("Filter as query string:\n{}\n", query);

    // Decode without a schema; the types come back on their own
    let decoded = from_query_str(&query)?;
    for (key, value) in &decoded {
        println!("  {:<7} {:<8} {}", key, value.kind(), value);
    }
    println!();

    // Values past the safe integer range become big integers
    let user = User {
        id: u64::MAX,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
    };

    let user_value = to_value(&user)?;
    println!("User as Value: {}", user_value);

    // Runtime type checking
    if let Some(Value::BigInt(id)) = user_value.as_object().and_then(|o| o.get("id")) {
        println!("  id is a bigint: {}", id);
    }
    println!("  is_object: {}", user_value.is_object());
    println!("  is_array:  {}", user_value.is_array());

    Ok(())
}
