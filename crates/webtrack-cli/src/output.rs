//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Print a success message.
pub fn success(msg: &str) {
    eprintln!("{} {}", "✓".green(), msg);
}

/// Print a warning message.
pub fn warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact or pretty-printed JSON.
pub fn json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

/// Print a list response one item per line.
///
/// Paginated bodies (`{"results": [...]}`) and bare arrays are both accepted;
/// anything else is printed as a single value.
pub fn items(value: &serde_json::Value, pretty: bool) -> Result<()> {
    let items = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(map) => match map.get("results") {
            Some(serde_json::Value::Array(items)) => items,
            _ => return json(value, pretty),
        },
        _ => return json(value, pretty),
    };

    if items.is_empty() {
        eprintln!("{}", "No results.".dimmed());
        return Ok(());
    }

    for item in items {
        json(item, pretty)?;
    }
    Ok(())
}
