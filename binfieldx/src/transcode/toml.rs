//! TOML output: rows become an array of tables named `rows`.
//!
//! Mapping from JSON to TOML:
//!   - string          -> TOML string
//!   - integer         -> TOML integer (must fit in i64)
//!   - float           -> TOML float
//!   - bool            -> TOML boolean
//!   - array           -> TOML array
//!   - object          -> TOML inline table
//!   - null            -> error (TOML has no null)

use libfieldx::Fields;
use serde_json::Value;
use toml_edit::{ArrayOfTables, DocumentMut, Formatted, InlineTable, Item, Table};

/// Encode rows as `[[rows]]` tables.
pub fn encode_rows(rows: &[Fields]) -> Result<String, String> {
    let mut tables = ArrayOfTables::new();
    for row in rows {
        let mut table = Table::new();
        for (key, value) in row {
            table.insert(key, Item::Value(value_to_toml(value)?));
        }
        tables.push(table);
    }
    let mut doc = DocumentMut::new();
    doc["rows"] = Item::ArrayOfTables(tables);
    Ok(doc.to_string())
}

fn value_to_toml(value: &Value) -> Result<toml_edit::Value, String> {
    match value {
        Value::Null => Err("TOML has no null type".to_string()),
        Value::Bool(b) => Ok(toml_edit::Value::Boolean(Formatted::new(*b))),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(toml_edit::Value::Integer(Formatted::new(i)))
            } else if n.is_u64() {
                Err(format!("TOML integers must fit in i64; {} is too large", n))
            } else {
                let f = n
                    .as_f64()
                    .ok_or_else(|| format!("Unsupported number: {}", n))?;
                Ok(toml_edit::Value::Float(Formatted::new(f)))
            }
        }
        Value::String(s) => Ok(toml_edit::Value::String(Formatted::new(s.clone()))),
        Value::Array(arr) => {
            let mut toml_arr = toml_edit::Array::new();
            for v in arr {
                toml_arr.push(value_to_toml(v)?);
            }
            Ok(toml_edit::Value::Array(toml_arr))
        }
        Value::Object(obj) => {
            let mut inline = InlineTable::new();
            for (k, v) in obj {
                inline.insert(k.as_str(), value_to_toml(v)?);
            }
            Ok(toml_edit::Value::InlineTable(inline))
        }
    }
}
