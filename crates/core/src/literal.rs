//! Dict-literal rendering of JSON values.
//!
//! Transcripts and retrieval blobs show structured values (tool arguments,
//! document metadata) in a compact literal notation rather than JSON:
//!
//! ```text
//! {'query': 'test', 'k': 2, 'exact': False, 'filter': None}
//! ```
//!
//! Strings use single quotes unless they contain a single quote and no
//! double quote; booleans and null render as `True`, `False`, `None`.

use serde_json::{Map, Value};

/// Render a JSON value in literal notation.
pub fn render(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

/// Render a string-keyed mapping in literal notation.
pub fn render_map(map: &Map<String, Value>) -> String {
    let mut out = String::new();
    write_map(&mut out, map);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_str(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => write_map(out, map),
    }
}

fn write_map(out: &mut String, map: &Map<String, Value>) {
    out.push('{');
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_str(out, key);
        out.push_str(": ");
        write_value(out, value);
    }
    out.push('}');
}

fn write_str(out: &mut String, s: &str) {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_simple_mapping() {
        assert_eq!(render(&json!({"query": "test"})), "{'query': 'test'}");
    }

    #[test]
    fn renders_empty_mapping() {
        assert_eq!(render_map(&Map::new()), "{}");
    }

    #[test]
    fn preserves_key_order() {
        let value = json!({"zeta": 1, "alpha": 2});
        assert_eq!(render(&value), "{'zeta': 1, 'alpha': 2}");
    }

    #[test]
    fn renders_scalars() {
        assert_eq!(render(&json!(null)), "None");
        assert_eq!(render(&json!(true)), "True");
        assert_eq!(render(&json!(false)), "False");
        assert_eq!(render(&json!(3)), "3");
        assert_eq!(render(&json!(0.5)), "0.5");
    }

    #[test]
    fn renders_nested_values() {
        let value = json!({"tags": ["a", "b"], "opts": {"k": 2}});
        assert_eq!(render(&value), "{'tags': ['a', 'b'], 'opts': {'k': 2}}");
    }

    #[test]
    fn quote_selection_and_escapes() {
        assert_eq!(render(&json!("it's")), "\"it's\"");
        assert_eq!(render(&json!("say \"hi\"")), "'say \"hi\"'");
        assert_eq!(render(&json!("both ' and \"")), "'both \\' and \"'");
        assert_eq!(render(&json!("line\nbreak")), "'line\\nbreak'");
    }

    #[test]
    fn keeps_non_ascii_verbatim() {
        assert_eq!(render(&json!({"query": "カメレオン猫"})), "{'query': 'カメレオン猫'}");
    }
}
