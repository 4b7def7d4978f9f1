use serde_json::{Map, Value};

use crate::event::path::Path;
use crate::event::Event;

/// Recursively render a template value against an event.
///
/// Strings are scanned for `%{path}` placeholders; mappings and sequences are
/// rebuilt with each entry rendered in place (mapping keys are themselves
/// template strings); all other scalars pass through unchanged, keeping their
/// type. The event is never mutated.
pub fn render(template: &Value, event: &Event) -> Value {
    match template {
        Value::String(s) => render_string(s, event),
        Value::Object(map) => {
            let mut result = Map::new();
            for (key, val) in map {
                let rendered_key = match render_string(key, event) {
                    Value::String(s) => s,
                    other => stringify(&other),
                };
                result.insert(rendered_key, render(val, event));
            }
            Value::Object(result)
        }
        Value::Array(items) => Value::Array(items.iter().map(|v| render(v, event)).collect()),
        // Null, bool and number templates are returned as-is
        other => other.clone(),
    }
}

/// Render a single template string.
///
/// No placeholder: the string comes back unchanged. Exactly one placeholder
/// spanning the whole string: the referenced value is returned with its native
/// type (a missing path resolves to null). Otherwise each placeholder is
/// resolved, stringified and substituted in place.
pub fn render_string(template: &str, event: &Event) -> Value {
    let Some(first) = next_placeholder(template, 0) else {
        return Value::String(template.to_string());
    };

    if first.start == 0 && first.end == template.len() {
        let path = Path::parse(first.path);
        return event.get(&path).cloned().unwrap_or(Value::Null);
    }

    let mut out = String::new();
    let mut pos = 0;
    let mut current = Some(first);
    while let Some(placeholder) = current {
        out.push_str(&template[pos..placeholder.start]);
        let path = Path::parse(placeholder.path);
        // missing references render as the empty string
        if let Some(value) = event.get(&path) {
            out.push_str(&stringify(value));
        }
        pos = placeholder.end;
        current = next_placeholder(template, pos);
    }
    out.push_str(&template[pos..]);

    Value::String(out)
}

/// Convert a resolved value to its in-string form. Strings are used verbatim,
/// null renders as the empty string, containers as compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

struct Placeholder<'a> {
    start: usize,
    end: usize,
    path: &'a str,
}

/// Locate the next `%{...}` occurrence at or after `from`. An unterminated
/// opener is treated as literal text.
fn next_placeholder(s: &str, from: usize) -> Option<Placeholder<'_>> {
    let start = s[from..].find("%{")? + from;
    let close = s[start + 2..].find('}')? + start + 2;
    Some(Placeholder {
        start,
        end: close + 1,
        path: &s[start + 2..close],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_string_passes_through_unchanged() {
        let event = Event::new(json!({"message": "test"}));
        assert_eq!(
            render(&json!("no placeholders here"), &event),
            json!("no placeholders here")
        );
    }

    #[test]
    fn non_string_scalars_keep_their_type() {
        let event = Event::new(json!({}));
        assert_eq!(render(&json!(42), &event), json!(42));
        assert_eq!(render(&json!(true), &event), json!(true));
        assert_eq!(render(&json!(null), &event), json!(null));
    }

    #[test]
    fn whole_string_placeholder_preserves_native_type() {
        let event = Event::new(json!({"id": 10}));
        assert_eq!(render(&json!("%{[id]}"), &event), json!(10));
    }

    #[test]
    fn whole_string_placeholder_preserves_nested_structure() {
        let event = Event::new(json!({"user": {"name": "ada", "roles": ["admin"]}}));
        assert_eq!(
            render(&json!("%{user}"), &event),
            json!({"name": "ada", "roles": ["admin"]})
        );
    }

    #[test]
    fn embedded_placeholder_is_stringified_in_place() {
        let event = Event::new(json!({"message": "test"}));
        assert_eq!(
            render(&json!("http://host/%{message}"), &event),
            json!("http://host/test")
        );
    }

    #[test]
    fn multiple_placeholders_substitute_in_order() {
        let event = Event::new(json!({"a": "x", "b": 2}));
        assert_eq!(render(&json!("%{a}-%{b}!"), &event), json!("x-2!"));
    }

    #[test]
    fn renders_missing_path_as_empty_string() {
        let event = Event::new(json!({}));
        assert_eq!(render(&json!("val=%{nothere}."), &event), json!("val=."));
    }

    #[test]
    fn whole_string_placeholder_for_missing_path_is_null() {
        let event = Event::new(json!({}));
        assert_eq!(render(&json!("%{nothere}"), &event), json!(null));
    }

    #[test]
    fn unterminated_placeholder_is_literal() {
        let event = Event::new(json!({"a": 1}));
        assert_eq!(render(&json!("%{a"), &event), json!("%{a"));
    }

    #[test]
    fn mapping_values_and_keys_are_rendered() {
        let event = Event::new(json!({"key1": "mykey", "id": 7}));
        let template = json!({
            "%{key1}": "%{id}",
            "literal": 3
        });
        let rendered = render(&template, &event);
        assert_eq!(rendered["mykey"], json!(7));
        assert_eq!(rendered["literal"], json!(3));
    }

    #[test]
    fn nested_structure_is_preserved_positionally() {
        let event = Event::new(json!({"key1": "mykey", "who": "you"}));
        let template = json!({
            "%{key1}": ["fixed", "%{who}", {"deep": "%{who}"}]
        });
        let rendered = render(&template, &event);
        assert_eq!(rendered["mykey"][0], json!("fixed"));
        assert_eq!(rendered["mykey"][1], json!("you"));
        assert_eq!(rendered["mykey"][2]["deep"], json!("you"));
    }

    #[test]
    fn event_is_not_mutated_by_rendering() {
        let event = Event::new(json!({"a": {"b": 1}}));
        let before = event.body.clone();
        render(&json!({"x": "%{a.b}", "y": "%{a}"}), &event);
        assert_eq!(event.body, before);
    }
}
