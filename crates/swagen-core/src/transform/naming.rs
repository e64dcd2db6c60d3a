use heck::ToLowerCamelCase;

/// Words that would clash with keywords in generated clients; escaped with
/// backticks the way Swift spells raw identifiers.
const RESERVED_WORDS: &[&str] = &["default", "as"];

/// Build a client-cased (camelCase) identifier from name components.
/// Leading digits are escaped with an underscore and reserved words with
/// backticks.
pub fn name_from_components(components: &[&str]) -> String {
    let name = components.join("/").to_lower_camel_case();
    let name = match name.chars().next() {
        Some(first) if first.is_ascii_digit() => format!("_{name}"),
        _ => name,
    };
    if RESERVED_WORDS.contains(&name.as_str()) {
        format!("`{name}`")
    } else {
        name
    }
}

/// Build a class name (PascalCase) from components, skipping the first
/// `skip` of them. If skipping would leave the bare name `Type`, fall back
/// to the full component list so nested properties named `type` still get a
/// usable class name.
pub fn class_name_from_components(components: &[&str], skip: usize) -> String {
    let kept = &components[skip.min(components.len())..];
    let name = upper_first(&name_from_components(kept));
    if name == "Type" && skip > 0 {
        return class_name_from_components(components, 0);
    }
    name
}

/// The final path segment of a `$ref`.
pub fn last_ref_component(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

/// Class name derived from a `$ref` target's final path segment.
pub fn class_name_from_ref(reference: &str) -> String {
    class_name_from_components(&[last_ref_component(reference)], 0)
}

/// The raw text of an enum literal.
pub fn literal_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Render an enum literal as target-language source: string literals are
/// quoted, everything else passes through verbatim.
pub fn map_primitive_value(value: &serde_json::Value, schema_type: Option<&str>) -> String {
    let raw = literal_text(value);
    if schema_type == Some("string") {
        format!("\"{raw}\"")
    } else {
        raw
    }
}

fn upper_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
