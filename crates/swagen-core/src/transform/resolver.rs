//! `$ref` and `allOf` resolution.
//!
//! Resolution never mutates the document; every call returns a new
//! [`Schema`]. Merging is deep: colliding array-valued fields (notably
//! `required`) concatenate, properties merge key-wise, and colliding scalars
//! keep the most locally declared value.

use indexmap::map::Entry;

use crate::error::ResolveError;
use crate::spec::{Document, ParameterSpec, ResponseSpec, Schema};

/// What a [`resolve`] call should flatten.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolution<'a> {
    pub refs: bool,
    pub all_of: bool,
    /// An `allOf` branch whose `$ref` equals this contributes nothing, so
    /// the caller can treat it as an inheritance edge instead of inlining
    /// the superclass fields.
    pub ignore_ref: Option<&'a str>,
}

impl<'a> Resolution<'a> {
    pub fn refs_only() -> Self {
        Resolution {
            refs: true,
            all_of: false,
            ignore_ref: None,
        }
    }

    pub fn full() -> Self {
        Resolution {
            refs: true,
            all_of: true,
            ignore_ref: None,
        }
    }

    pub fn full_ignoring(ignore_ref: Option<&'a str>) -> Self {
        Resolution {
            refs: true,
            all_of: true,
            ignore_ref,
        }
    }
}

/// Resolve a schema node against the document, flattening whatever
/// `options` asks for. Applied recursively until the result needs no
/// further resolution, since a ref target may itself carry refs or `allOf`.
pub fn resolve(
    schema: &Schema,
    doc: &Document,
    options: Resolution<'_>,
) -> Result<Schema, ResolveError> {
    let needs_ref = options.refs && schema.reference.is_some();
    let needs_all_of = options.all_of && !schema.all_of.is_empty();

    // Drop the fields being resolved so they don't merge back in.
    let mut own = schema.clone();
    if options.refs {
        own.reference = None;
    }
    if options.all_of {
        own.all_of = Vec::new();
    }
    if !needs_ref && !needs_all_of {
        return Ok(own);
    }

    let mut pulled = Schema::default();
    if needs_ref {
        if let Some(target) = schema.reference.as_deref() {
            if options.ignore_ref != Some(target) {
                pulled = merged(pulled, doc.schema_at(target)?.clone());
            }
        }
    }
    if needs_all_of {
        // Branches are always ref-resolved before merging; merging raw
        // branches would keep at most one `$ref` field and drop the rest.
        for branch in &schema.all_of {
            let branch = resolve(branch, doc, Resolution { refs: true, ..options })?;
            pulled = merged(pulled, branch);
        }
    }

    let combined = merged(pulled, own);
    resolve(&combined, doc, options)
}

/// Resolve a parameter's own `#/parameters/...` reference. Locally declared
/// fields win over the referenced definition.
pub fn resolve_parameter(
    spec: &ParameterSpec,
    doc: &Document,
) -> Result<ParameterSpec, ResolveError> {
    let Some(reference) = spec.reference.as_deref() else {
        return Ok(spec.clone());
    };
    let target = doc.parameter_at(reference)?;
    let mut resolved = target.clone();
    resolved.reference = None;
    if spec.name.is_some() {
        resolved.name = spec.name.clone();
    }
    if spec.location.is_some() {
        resolved.location = spec.location;
    }
    if spec.required.is_some() {
        resolved.required = spec.required;
    }
    if spec.description.is_some() {
        resolved.description = spec.description.clone();
    }
    if spec.schema.is_some() {
        resolved.schema = spec.schema.clone();
    }
    resolved.inline = merged(resolved.inline, spec.inline.clone());
    resolve_parameter(&resolved, doc)
}

/// Resolve a response's own `#/responses/...` reference, local fields
/// winning.
pub fn resolve_response(
    spec: &ResponseSpec,
    doc: &Document,
) -> Result<ResponseSpec, ResolveError> {
    let Some(reference) = spec.reference.as_deref() else {
        return Ok(spec.clone());
    };
    let target = doc.response_at(reference)?;
    let mut resolved = target.clone();
    resolved.reference = None;
    if spec.description.is_some() {
        resolved.description = spec.description.clone();
    }
    if spec.schema.is_some() {
        resolved.schema = spec.schema.clone();
    }
    resolve_response(&resolved, doc)
}

/// Deep merge where `overlay` is the more locally declared side: its
/// scalars win, arrays concatenate, and properties merge per key.
pub(crate) fn merged(base: Schema, overlay: Schema) -> Schema {
    let mut properties = base.properties;
    for (name, value) in overlay.properties {
        match properties.entry(name) {
            Entry::Occupied(mut entry) => {
                let existing = std::mem::take(entry.get_mut());
                *entry.get_mut() = merged(existing, value);
            }
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
    }

    let mut required = base.required;
    required.extend(overlay.required);

    let mut enum_values = base.enum_values;
    enum_values.extend(overlay.enum_values);

    let mut all_of = base.all_of;
    all_of.extend(overlay.all_of);

    Schema {
        reference: overlay.reference.or(base.reference),
        schema_type: overlay.schema_type.or(base.schema_type),
        format: overlay.format.or(base.format),
        description: overlay.description.or(base.description),
        discriminator: overlay.discriminator.or(base.discriminator),
        properties,
        required,
        items: merged_boxes(base.items, overlay.items),
        all_of,
        enum_values,
        additional_properties: merged_boxes(base.additional_properties, overlay.additional_properties),
    }
}

fn merged_boxes(base: Option<Box<Schema>>, overlay: Option<Box<Schema>>) -> Option<Box<Schema>> {
    match (base, overlay) {
        (Some(base), Some(overlay)) => Some(Box::new(merged(*base, *overlay))),
        (base, overlay) => overlay.or(base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec;

    fn doc(json: serde_json::Value) -> Document {
        serde_json::from_value(json).unwrap()
    }

    fn schema(json: serde_json::Value) -> Schema {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn resolution_is_idempotent_without_refs() {
        let input = schema(serde_json::json!({
            "type": "object",
            "properties": { "name": { "type": "string" } },
            "required": ["name"]
        }));
        let resolved = resolve(&input, &Document::default(), Resolution::full()).unwrap();
        assert_eq!(resolved, input);
    }

    #[test]
    fn resolves_nested_refs_to_fixed_point() {
        let document = doc(serde_json::json!({
            "definitions": {
                "Outer": { "$ref": "#/definitions/Inner" },
                "Inner": { "type": "string" }
            }
        }));
        let input = schema(serde_json::json!({ "$ref": "#/definitions/Outer" }));
        let resolved = resolve(&input, &document, Resolution::refs_only()).unwrap();
        assert_eq!(resolved.schema_type.as_deref(), Some("string"));
        assert!(resolved.reference.is_none());
    }

    #[test]
    fn all_of_concatenates_required() {
        let document = doc(serde_json::json!({}));
        let input = schema(serde_json::json!({
            "allOf": [
                { "type": "object", "properties": { "a": { "type": "string" } }, "required": ["a"] },
                { "type": "object", "properties": { "b": { "type": "string" } }, "required": ["b"] }
            ]
        }));
        let resolved = resolve(&input, &document, Resolution::full()).unwrap();
        assert!(resolved.required.iter().any(|r| r == "a"));
        assert!(resolved.required.iter().any(|r| r == "b"));
        assert_eq!(resolved.properties.len(), 2);
    }

    #[test]
    fn own_fields_win_over_ref_target() {
        let document = doc(serde_json::json!({
            "definitions": {
                "Base": { "type": "string", "format": "date" }
            }
        }));
        let input = schema(serde_json::json!({
            "$ref": "#/definitions/Base",
            "format": "date-time"
        }));
        let resolved = resolve(&input, &document, Resolution::refs_only()).unwrap();
        assert_eq!(resolved.format.as_deref(), Some("date-time"));
        assert_eq!(resolved.schema_type.as_deref(), Some("string"));
    }

    #[test]
    fn ignored_ref_branch_contributes_nothing() {
        let document = doc(serde_json::json!({
            "definitions": {
                "Base": {
                    "type": "object",
                    "properties": { "x": { "type": "string" } }
                }
            }
        }));
        let input = schema(serde_json::json!({
            "allOf": [
                { "$ref": "#/definitions/Base" },
                { "type": "object", "properties": { "y": { "type": "string" } } }
            ]
        }));
        let resolved = resolve(
            &input,
            &document,
            Resolution::full_ignoring(Some("#/definitions/Base")),
        )
        .unwrap();
        assert!(!resolved.properties.contains_key("x"));
        assert!(resolved.properties.contains_key("y"));

        let flattened = resolve(&input, &document, Resolution::full()).unwrap();
        assert!(flattened.properties.contains_key("x"));
        assert!(flattened.properties.contains_key("y"));
    }

    #[test]
    fn rejects_external_refs() {
        let input = schema(serde_json::json!({ "$ref": "other.json#/definitions/Pet" }));
        let result = resolve(&input, &Document::default(), Resolution::refs_only());
        assert!(matches!(
            result,
            Err(ResolveError::InvalidRefFormat(_))
        ));
    }

    #[test]
    fn missing_ref_target_is_an_error() {
        let input = schema(serde_json::json!({ "$ref": "#/definitions/Nope" }));
        let result = resolve(&input, &Document::default(), Resolution::refs_only());
        assert!(matches!(result, Err(ResolveError::RefTargetNotFound(_))));
    }

    #[test]
    fn parameter_ref_resolution_keeps_local_fields() {
        let document: Document = spec::from_json(
            r#"{
                "swagger": "2.0",
                "parameters": {
                    "PageSize": {
                        "name": "pageSize",
                        "in": "query",
                        "type": "integer",
                        "required": false
                    }
                }
            }"#,
        )
        .unwrap();
        let param: ParameterSpec = serde_json::from_value(serde_json::json!({
            "$ref": "#/parameters/PageSize",
            "required": true
        }))
        .unwrap();
        let resolved = resolve_parameter(&param, &document).unwrap();
        assert_eq!(resolved.name.as_deref(), Some("pageSize"));
        assert_eq!(resolved.required, Some(true));
        assert_eq!(resolved.inline.schema_type.as_deref(), Some("integer"));
    }
}
