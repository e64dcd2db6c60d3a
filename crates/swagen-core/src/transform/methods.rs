//! Builds client methods from path items and operations.

use crate::error::GenerateError;
use crate::ir::{HttpVerb, Method, Model, Param};
use crate::spec::{Document, OperationSpec, ParameterSpec, ResponseSpec};
use crate::transform::inference::ModelInferencer;
use crate::transform::naming;
use crate::transform::resolver::{self, Resolution};
use crate::typemap::TypeMap;
use heck::ToLowerCamelCase;

/// A built method plus the models its parameter and response schemas
/// minted; dedup pools the models afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodWithModels {
    pub method: Method,
    pub models: Vec<Model>,
}

/// Join URL parts into a path with exactly one leading slash, no doubled
/// slashes, and no trailing slash.
pub(crate) fn join_url(parts: &[&str]) -> String {
    let mut joined = String::from("/");
    for part in parts {
        for segment in part.split('/').filter(|s| !s.is_empty()) {
            if !joined.ends_with('/') {
                joined.push('/');
            }
            joined.push_str(segment);
        }
    }
    if joined.len() > 1 && joined.ends_with('/') {
        joined.pop();
    }
    joined
}

/// Build every method in the document, sorted by path.
pub fn methods_from_document(
    doc: &Document,
    base_path: &str,
    type_map: &TypeMap,
) -> Result<Vec<MethodWithModels>, GenerateError> {
    let mut methods = Vec::new();
    for (end_path, item) in &doc.paths {
        for verb in HttpVerb::ALL {
            if let Some(op) = item.operation(verb) {
                methods.push(method_from_operation(
                    end_path,
                    &item.parameters,
                    base_path,
                    verb,
                    op,
                    doc,
                    type_map,
                )?);
            }
        }
    }
    methods.sort_by(|a, b| a.method.path.cmp(&b.method.path));
    Ok(methods)
}

fn method_from_operation(
    end_path: &str,
    path_params: &[ParameterSpec],
    base_path: &str,
    verb: HttpVerb,
    op: &OperationSpec,
    doc: &Document,
    type_map: &TypeMap,
) -> Result<MethodWithModels, GenerateError> {
    let name = match op.operation_id.as_deref() {
        Some(id) => id.to_lower_camel_case(),
        None => join_url(&[end_path, verb.as_str()]).to_lower_camel_case(),
    };

    let mut inferencer = ModelInferencer::new(doc, type_map);
    let mut models = Vec::new();
    let mut params = Vec::new();
    for spec in path_params.iter().chain(&op.parameters) {
        params.push(param_from_spec(spec, &name, doc, &mut inferencer, &mut models)?);
    }

    let response = match select_response(op) {
        Some(spec) => response_param(spec, &name, doc, &mut inferencer, &mut models)?,
        None => void_response(type_map),
    };

    Ok(MethodWithModels {
        method: Method {
            path: join_url(&[base_path, end_path]),
            method: verb,
            name,
            description: op.description.clone(),
            params,
            response,
        },
        models,
    })
}

fn param_from_spec(
    spec: &ParameterSpec,
    method_name: &str,
    doc: &Document,
    inferencer: &mut ModelInferencer<'_>,
    models: &mut Vec<Model>,
) -> Result<Param, GenerateError> {
    let resolved = resolver::resolve_parameter(spec, doc)?;
    let server_name = resolved.name.clone().unwrap_or_default();
    let schema = resolved.effective_schema();

    let default_name = naming::class_name_from_components(&[method_name, &server_name], 0);
    let inferred = inferencer.infer(&schema, &default_name)?;
    models.extend(inferred.models);

    // The fully flattened schema's declared type feeds verification.
    let flattened = resolver::resolve(&schema, doc, Resolution::full())?;

    Ok(Param {
        name: server_name.to_lower_camel_case(),
        server_name,
        location: resolved.location,
        type_name: inferred.type_info.name,
        format: inferred.type_info.format,
        is_required: resolved.required.unwrap_or(false),
        description: resolved.description,
        schema_type: flattened.schema_type,
    })
}

/// Pick the response an operation's return type comes from: the first 2xx
/// status, else the first 3xx, else `default`.
fn select_response(op: &OperationSpec) -> Option<&ResponseSpec> {
    op.responses
        .iter()
        .find(|(status, _)| status.starts_with('2'))
        .or_else(|| op.responses.iter().find(|(status, _)| status.starts_with('3')))
        .or_else(|| op.responses.iter().find(|(status, _)| *status == "default"))
        .map(|(_, spec)| spec)
}

fn response_param(
    spec: &ResponseSpec,
    method_name: &str,
    doc: &Document,
    inferencer: &mut ModelInferencer<'_>,
    models: &mut Vec<Model>,
) -> Result<Param, GenerateError> {
    let resolved = resolver::resolve_response(spec, doc)?;
    let schema = resolved.schema.unwrap_or_default();
    let default_name = naming::class_name_from_components(&[method_name, "response"], 0);
    let inferred = inferencer.infer(&schema, &default_name)?;
    models.extend(inferred.models);
    Ok(Param {
        name: "response".to_string(),
        server_name: String::new(),
        location: None,
        type_name: inferred.type_info.name,
        format: inferred.type_info.format,
        is_required: false,
        description: resolved.description,
        schema_type: None,
    })
}

fn void_response(type_map: &TypeMap) -> Param {
    let void = type_map.void_type();
    Param {
        name: "response".to_string(),
        server_name: String::new(),
        location: None,
        type_name: void.name,
        format: None,
        is_required: false,
        description: None,
        schema_type: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(join_url(&["/v1/", "/pets"]), "/v1/pets");
        assert_eq!(join_url(&["", "pets/"]), "/pets");
        assert_eq!(join_url(&["/"]), "/");
        assert_eq!(join_url(&["v1", "pets/{petId}"]), "/v1/pets/{petId}");
    }

    #[test]
    fn response_selection_prefers_2xx_then_3xx_then_default() {
        let op: OperationSpec = serde_json::from_value(serde_json::json!({
            "responses": {
                "default": { "description": "d" },
                "404": { "description": "nope" },
                "201": { "description": "made" }
            }
        }))
        .unwrap();
        let chosen = select_response(&op).unwrap();
        assert_eq!(chosen.description.as_deref(), Some("made"));

        let op: OperationSpec = serde_json::from_value(serde_json::json!({
            "responses": {
                "default": { "description": "d" },
                "302": { "description": "moved" }
            }
        }))
        .unwrap();
        let chosen = select_response(&op).unwrap();
        assert_eq!(chosen.description.as_deref(), Some("moved"));

        let op: OperationSpec = serde_json::from_value(serde_json::json!({
            "responses": { "default": { "description": "d" } }
        }))
        .unwrap();
        let chosen = select_response(&op).unwrap();
        assert_eq!(chosen.description.as_deref(), Some("d"));
    }
}
