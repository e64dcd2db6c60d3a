use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::operation::PathItem;
use super::parameter::ParameterSpec;
use super::response::ResponseSpec;
use super::schema::Schema;
use crate::error::ResolveError;

/// API metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Info {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A Swagger 2.x document. The document is read-only throughout generation;
/// resolution always returns new values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swagger: Option<String>,

    #[serde(default)]
    pub info: Info,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(rename = "basePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathItem>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, Schema>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, ParameterSpec>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, ResponseSpec>,
}

impl Document {
    /// Look up the schema a `#/definitions/<name>` reference points at.
    pub fn schema_at(&self, reference: &str) -> Result<&Schema, ResolveError> {
        let (section, name) = split_ref(reference)?;
        let found = match section {
            "definitions" => self.definitions.get(name),
            _ => None,
        };
        found.ok_or_else(|| ResolveError::RefTargetNotFound(reference.to_string()))
    }

    /// Look up a reusable parameter a `#/parameters/<name>` reference points
    /// at.
    pub fn parameter_at(&self, reference: &str) -> Result<&ParameterSpec, ResolveError> {
        let (section, name) = split_ref(reference)?;
        let found = match section {
            "parameters" => self.parameters.get(name),
            _ => None,
        };
        found.ok_or_else(|| ResolveError::RefTargetNotFound(reference.to_string()))
    }

    /// Look up a reusable response a `#/responses/<name>` reference points
    /// at.
    pub fn response_at(&self, reference: &str) -> Result<&ResponseSpec, ResolveError> {
        let (section, name) = split_ref(reference)?;
        let found = match section {
            "responses" => self.responses.get(name),
            _ => None,
        };
        found.ok_or_else(|| ResolveError::RefTargetNotFound(reference.to_string()))
    }
}

/// Split `#/<section>/<name>`. Refs not rooted at `#/` are a configuration
/// error; external documents are unsupported.
fn split_ref(reference: &str) -> Result<(&str, &str), ResolveError> {
    let rest = reference
        .strip_prefix("#/")
        .ok_or_else(|| ResolveError::InvalidRefFormat(reference.to_string()))?;
    rest.split_once('/')
        .ok_or_else(|| ResolveError::RefTargetNotFound(reference.to_string()))
}
