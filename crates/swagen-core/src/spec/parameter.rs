use serde::{Deserialize, Serialize};

use super::schema::Schema;
use crate::ir::ParamLocation;

/// An operation or path-level parameter.
///
/// Swagger 2.x documents write parameters in two shapes: body parameters
/// nest their type under a `schema` field, while path/query/header/formData
/// parameters declare the schema fields (`type`, `format`, `items`, ...)
/// directly on the parameter. The `inline` flatten captures the second form
/// so both normalize through [`ParameterSpec::effective_schema`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParameterSpec {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<ParamLocation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,

    #[serde(flatten)]
    pub inline: Schema,
}

impl ParameterSpec {
    /// The canonical schema for this parameter, whichever shape the document
    /// used.
    pub fn effective_schema(&self) -> Schema {
        match &self.schema {
            Some(schema) => schema.clone(),
            None => self.inline.clone(),
        }
    }
}
