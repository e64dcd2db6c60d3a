use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A Swagger 2.x schema node.
///
/// Kept as one flat struct rather than a per-variant enum because `$ref` and
/// `allOf` resolution merges nodes field-wise; [`Schema::kind`] supplies the
/// tagged dispatch view once a node is fully resolved.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(rename = "allOf", default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<Schema>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,

    /// Swagger 2.x discriminator: the name of the property that tags which
    /// subclass a polymorphic instance is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<Box<Schema>>,
}

/// Dispatch classification of a resolved schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind<'a> {
    Enum,
    Array,
    Object,
    Primitive(&'a str),
    Untyped,
}

impl Schema {
    /// Classify a node for inference dispatch. Only meaningful after `$ref`
    /// and `allOf` resolution.
    pub fn kind(&self) -> SchemaKind<'_> {
        if !self.enum_values.is_empty() {
            return SchemaKind::Enum;
        }
        match self.schema_type.as_deref() {
            Some("array") => SchemaKind::Array,
            Some("object") if !self.properties.is_empty() => SchemaKind::Object,
            // Some specs omit `type: object` on schemas that declare properties.
            None if !self.properties.is_empty() => SchemaKind::Object,
            Some(other) => SchemaKind::Primitive(other),
            None => SchemaKind::Untyped,
        }
    }

    /// Render the node as one-line JSON for error messages.
    pub fn describe(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}
