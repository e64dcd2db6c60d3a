//! Recursive type inference: schema in, target-language type name plus the
//! models minted along the way out.

use crate::error::GenerateError;
use crate::ir::{EnumModel, EnumValue, Model, ObjectModel, Property, TypeInfo};
use crate::spec::{Document, Schema, SchemaKind};
use crate::transform::naming;
use crate::transform::resolver::{self, Resolution};
use crate::typemap::TypeMap;

/// The result of inferring one schema: its type, and every model the
/// inference created (the schema's own model first, dependencies after).
#[derive(Debug, Clone, PartialEq)]
pub struct Inferred {
    pub type_info: TypeInfo,
    pub models: Vec<Model>,
}

/// Walks schemas recursively, minting models for objects and enums and
/// mapping everything else through the language type map.
pub struct ModelInferencer<'a> {
    doc: &'a Document,
    type_map: &'a TypeMap,
    /// Names of object schemas currently being inferred up the call stack.
    /// Hitting one again means a reference cycle; the recursion stops with
    /// a bare type name and lets the already-in-flight call mint the model.
    visiting: Vec<String>,
}

impl<'a> ModelInferencer<'a> {
    pub fn new(doc: &'a Document, type_map: &'a TypeMap) -> Self {
        ModelInferencer {
            doc,
            type_map,
            visiting: Vec::new(),
        }
    }

    /// Infer the type of `schema`. Named (`$ref`) schemas take their name
    /// from the ref target; inline schemas take `default_name`.
    pub fn infer(&mut self, schema: &Schema, default_name: &str) -> Result<Inferred, GenerateError> {
        let (name, spec_name) = match schema.reference.as_deref() {
            Some(reference) => (
                naming::class_name_from_ref(reference),
                naming::last_ref_component(reference).to_string(),
            ),
            None => (default_name.to_string(), default_name.to_string()),
        };

        if schema.reference.is_some() && self.visiting.contains(&name) {
            return Ok(Inferred {
                type_info: TypeInfo { name, format: None },
                models: Vec::new(),
            });
        }

        let ref_resolved = resolver::resolve(schema, self.doc, Resolution::refs_only())?;
        // The first allOf branch with a $ref is the inheritance edge; its
        // fields stay out of the flattened schema and become the superclass.
        let superclass_schema = ref_resolved
            .all_of
            .iter()
            .find(|branch| branch.reference.is_some())
            .cloned();
        let ignore_ref = superclass_schema
            .as_ref()
            .and_then(|branch| branch.reference.as_deref());
        let resolved = resolver::resolve(schema, self.doc, Resolution::full_ignoring(ignore_ref))?;

        match resolved.kind() {
            SchemaKind::Enum => self.enum_model(&resolved, name),
            SchemaKind::Array => {
                let items = resolved
                    .items
                    .as_deref()
                    .ok_or_else(|| GenerateError::MissingArrayItems {
                        schema: resolved.describe(),
                    })?;
                let element = self.infer(items, &name)?;
                Ok(Inferred {
                    type_info: self.type_map.array_type(&element.type_info),
                    models: element.models,
                })
            }
            SchemaKind::Object => {
                self.visiting.push(name.clone());
                let result = self.object_model(&resolved, superclass_schema, name, spec_name);
                self.visiting.pop();
                result
            }
            SchemaKind::Primitive(_) | SchemaKind::Untyped => Ok(Inferred {
                type_info: self.primitive_type(&resolved, &name)?,
                models: Vec::new(),
            }),
        }
    }

    fn enum_model(&self, resolved: &Schema, name: String) -> Result<Inferred, GenerateError> {
        let enum_type = match resolved.schema_type.as_deref() {
            None => self.type_map.void_type().name,
            Some(schema_type) => self
                .type_map
                .primitive(schema_type, resolved.format.as_deref(), "")
                .ok_or_else(|| GenerateError::UnknownSchemaType {
                    schema_type: schema_type.to_string(),
                    schema: resolved.describe(),
                })?
                .name,
        };
        let values = resolved
            .enum_values
            .iter()
            .map(|value| EnumValue {
                name: naming::name_from_components(&[&naming::literal_text(value)]),
                value: naming::map_primitive_value(value, resolved.schema_type.as_deref()),
            })
            .collect();
        Ok(Inferred {
            type_info: TypeInfo {
                name: name.clone(),
                format: None,
            },
            models: vec![Model::Enum(EnumModel {
                name,
                enum_type,
                values,
            })],
        })
    }

    fn object_model(
        &mut self,
        resolved: &Schema,
        superclass_schema: Option<Schema>,
        name: String,
        spec_name: String,
    ) -> Result<Inferred, GenerateError> {
        let mut properties = Vec::new();
        let mut nested_models = Vec::new();
        let mut sibling_models = Vec::new();

        for (prop_name, prop_schema) in &resolved.properties {
            // Inline object properties nest inside the owner class instead of
            // becoming top-level models.
            let is_nested = prop_schema.reference.is_none()
                && prop_schema.schema_type.as_deref() == Some("object")
                && !prop_schema.properties.is_empty();
            let skip = if is_nested { 1 } else { 0 };
            let default_type_name = naming::class_name_from_components(&[&name, prop_name], skip);
            let mut inferred = self.infer(prop_schema, &default_type_name)?;

            let type_name = if is_nested && !inferred.models.is_empty() {
                let first = inferred.models.remove(0);
                match first {
                    Model::Object(nested) => {
                        let dotted = format!("{name}.{}", nested.name);
                        nested_models.push(nested);
                        dotted
                    }
                    other => {
                        let type_name = other.name().to_string();
                        sibling_models.push(other);
                        type_name
                    }
                }
            } else {
                inferred.type_info.name.clone()
            };
            sibling_models.extend(inferred.models);

            properties.push(Property {
                name: naming::name_from_components(&[prop_name]),
                spec_name: prop_name.clone(),
                type_name,
                format: inferred.type_info.format.clone(),
                is_required: resolved.required.iter().any(|r| r == prop_name),
                description: prop_schema.description.clone(),
            });
        }

        let mut inherited_properties = Vec::new();
        let mut superclass = None;
        let mut superclass_models = Vec::new();
        if let Some(parent) = superclass_schema {
            let inferred = self.infer(&parent, "")?;
            superclass = Some(inferred.type_info.name.clone());
            if let Some(Model::Object(parent_model)) = inferred.models.first() {
                inherited_properties.extend(parent_model.properties.iter().cloned());
                inherited_properties.extend(parent_model.inherited_properties.iter().cloned());
            }
            superclass_models = inferred.models;
        }

        // A subclass may re-declare an inherited property (say, to tighten
        // its doc text); keep only one copy.
        properties.retain(|own| {
            !inherited_properties
                .iter()
                .any(|inherited| inherited.same_shape(own))
        });

        let mut initializer_properties = properties.clone();
        initializer_properties.extend(inherited_properties.iter().cloned());

        let model = ObjectModel {
            name: name.clone(),
            spec_name,
            superclass,
            discriminator: resolved.discriminator.clone(),
            description: resolved.description.clone(),
            properties,
            inherited_properties,
            initializer_properties,
            nested_models,
            subclasses: Vec::new(),
        };

        let mut models = vec![Model::Object(model)];
        models.extend(sibling_models);
        models.extend(superclass_models);

        Ok(Inferred {
            type_info: TypeInfo { name, format: None },
            models,
        })
    }

    /// Map a schema with no properties and no enum through the language
    /// table. Untyped schemas become the language's unit type; `object`
    /// without properties becomes the language's map type keyed by its
    /// `additionalProperties` value type.
    fn primitive_type(&mut self, resolved: &Schema, name: &str) -> Result<TypeInfo, GenerateError> {
        let Some(schema_type) = resolved.schema_type.as_deref() else {
            return Ok(self.type_map.void_type());
        };
        let inner = match (schema_type, resolved.additional_properties.as_deref()) {
            ("object", Some(value_schema)) => {
                let value_name = naming::class_name_from_components(&[name, "value"], 0);
                self.infer(value_schema, &value_name)?.type_info.name
            }
            ("object", None) => self.type_map.any_name().to_string(),
            _ => String::new(),
        };
        self.type_map
            .primitive(schema_type, resolved.format.as_deref(), &inner)
            .ok_or_else(|| GenerateError::UnknownSchemaType {
                schema_type: schema_type.to_string(),
                schema: resolved.describe(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec;

    fn doc(json: &str) -> Document {
        spec::from_json(json).unwrap()
    }

    fn infer_definition(document: &Document, name: &str) -> Inferred {
        let map = TypeMap::swift();
        let mut inferencer = ModelInferencer::new(document, &map);
        let reference = Schema {
            reference: Some(format!("#/definitions/{name}")),
            ..Schema::default()
        };
        inferencer.infer(&reference, name).unwrap()
    }

    #[test]
    fn primitive_schema_mints_no_models() {
        let document = doc(r#"{ "swagger": "2.0" }"#);
        let map = TypeMap::swift();
        let mut inferencer = ModelInferencer::new(&document, &map);
        let schema: Schema =
            serde_json::from_value(serde_json::json!({ "type": "integer", "format": "int64" }))
                .unwrap();
        let inferred = inferencer.infer(&schema, "Ignored").unwrap();
        assert_eq!(inferred.type_info.name, "Int64");
        assert!(inferred.models.is_empty());
    }

    #[test]
    fn untyped_schema_is_void() {
        let document = doc(r#"{ "swagger": "2.0" }"#);
        let map = TypeMap::swift();
        let mut inferencer = ModelInferencer::new(&document, &map);
        let inferred = inferencer.infer(&Schema::default(), "Ignored").unwrap();
        assert_eq!(inferred.type_info.name, "Void");
    }

    #[test]
    fn object_without_properties_is_a_map() {
        let document = doc(r#"{ "swagger": "2.0" }"#);
        let map = TypeMap::swift();
        let mut inferencer = ModelInferencer::new(&document, &map);
        let schema: Schema = serde_json::from_value(serde_json::json!({
            "type": "object",
            "additionalProperties": { "type": "string" }
        }))
        .unwrap();
        let inferred = inferencer.infer(&schema, "Tags").unwrap();
        assert_eq!(inferred.type_info.name, "Dictionary<String, String>");
        assert!(inferred.models.is_empty());
    }

    #[test]
    fn ref_names_the_model() {
        let document = doc(
            r#"{
                "swagger": "2.0",
                "definitions": {
                    "pet_record": {
                        "type": "object",
                        "properties": { "id": { "type": "integer", "format": "int64" } }
                    }
                }
            }"#,
        );
        let inferred = infer_definition(&document, "pet_record");
        assert_eq!(inferred.type_info.name, "PetRecord");
        let Model::Object(model) = &inferred.models[0] else {
            panic!("expected object model");
        };
        assert_eq!(model.spec_name, "pet_record");
        assert_eq!(model.properties[0].type_name, "Int64");
        assert_eq!(model.properties[0].format.as_deref(), Some("int64"));
    }

    #[test]
    fn self_referential_schema_terminates() {
        let document = doc(
            r##"{
                "swagger": "2.0",
                "definitions": {
                    "Node": {
                        "type": "object",
                        "properties": {
                            "value": { "type": "string" },
                            "next": { "$ref": "#/definitions/Node" }
                        }
                    }
                }
            }"##,
        );
        let inferred = infer_definition(&document, "Node");
        assert_eq!(inferred.models.len(), 1);
        let Model::Object(model) = &inferred.models[0] else {
            panic!("expected object model");
        };
        let next = model.properties.iter().find(|p| p.spec_name == "next").unwrap();
        assert_eq!(next.type_name, "Node");
    }

    #[test]
    fn indirect_cycle_terminates() {
        let document = doc(
            r##"{
                "swagger": "2.0",
                "definitions": {
                    "A": {
                        "type": "object",
                        "properties": { "b": { "$ref": "#/definitions/B" } }
                    },
                    "B": {
                        "type": "object",
                        "properties": { "a": { "$ref": "#/definitions/A" } }
                    }
                }
            }"##,
        );
        let inferred = infer_definition(&document, "A");
        assert_eq!(inferred.models.len(), 2);
        let Model::Object(b) = &inferred.models[1] else {
            panic!("expected object model");
        };
        assert_eq!(b.name, "B");
        assert_eq!(b.properties[0].type_name, "A");
    }

    #[test]
    fn unknown_type_is_an_error() {
        let document = doc(r#"{ "swagger": "2.0" }"#);
        let map = TypeMap::swift();
        let mut inferencer = ModelInferencer::new(&document, &map);
        let schema: Schema =
            serde_json::from_value(serde_json::json!({ "type": "unicorn" })).unwrap();
        let result = inferencer.infer(&schema, "X");
        assert!(matches!(
            result,
            Err(GenerateError::UnknownSchemaType { schema_type, .. }) if schema_type == "unicorn"
        ));
    }
}
