use serde::Serialize;

/// The resolved target-language type name for a schema, plus an optional
/// preserved format tag (`date`, `date-time`, `int64`) that codegen needs
/// but type identity does not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// One property on a generated object model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Client-cased name.
    pub name: String,
    /// The property name as written in the spec.
    pub spec_name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub is_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Property {
    /// Structural equality ignoring description and requiredness. Used to
    /// suppress re-declared inherited properties.
    pub fn same_shape(&self, other: &Property) -> bool {
        self.name == other.name
            && self.spec_name == other.spec_name
            && self.type_name == other.type_name
            && self.format == other.format
    }

    fn stripped(&self) -> Property {
        Property {
            description: None,
            ..self.clone()
        }
    }
}

/// A generated named type destined for client-code emission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Model {
    #[serde(rename = "object")]
    Object(ObjectModel),
    #[serde(rename = "enum")]
    Enum(EnumModel),
}

impl Model {
    pub fn name(&self) -> &str {
        match self {
            Model::Object(model) => &model.name,
            Model::Enum(model) => &model.name,
        }
    }

    /// Structural equality ignoring every `description` field, recursively.
    /// Two models that differ only in doc text are the same type.
    pub fn eq_ignoring_description(&self, other: &Model) -> bool {
        self.stripped() == other.stripped()
    }

    fn stripped(&self) -> Model {
        match self {
            Model::Object(model) => Model::Object(model.stripped()),
            Model::Enum(model) => Model::Enum(model.clone()),
        }
    }
}

/// A class-like model generated from an object schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectModel {
    pub name: String,
    pub spec_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Own (non-inherited) properties.
    pub properties: Vec<Property>,
    /// The superclass's properties and inherited properties, transitively
    /// flattened.
    pub inherited_properties: Vec<Property>,
    /// Own properties followed by inherited ones. Generated constructors
    /// rely on this ordering.
    pub initializer_properties: Vec<Property>,
    /// Models lifted from inline object properties; these nest inside the
    /// owner class instead of becoming top-level siblings.
    pub nested_models: Vec<ObjectModel>,
    /// Filled by the subclass resolution pass after dedup.
    pub subclasses: Vec<SubclassRef>,
}

impl ObjectModel {
    fn stripped(&self) -> ObjectModel {
        ObjectModel {
            description: None,
            properties: self.properties.iter().map(Property::stripped).collect(),
            inherited_properties: self
                .inherited_properties
                .iter()
                .map(Property::stripped)
                .collect(),
            initializer_properties: self
                .initializer_properties
                .iter()
                .map(Property::stripped)
                .collect(),
            nested_models: self.nested_models.iter().map(ObjectModel::stripped).collect(),
            ..self.clone()
        }
    }
}

/// A pointer from a superclass model to one of its subclasses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubclassRef {
    pub name: String,
    pub spec_name: String,
}

/// An enum model generated from a schema with an `enum` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumModel {
    pub name: String,
    /// The mapped primitive type of the enum's raw values.
    pub enum_type: String,
    pub values: Vec<EnumValue>,
}

/// One enum case: a client-cased identifier and the literal it stands for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValue {
    pub name: String,
    pub value: String,
}
