//! Per-language primitive type tables.
//!
//! Each entry is a closed tagged value instead of a
//! string-or-table-or-function inspected at runtime: a literal name, a
//! format-keyed table with a default, or a constructor that wraps an inner
//! type name (arrays and maps).

use crate::ir::TypeInfo;

/// One type-map entry.
#[derive(Clone, Copy)]
pub enum TypeMapping {
    /// A literal target-language type name.
    Literal(&'static str),
    /// Pick by the schema's `format`, falling back to `default`.
    ByFormat {
        default: &'static str,
        formats: &'static [(&'static str, &'static str)],
    },
    /// Compose a type name around an inner type name (array/map wrappers).
    Parametric(fn(&str) -> String),
}

impl TypeMapping {
    fn apply(&self, format: Option<&str>, inner: &str) -> String {
        match self {
            TypeMapping::Literal(name) => (*name).to_string(),
            TypeMapping::ByFormat { default, formats } => formats
                .iter()
                .find(|(key, _)| Some(*key) == format)
                .map(|(_, name)| (*name).to_string())
                .unwrap_or_else(|| (*default).to_string()),
            TypeMapping::Parametric(compose) => compose(inner),
        }
    }
}

/// Formats that survive into [`TypeInfo::format`] even though the mapped
/// name already encodes them; codegen needs them for parsing/serialization.
const PRESERVED_FORMATS: &[(&str, &str)] = &[
    ("string", "date"),
    ("string", "date-time"),
    ("integer", "int64"),
];

/// A per-language table from Swagger primitive types to target-language
/// type names.
#[derive(Clone, Copy)]
pub struct TypeMap {
    void: &'static str,
    any: &'static str,
    entries: &'static [(&'static str, TypeMapping)],
}

impl TypeMap {
    /// The unit type used for absent schemas and responses.
    pub fn void_type(&self) -> TypeInfo {
        TypeInfo {
            name: self.void.to_string(),
            format: None,
        }
    }

    /// The catch-all type used for untyped map values.
    pub fn any_name(&self) -> &'static str {
        self.any
    }

    fn mapping(&self, schema_type: &str) -> Option<&TypeMapping> {
        self.entries
            .iter()
            .find(|(key, _)| *key == schema_type)
            .map(|(_, mapping)| mapping)
    }

    /// Map a primitive `(type, format)` pair. `inner` feeds parametric
    /// entries (the map value type for `object`). Returns `None` for types
    /// the table doesn't know.
    pub fn primitive(
        &self,
        schema_type: &str,
        format: Option<&str>,
        inner: &str,
    ) -> Option<TypeInfo> {
        let mapping = self.mapping(schema_type)?;
        let name = mapping.apply(format, inner);
        let preserved = format
            .filter(|f| PRESERVED_FORMATS.contains(&(schema_type, f)))
            .map(str::to_string);
        Some(TypeInfo {
            name,
            format: preserved,
        })
    }

    /// Wrap an element type in the language's array constructor. The
    /// element's preserved format rides along.
    pub fn array_type(&self, element: &TypeInfo) -> TypeInfo {
        let name = match self.mapping("array") {
            Some(mapping) => mapping.apply(None, &element.name),
            None => element.name.clone(),
        };
        TypeInfo {
            name,
            format: element.format.clone(),
        }
    }

    pub fn swift() -> TypeMap {
        TypeMap {
            void: "Void",
            any: "Any",
            entries: SWIFT_ENTRIES,
        }
    }

    pub fn kotlin() -> TypeMap {
        TypeMap {
            void: "Response<Void>",
            any: "Any",
            entries: KOTLIN_ENTRIES,
        }
    }

    pub fn javascript() -> TypeMap {
        TypeMap {
            void: "void",
            any: "any",
            entries: JS_ENTRIES,
        }
    }
}

fn swift_dictionary(inner: &str) -> String {
    format!("Dictionary<String, {inner}>")
}

fn swift_array(inner: &str) -> String {
    format!("Array<{inner}>")
}

const SWIFT_ENTRIES: &[(&str, TypeMapping)] = &[
    ("boolean", TypeMapping::Literal("Bool")),
    (
        "number",
        TypeMapping::ByFormat {
            default: "Double",
            formats: &[("int64", "Int64"), ("int32", "Int32")],
        },
    ),
    ("file", TypeMapping::Literal("URL")),
    (
        "integer",
        TypeMapping::ByFormat {
            default: "Int32",
            formats: &[("int64", "Int64")],
        },
    ),
    (
        "string",
        TypeMapping::ByFormat {
            default: "String",
            formats: &[("date", "Date"), ("date-time", "Date")],
        },
    ),
    ("object", TypeMapping::Parametric(swift_dictionary)),
    ("array", TypeMapping::Parametric(swift_array)),
];

fn kotlin_map(inner: &str) -> String {
    format!("Map<String, {inner}>")
}

fn kotlin_list(inner: &str) -> String {
    format!("List<{inner}>")
}

const KOTLIN_ENTRIES: &[(&str, TypeMapping)] = &[
    ("boolean", TypeMapping::Literal("Boolean")),
    (
        "number",
        TypeMapping::ByFormat {
            default: "Double",
            formats: &[("int64", "Long"), ("int32", "Int")],
        },
    ),
    ("file", TypeMapping::Literal("MultipartBody.Part")),
    (
        "integer",
        TypeMapping::ByFormat {
            default: "Int",
            formats: &[("int64", "Long")],
        },
    ),
    (
        "string",
        TypeMapping::ByFormat {
            default: "String",
            formats: &[("date", "OffsetDateTime"), ("date-time", "OffsetDateTime")],
        },
    ),
    ("object", TypeMapping::Parametric(kotlin_map)),
    ("array", TypeMapping::Parametric(kotlin_list)),
];

fn js_map(inner: &str) -> String {
    format!("Map<string, {inner}>")
}

fn js_array(inner: &str) -> String {
    format!("Array<{inner}>")
}

const JS_ENTRIES: &[(&str, TypeMapping)] = &[
    ("boolean", TypeMapping::Literal("boolean")),
    ("number", TypeMapping::Literal("number")),
    // Platforms disagree on FormData, so generated JS leaves files untyped.
    ("file", TypeMapping::Literal("any")),
    ("integer", TypeMapping::Literal("number")),
    ("string", TypeMapping::Literal("string")),
    ("object", TypeMapping::Parametric(js_map)),
    ("array", TypeMapping::Parametric(js_array)),
];
