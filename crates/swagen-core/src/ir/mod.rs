pub mod methods;
pub mod models;

pub use methods::{HttpVerb, Method, Param, ParamLocation};
pub use models::{EnumModel, EnumValue, Model, ObjectModel, Property, SubclassRef, TypeInfo};

use serde::Serialize;

/// Everything a template renderer needs for one API: plain data, no
/// behavior.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateData {
    pub api_name: String,
    pub methods: Vec<Method>,
    pub object_models: Vec<ObjectModel>,
    pub enum_models: Vec<EnumModel>,
}
