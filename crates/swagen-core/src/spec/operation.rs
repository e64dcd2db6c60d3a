use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::parameter::ParameterSpec;
use super::response::ResponseSpec;
use crate::ir::HttpVerb;

/// One path + verb operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OperationSpec {
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterSpec>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, ResponseSpec>,
}

/// A path item: one optional operation per HTTP verb, plus parameters shared
/// by every operation on the path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<OperationSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<OperationSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<OperationSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<OperationSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<OperationSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<OperationSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<OperationSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<OperationSpec>,
}

impl PathItem {
    /// The operation defined for `verb`, if any.
    pub fn operation(&self, verb: HttpVerb) -> Option<&OperationSpec> {
        match verb {
            HttpVerb::Get => self.get.as_ref(),
            HttpVerb::Put => self.put.as_ref(),
            HttpVerb::Post => self.post.as_ref(),
            HttpVerb::Delete => self.delete.as_ref(),
            HttpVerb::Options => self.options.as_ref(),
            HttpVerb::Head => self.head.as_ref(),
            HttpVerb::Patch => self.patch.as_ref(),
            HttpVerb::Trace => self.trace.as_ref(),
        }
    }
}
