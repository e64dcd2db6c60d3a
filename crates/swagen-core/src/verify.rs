//! Sanity checks over built template data.
//!
//! Verification never fails early; every problem in the data is reported so
//! a spec author can fix them all in one pass.

use std::fmt;

use serde::Serialize;

use crate::ir::{ParamLocation, TemplateData};

/// The category of a verification finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MissingType,
    BadFormDataType,
    DuplicateModelName,
    UnnamedModel,
}

impl DiagnosticKind {
    /// Human heading used when findings are grouped by kind.
    pub fn heading(&self) -> &'static str {
        match self {
            DiagnosticKind::MissingType => "Parameters and responses without types",
            DiagnosticKind::BadFormDataType => "formData parameters that are not files",
            DiagnosticKind::DuplicateModelName => "Duplicate model names",
            DiagnosticKind::UnnamedModel => "Models without names",
        }
    }
}

/// One verification finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.heading(), self.message)
    }
}

/// Check built template data for the problems codegen cannot survive:
/// untyped parameters or responses, `formData` parameters that are not
/// files, duplicate model names, and unnamed models.
pub fn verify(data: &TemplateData) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for method in &data.methods {
        for param in method.params.iter().chain(std::iter::once(&method.response)) {
            if param.type_name.is_empty() {
                diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::MissingType,
                    message: format!(
                        "{} in method {} has no type",
                        if param.server_name.is_empty() {
                            "response".to_string()
                        } else {
                            format!("parameter {}", param.server_name)
                        },
                        method.name
                    ),
                });
            }
            if param.location == Some(ParamLocation::FormData)
                && param.schema_type.as_deref() != Some("file")
            {
                diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::BadFormDataType,
                    message: format!(
                        "formData parameter {} in method {} must be a file, found {}",
                        param.server_name,
                        method.name,
                        param.schema_type.as_deref().unwrap_or("no type")
                    ),
                });
            }
        }
    }

    let names: Vec<&str> = data
        .object_models
        .iter()
        .map(|m| m.name.as_str())
        .chain(data.enum_models.iter().map(|m| m.name.as_str()))
        .collect();
    let mut reported: Vec<&str> = Vec::new();
    for &name in &names {
        if name.is_empty() {
            diagnostics.push(Diagnostic {
                kind: DiagnosticKind::UnnamedModel,
                message: "a model has an empty name".to_string(),
            });
            continue;
        }
        let count = names.iter().filter(|&&n| n == name).count();
        if count > 1 && !reported.contains(&name) {
            reported.push(name);
            diagnostics.push(Diagnostic {
                kind: DiagnosticKind::DuplicateModelName,
                message: format!("{count} models are named {name}"),
            });
        }
    }

    diagnostics
}
