pub mod document;
pub mod operation;
pub mod parameter;
pub mod response;
pub mod schema;

pub use document::{Document, Info};
pub use operation::{OperationSpec, PathItem};
pub use parameter::ParameterSpec;
pub use response::ResponseSpec;
pub use schema::{Schema, SchemaKind};

use crate::error::ParseError;

/// Parse a Swagger document from JSON.
pub fn from_json(input: &str) -> Result<Document, ParseError> {
    let doc: Document = serde_json::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

/// Parse a Swagger document from YAML.
pub fn from_yaml(input: &str) -> Result<Document, ParseError> {
    let doc: Document = serde_yaml_ng::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

fn validate_version(doc: &Document) -> Result<(), ParseError> {
    match doc.swagger.as_deref() {
        Some(version) if !version.starts_with("2.") => {
            Err(ParseError::UnsupportedVersion(version.to_string()))
        }
        _ => Ok(()),
    }
}
