//! Swagger document to template data.
//!
//! The pipeline runs in passes: build methods (inferring types and minting
//! models along the way), pool the models off the methods with duplicates
//! dropped, split by kind, and wire subclass back-references.

pub mod dedup;
pub mod inference;
pub mod methods;
pub mod naming;
pub mod resolver;

use crate::error::GenerateError;
use crate::ir::TemplateData;
use crate::spec::Document;
use crate::typemap::TypeMap;

/// Produce the full template data for one API document. `base_path` is the
/// configured prefix; the document's own `basePath` is appended to it.
pub fn template_data(
    doc: &Document,
    api_name: &str,
    base_path: &str,
    type_map: &TypeMap,
) -> Result<TemplateData, GenerateError> {
    let base = methods::join_url(&[base_path, doc.base_path.as_deref().unwrap_or("")]);
    let built = methods::methods_from_document(doc, &base, type_map)?;
    log::debug!("{api_name}: built {} methods", built.len());

    let (methods, models) = dedup::move_models_off_methods(built);
    log::debug!("{api_name}: {} models after dedup", models.len());

    let (object_models, enum_models) = dedup::split_models(models);
    let object_models = dedup::resolve_subclasses(object_models);

    Ok(TemplateData {
        api_name: api_name.to_string(),
        methods,
        object_models,
        enum_models,
    })
}
