//! Core engine for generating language-agnostic template data from
//! Swagger 2.x specifications.
//!
//! The pipeline: parse a document ([`spec`]), resolve and infer its type
//! graph into [`ir::TemplateData`] ([`transform`]), check it ([`verify`]),
//! then hand it to a [`TemplateRenderer`] or serialize it directly.

pub mod config;
pub mod error;
pub mod ir;
pub mod spec;
pub mod transform;
pub mod typemap;
pub mod verify;

pub use transform::template_data;

/// A file produced by a renderer, relative to the output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub path: std::path::PathBuf,
    pub content: String,
}

/// Turns template data into generated source files. The engine stops at
/// template data; rendering backends plug in behind this trait.
pub trait TemplateRenderer {
    type Config;
    type Error: std::error::Error;

    fn render(
        &self,
        data: &ir::TemplateData,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}
