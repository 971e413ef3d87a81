//! Code generation module
//!
//! Every stage renders an [`EntityDescriptor`] through a handlebars template:
//! - [`DtoGenerator`]: table columns to a data-transfer struct
//! - [`ModelGenerator`]: DTO to domain model
//! - [`RepositoryGenerator`]: model to data-access stub
//! - [`Pipeline`]: all three in one pass

use crate::case::{field_ident, lowercase_first, type_name};
use crate::{EntityDescriptor, GenError, Result};
use handlebars::Handlebars;

pub mod dto;
pub mod model;
pub mod pipeline;
pub mod repository;
pub mod templates;

pub use dto::DtoGenerator;
pub use model::ModelGenerator;
pub use pipeline::{GeneratedSources, Pipeline};
pub use repository::RepositoryGenerator;

/// Template-based renderer shared by all stages
#[derive(Clone)]
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a new renderer with the case helpers registered
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();

        // Missing fields are errors, and generated code must not be HTML-escaped
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars.register_helper("Uppercase", Box::new(uppercase_helper));
        handlebars.register_helper("Lowercase", Box::new(lowercase_helper));
        handlebars.register_helper("Ident", Box::new(ident_helper));

        Self { handlebars }
    }

    /// Parse `template` under `name`
    pub fn compile(&self, name: &str, template: &str) -> Result<CompiledTemplate> {
        let mut handlebars = self.handlebars.clone();
        handlebars.register_template_string(name, template)?;

        Ok(CompiledTemplate {
            handlebars,
            name: name.to_string(),
        })
    }

    /// Parse and render in one step
    pub fn render(&self, name: &str, template: &str, entity: &EntityDescriptor) -> Result<String> {
        self.compile(name, template)?.render(entity)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed template ready to render descriptors
pub struct CompiledTemplate {
    handlebars: Handlebars<'static>,
    name: String,
}

impl CompiledTemplate {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn render(&self, entity: &EntityDescriptor) -> Result<String> {
        let source = self.handlebars.render(&self.name, &entity.template_data())?;
        log::debug!(
            "Rendered template '{}' for '{}' ({} bytes)",
            self.name,
            entity.entity_name,
            source.len()
        );
        Ok(source)
    }
}

/// Fail fast on empty package or entity names
pub fn require_names(package_name: &str, entity_name: &str) -> Result<()> {
    if package_name.is_empty() {
        return Err(GenError::EmptyPackageName);
    }
    if entity_name.is_empty() {
        return Err(GenError::EmptyTableName);
    }
    Ok(())
}

// Handlebars helper functions

fn string_param<'a>(h: &'a handlebars::Helper, helper: &str) -> std::result::Result<&'a str, handlebars::RenderError> {
    let param = h
        .param(0)
        .ok_or_else(|| handlebars::RenderError::new(format!("{} helper requires a parameter", helper)))?;

    param
        .value()
        .as_str()
        .ok_or_else(|| handlebars::RenderError::new(format!("{} helper requires a string parameter", helper)))
}

fn uppercase_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let input = string_param(h, "Uppercase")?;
    out.write(&type_name(input))?;
    Ok(())
}

fn lowercase_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let input = string_param(h, "Lowercase")?;
    out.write(&lowercase_first(input))?;
    Ok(())
}

fn ident_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let input = string_param(h, "Ident")?;
    if input.starts_with("r#") {
        out.write(input)?;
    } else {
        out.write(&field_ident(input))?;
    }
    Ok(())
}
