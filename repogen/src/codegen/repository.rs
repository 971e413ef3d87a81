//! Repository stub generation

use super::model::model_descriptor;
use super::templates::REPOSITORY_TEMPLATE;
use super::{require_names, TemplateRenderer};
use crate::extract::extract_structure;
use crate::{EntityDescriptor, GenError, Result};

/// Generates a data-access stub for a model
pub struct RepositoryGenerator {
    renderer: TemplateRenderer,
    template: String,
}

impl RepositoryGenerator {
    pub fn new() -> Self {
        Self::with_template(REPOSITORY_TEMPLATE)
    }

    pub fn with_template(template: impl Into<String>) -> Self {
        Self {
            renderer: TemplateRenderer::new(),
            template: template.into(),
        }
    }

    pub fn set_template(&mut self, template: impl Into<String>) {
        self.template = template.into();
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Generate a repository stub from model (or DTO) source text
    pub fn generate(&self, package_name: &str, model_source: &str) -> Result<String> {
        if model_source.trim().is_empty() {
            return Err(GenError::EmptySource);
        }
        if package_name.is_empty() {
            return Err(GenError::EmptyPackageName);
        }

        let structure = extract_structure(model_source)?;
        let model = EntityDescriptor::new(package_name, structure.entity_name, structure.fields);
        self.generate_from(package_name, &model)
    }

    /// Generate a repository stub from a model descriptor
    pub fn generate_from(&self, package_name: &str, model: &EntityDescriptor) -> Result<String> {
        let entity = model_descriptor(package_name, model);
        require_names(&entity.package_name, &entity.entity_name)?;

        let source = self.renderer.render("repository", &self.template, &entity)?;
        log::info!("Generated repository for '{}'", entity.entity_name);
        Ok(source)
    }
}

impl Default for RepositoryGenerator {
    fn default() -> Self {
        Self::new()
    }
}
