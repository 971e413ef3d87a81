//! Model generation from DTO source or descriptors

use super::templates::MODEL_TEMPLATE;
use super::{require_names, TemplateRenderer};
use crate::case::type_name;
use crate::extract::{extract_structure, strip_dto_marker};
use crate::{EntityDescriptor, GenError, Result};

/// Generates a domain model from a DTO
pub struct ModelGenerator {
    renderer: TemplateRenderer,
    template: String,
}

impl ModelGenerator {
    /// Create a generator using the built-in model template
    pub fn new() -> Self {
        Self::with_template(MODEL_TEMPLATE)
    }

    pub fn with_template(template: impl Into<String>) -> Self {
        Self {
            renderer: TemplateRenderer::new(),
            template: template.into(),
        }
    }

    /// Replace the template used by later calls
    pub fn set_template(&mut self, template: impl Into<String>) {
        self.template = template.into();
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Parse `dto_source` into a model descriptor
    pub fn describe(&self, package_name: &str, dto_source: &str) -> Result<EntityDescriptor> {
        if dto_source.trim().is_empty() {
            return Err(GenError::EmptySource);
        }
        if package_name.is_empty() {
            return Err(GenError::EmptyPackageName);
        }

        let structure = extract_structure(dto_source)?;
        let dto = EntityDescriptor::new(package_name, structure.entity_name, structure.fields);
        Ok(model_descriptor(package_name, &dto))
    }

    /// Generate model source from DTO source text
    pub fn generate(&self, package_name: &str, dto_source: &str) -> Result<String> {
        let entity = self.describe(package_name, dto_source)?;
        require_names(&entity.package_name, &entity.entity_name)?;
        let template = self.renderer.compile("model", &self.template)?;
        let source = template.render(&entity)?;

        log::info!(
            "Generated model '{}' ({} field(s))",
            entity.entity_name,
            entity.fields.len()
        );
        Ok(source)
    }

    /// Generate model source from a DTO descriptor, without re-parsing
    pub fn generate_from(&self, package_name: &str, dto: &EntityDescriptor) -> Result<String> {
        self.render(&model_descriptor(package_name, dto))
    }

    /// Render an entity that is already a model descriptor
    pub fn render(&self, entity: &EntityDescriptor) -> Result<String> {
        require_names(&entity.package_name, &entity.entity_name)?;
        if entity.fields.is_empty() {
            return Err(GenError::NoFields {
                entity: entity.entity_name.clone(),
            });
        }

        self.renderer.render("model", &self.template, entity)
    }
}

impl Default for ModelGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Re-key a DTO descriptor as its model: `user_account` or `UserAccountDto` to `UserAccount`
pub fn model_descriptor(package_name: &str, dto: &EntityDescriptor) -> EntityDescriptor {
    let entity_name = strip_dto_marker(&type_name(&dto.entity_name));
    EntityDescriptor::new(package_name, entity_name, dto.fields.clone())
}
