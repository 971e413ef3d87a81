//! DTO, model and repository in one pass

use super::model::model_descriptor;
use super::templates::TemplateSet;
use super::{DtoGenerator, ModelGenerator, RepositoryGenerator};
use crate::dialect::Dialect;
use crate::introspect::Database;
use crate::Result;

/// Sources generated for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSources {
    /// Model struct name, e.g. `UserAccount` for `user_account`
    pub entity_name: String,
    pub dto: String,
    pub model: String,
    pub repository: String,
}

/// Runs all three stages, handing descriptors over in-process
pub struct Pipeline<D> {
    dto: DtoGenerator<D>,
    model: ModelGenerator,
    repository: RepositoryGenerator,
}

impl<D: Database> Pipeline<D> {
    pub fn new(database: D, dialect: Dialect) -> Self {
        Self::with_templates(database, dialect, TemplateSet::default())
    }

    pub fn with_templates(database: D, dialect: Dialect, templates: TemplateSet) -> Self {
        Self {
            dto: DtoGenerator::with_template(database, dialect, templates.dto),
            model: ModelGenerator::with_template(templates.model),
            repository: RepositoryGenerator::with_template(templates.repository),
        }
    }

    /// Generate all sources for `table_name`
    pub async fn run(&self, package_name: &str, table_name: &str) -> Result<GeneratedSources> {
        let dto_entity = self.dto.describe(package_name, table_name).await?;
        let model_entity = model_descriptor(package_name, &dto_entity);

        let dto = self.dto.render(&dto_entity)?;
        let model = self.model.render(&model_entity)?;
        let repository = self.repository.generate_from(package_name, &model_entity)?;

        log::info!(
            "Generated DTO, model and repository for '{}'",
            model_entity.entity_name
        );

        Ok(GeneratedSources {
            entity_name: model_entity.entity_name,
            dto,
            model,
            repository,
        })
    }
}
