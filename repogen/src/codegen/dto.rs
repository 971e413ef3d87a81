//! DTO generation from live table metadata

use super::templates::DTO_TEMPLATE;
use super::{require_names, TemplateRenderer};
use crate::dialect::Dialect;
use crate::introspect::{split_table_name, Database, SchemaReader};
use crate::{EntityDescriptor, Result};

/// Generates one DTO struct per table
pub struct DtoGenerator<D> {
    reader: SchemaReader<D>,
    renderer: TemplateRenderer,
    template: String,
}

impl<D: Database> DtoGenerator<D> {
    /// Create a generator using the built-in DTO template
    pub fn new(database: D, dialect: Dialect) -> Self {
        Self::with_template(database, dialect, DTO_TEMPLATE)
    }

    pub fn with_template(database: D, dialect: Dialect, template: impl Into<String>) -> Self {
        Self {
            reader: SchemaReader::new(database, dialect),
            renderer: TemplateRenderer::new(),
            template: template.into(),
        }
    }

    /// Replace the template used by later `generate` calls
    pub fn set_template(&mut self, template: impl Into<String>) {
        self.template = template.into();
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn dialect(&self) -> &Dialect {
        self.reader.dialect()
    }

    /// Read `table_name` and build its descriptor without rendering
    pub async fn describe(&self, package_name: &str, table_name: &str) -> Result<EntityDescriptor> {
        require_names(package_name, table_name)?;

        let fields = self.reader.fetch_fields(table_name).await?;
        let (_, table) = split_table_name(table_name, self.dialect().default_schema());

        Ok(EntityDescriptor::new(package_name, table, fields))
    }

    /// Generate DTO source for `table_name` (`table` or `schema.table`)
    pub async fn generate(&self, package_name: &str, table_name: &str) -> Result<String> {
        require_names(package_name, table_name)?;

        let template = self.renderer.compile("dto", &self.template)?;
        let entity = self.describe(package_name, table_name).await?;
        let source = template.render(&entity)?;

        log::info!(
            "Generated DTO for table '{}' ({} field(s))",
            table_name,
            entity.fields.len()
        );
        Ok(source)
    }

    /// Render an already described table
    pub fn render(&self, entity: &EntityDescriptor) -> Result<String> {
        require_names(&entity.package_name, &entity.entity_name)?;
        self.renderer.render("dto", &self.template, entity)
    }
}
