//! Built-in templates
//!
//! Templates receive `PackageName`, `TableName`, `StructName`, `Fields` and
//! `Imports`. Each field exposes `Name`, `Type` and `StructName`.

/// DTO template: one `pub` field per column
pub const DTO_TEMPLATE: &str = include_str!("templates/dto.hbs");

/// Model template: struct and constructor derived from a DTO
pub const MODEL_TEMPLATE: &str = include_str!("templates/model.hbs");

/// Repository template: stub holding a connection pool
pub const REPOSITORY_TEMPLATE: &str = include_str!("templates/repository.hbs");

/// Template text for the three stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    pub dto: String,
    pub model: String,
    pub repository: String,
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self {
            dto: DTO_TEMPLATE.to_string(),
            model: MODEL_TEMPLATE.to_string(),
            repository: REPOSITORY_TEMPLATE.to_string(),
        }
    }
}
