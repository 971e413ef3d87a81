//! Descriptor types threaded between generation stages

use serde::Serialize;

/// One row of the metadata catalog, as returned by a [`Database`](crate::introspect::Database)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub raw_type: String,
    pub nullable: bool,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.into(),
            nullable,
        }
    }
}

/// Field representation for template generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    #[serde(rename = "Name")]
    pub name: String,

    /// Canonical Rust type, including any `Option<..>` wrapper
    #[serde(rename = "Type")]
    pub resolved_type: String,

    /// Entity this field belongs to, for downstream stages
    #[serde(rename = "StructName")]
    pub owning_entity_name: String,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, resolved_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resolved_type: resolved_type.into(),
            owning_entity_name: String::new(),
        }
    }

    /// Set the owning entity name
    pub fn owned_by(mut self, entity_name: impl Into<String>) -> Self {
        self.owning_entity_name = entity_name.into();
        self
    }
}

/// Everything a template needs to render one entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    pub package_name: String,

    /// Bare table name for the DTO stage, struct name for model and repository stages
    pub entity_name: String,

    /// Sorted by name
    pub fields: Vec<FieldDescriptor>,

    /// Deduplicated, in first-seen order
    pub imports: Vec<String>,
}

impl EntityDescriptor {
    /// Build a descriptor, sorting the fields and resolving their imports
    pub fn new(
        package_name: impl Into<String>,
        entity_name: impl Into<String>,
        mut fields: Vec<FieldDescriptor>,
    ) -> Self {
        let entity_name = entity_name.into();
        sort_fields(&mut fields);
        for field in &mut fields {
            field.owning_entity_name = entity_name.clone();
        }
        let imports = crate::imports::resolve_imports(&fields);

        Self {
            package_name: package_name.into(),
            entity_name,
            fields,
            imports,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub(crate) fn template_data(&self) -> TemplateData<'_> {
        TemplateData {
            package_name: &self.package_name,
            table_name: &self.entity_name,
            struct_name: &self.entity_name,
            fields: &self.fields,
            imports: &self.imports,
        }
    }
}

/// Order fields by name ascending
pub fn sort_fields(fields: &mut [FieldDescriptor]) {
    fields.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Fixed-shape record bound to templates
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TemplateData<'a> {
    pub package_name: &'a str,
    pub table_name: &'a str,
    pub struct_name: &'a str,
    pub fields: &'a [FieldDescriptor],
    pub imports: &'a [String],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_sorts_fields_and_sets_owner() {
        let entity = EntityDescriptor::new(
            "models",
            "Account",
            vec![
                FieldDescriptor::new("value", "String"),
                FieldDescriptor::new("created_at", "NaiveDateTime"),
                FieldDescriptor::new("id", "i64"),
            ],
        );

        let names: Vec<_> = entity.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["created_at", "id", "value"]);
        assert!(entity.fields.iter().all(|f| f.owning_entity_name == "Account"));
        assert_eq!(entity.imports, vec!["chrono::NaiveDateTime"]);
    }

    #[test]
    fn test_template_data_keys() {
        let entity = EntityDescriptor::new("models", "test", vec![FieldDescriptor::new("id", "i64")]);
        let value = serde_json::to_value(entity.template_data()).unwrap();

        assert_eq!(value["PackageName"], "models");
        assert_eq!(value["TableName"], "test");
        assert_eq!(value["StructName"], "test");
        assert_eq!(value["Fields"][0]["Name"], "id");
        assert_eq!(value["Fields"][0]["Type"], "i64");
        assert_eq!(value["Fields"][0]["StructName"], "test");
        assert!(value["Imports"].as_array().unwrap().is_empty());
    }
}
