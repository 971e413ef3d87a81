//! Import resolution for generated sources

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::FieldDescriptor;

/// Canonical type to the `use` path it needs
static TYPE_IMPORTS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Decimal", "rust_decimal::Decimal"),
        ("NaiveDate", "chrono::NaiveDate"),
        ("NaiveTime", "chrono::NaiveTime"),
        ("NaiveDateTime", "chrono::NaiveDateTime"),
        ("DateTime<Utc>", "chrono::{DateTime, Utc}"),
        ("Uuid", "uuid::Uuid"),
        ("JsonValue", "serde_json::Value as JsonValue"),
    ])
});

/// Compute the imports required by `fields`, in first-seen order
pub fn resolve_imports(fields: &[FieldDescriptor]) -> Vec<String> {
    let mut imports = IndexSet::new();

    for field in fields {
        if let Some(path) = import_for(&field.resolved_type) {
            imports.insert(path);
        }
    }

    imports.into_iter().map(str::to_string).collect()
}

/// The `use` path for a single type, looking through `Option<..>`
pub fn import_for(type_name: &str) -> Option<&'static str> {
    let compact: String = type_name.chars().filter(|c| !c.is_whitespace()).collect();
    let base = compact
        .strip_prefix("Option<")
        .and_then(|inner| inner.strip_suffix('>'))
        .unwrap_or(&compact);

    TYPE_IMPORTS.get(base).copied()
}
