//! repogen - DTO, model and repository generation from table metadata
//!
//! This crate reads a table's column metadata from a live database and turns
//! it into generated Rust source through handlebars templates.
//!
//! # Pipeline
//!
//! - **DTO**: one struct field per column, types normalized through a
//!   [`Dialect`] profile
//! - **Model**: derived from a DTO, either in-process or by re-parsing DTO
//!   source with `syn`
//! - **Repository**: a data-access stub derived from a model
//!
//! # Example
//!
//! ```rust,no_run
//! use repogen::{codegen::DtoGenerator, introspect, Dialect};
//!
//! # async fn example() -> repogen::Result<()> {
//! let database = introspect::connect("postgres://localhost/app").await?;
//! let generator = DtoGenerator::new(database, Dialect::postgres());
//!
//! let source = generator.generate("models", "public.users").await?;
//! println!("{}", source);
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

pub mod case;
pub mod codegen;
pub mod config;
pub mod dialect;
pub mod extract;
pub mod imports;
pub mod introspect;
pub mod types;

pub use config::GeneratorConfig;
pub use dialect::{map_type, Dialect};
pub use extract::{extract_structure, ExtractedStructure};
pub use imports::resolve_imports;
pub use types::*;

/// Generation errors
#[derive(Error, Debug)]
pub enum GenError {
    #[error("package name must not be empty")]
    EmptyPackageName,

    #[error("table name must not be empty")]
    EmptyTableName,

    #[error("source contents must not be empty")]
    EmptySource,

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("table {0} not found or has no columns")]
    TableNotFound(String),

    #[error(transparent)]
    TemplateSyntax(#[from] handlebars::TemplateError),

    #[error(transparent)]
    TemplateRender(#[from] handlebars::RenderError),

    #[error("source parsing error at {line}:{column}: {message}")]
    SourceParse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("no structure was found in source contents")]
    NoStructure,

    #[error("no fields found in structure {entity}")]
    NoFields { entity: String },

    #[error("Unsupported database URL: {0}")]
    UnsupportedDatabase(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, GenError>;

impl From<syn::Error> for GenError {
    fn from(error: syn::Error) -> Self {
        let start = error.span().start();
        GenError::SourceParse {
            line: start.line,
            column: start.column + 1,
            message: error.to_string(),
        }
    }
}
