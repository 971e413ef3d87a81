//! Generation commands
//!
//! Shared plumbing: configuration loading, database connection flags and
//! writing generated sources to stdout or a file.

pub mod all;
pub mod dto;
pub mod model;
pub mod repository;

use anyhow::{bail, Context, Result};
use clap::Args;
use repogen::dialect::{Dialect, DialectKind};
use repogen::introspect::{self, Database};
use repogen::GeneratorConfig;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncReadExt;

/// Load `path` or `./repogen.toml`, with environment overrides applied
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    GeneratorConfig::load(path).with_context(|| match path {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to load configuration".to_string(),
    })
}

/// Connection flags; each overrides the configuration file and environment
#[derive(Debug, Args)]
pub struct DatabaseArgs {
    /// Database URL (postgres:// or mysql://)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Dialect profile, inferred from the URL when omitted
    #[arg(long)]
    pub dialect: Option<String>,

    /// Schema for unqualified table names
    #[arg(long)]
    pub schema: Option<String>,
}

impl DatabaseArgs {
    pub fn apply(&self, config: &mut GeneratorConfig) -> Result<()> {
        if let Some(url) = &self.database_url {
            config.database.url = Some(url.clone());
        }
        if let Some(dialect) = &self.dialect {
            let kind: DialectKind = dialect
                .parse()
                .with_context(|| format!("Invalid dialect '{}'", dialect))?;
            config.database.dialect = Some(kind);
        }
        if let Some(schema) = &self.schema {
            config.database.default_schema = Some(schema.clone());
        }
        Ok(())
    }

    /// Resolve the dialect and open a connection
    pub async fn connect(&self, config: &mut GeneratorConfig) -> Result<(Box<dyn Database>, Dialect)> {
        self.apply(config)?;

        let dialect = config.dialect()?;
        let url = config.database_url()?;

        log::debug!("Connecting to {} database", dialect.name());
        let database = introspect::connect(url)
            .await
            .context("Failed to connect to database")?;

        Ok((database, dialect))
    }
}

/// Read source text from `input`, or stdin when absent
pub async fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut source = String::new();
            tokio::io::stdin()
                .read_to_string(&mut source)
                .await
                .context("Failed to read stdin")?;
            Ok(source)
        }
    }
}

/// Print `source`, or write it to `output`
pub async fn write_output(source: &str, output: Option<&Path>, force: bool) -> Result<()> {
    let Some(path) = output else {
        print!("{}", source);
        return Ok(());
    };

    ensure_writable(path, force)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    fs::write(path, source)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    eprintln!("✅ Generated {}", path.display());
    Ok(())
}

/// Refuse to overwrite an existing file unless forced
pub fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Ok(())
}
