//! Generator configuration
//!
//! Read from `repogen.toml`:
//!
//! ```toml
//! [database]
//! url = "postgres://localhost/app"
//! dialect = "postgres"
//! default_schema = "public"
//!
//! [templates]
//! dto = "templates/dto.hbs"
//! ```
//!
//! `DATABASE_URL`, `REPOGEN_DATABASE_URL` and `REPOGEN_DEFAULT_SCHEMA`
//! override the file. Template paths are relative to the file's directory.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::codegen::templates::TemplateSet;
use crate::dialect::{Dialect, DialectKind};
use crate::{GenError, Result};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "repogen.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub database: DatabaseConfig,
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,

    /// Inferred from the URL scheme when unset
    pub dialect: Option<DialectKind>,

    /// Schema for unqualified table names
    pub default_schema: Option<String>,
}

/// Template overrides; unset entries use the built-in templates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub dto: Option<PathBuf>,
    pub model: Option<PathBuf>,
    pub repository: Option<PathBuf>,
}

impl GeneratorConfig {
    /// Load `path`, or `./repogen.toml` if present, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(CONFIG_FILE_NAME).exists() => Self::from_file(CONFIG_FILE_NAME)?,
            None => {
                log::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                Self::default()
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let content = fs::read_to_string(path_ref).map_err(|e| {
            GenError::Config(format!(
                "Failed to read config file '{}': {}",
                path_ref.display(),
                e
            ))
        })?;

        let mut config: GeneratorConfig = toml::from_str(&content)?;

        let base_dir = path_ref
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        config.templates.resolve_relative_to(base_dir);

        log::debug!(
            "Successfully loaded configuration from: {}",
            path_ref.display()
        );
        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| env::var(key).ok());
    }

    pub(crate) fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // REPOGEN_DATABASE_URL wins over the generic DATABASE_URL
        if let Some(url) = lookup("REPOGEN_DATABASE_URL").or_else(|| lookup("DATABASE_URL")) {
            log::debug!("Database URL overridden from environment");
            self.database.url = Some(url);
        }

        if let Some(schema) = lookup("REPOGEN_DEFAULT_SCHEMA") {
            self.database.default_schema = Some(schema);
        }
    }

    pub fn database_url(&self) -> Result<&str> {
        self.database
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                GenError::Config(
                    "no database URL configured (set DATABASE_URL or [database] url)".to_string(),
                )
            })
    }

    /// Dialect profile from the configured kind or URL scheme
    pub fn dialect(&self) -> Result<Dialect> {
        let kind = match self.database.dialect {
            Some(kind) => kind,
            None => DialectKind::from_url(self.database_url()?)?,
        };

        let dialect = Dialect::for_kind(kind);
        Ok(match &self.database.default_schema {
            Some(schema) => dialect.with_default_schema(schema.clone()),
            None => dialect,
        })
    }

    /// Built-in templates with any configured overrides read from disk
    pub fn load_templates(&self) -> Result<TemplateSet> {
        let mut set = TemplateSet::default();

        if let Some(path) = &self.templates.dto {
            set.dto = read_template(path)?;
        }
        if let Some(path) = &self.templates.model {
            set.model = read_template(path)?;
        }
        if let Some(path) = &self.templates.repository {
            set.repository = read_template(path)?;
        }

        Ok(set)
    }
}

impl TemplateConfig {
    fn resolve_relative_to(&mut self, base_dir: &Path) {
        for path in [&mut self.dto, &mut self.model, &mut self.repository]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = base_dir.join(&*path);
            }
        }
    }
}

fn read_template(path: &Path) -> Result<String> {
    log::debug!("Loading template from: {}", path.display());
    fs::read_to_string(path).map_err(|e| {
        GenError::Config(format!(
            "Failed to read template '{}': {}",
            path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "repogen.toml",
            r#"
[database]
url = "mysql://root@localhost/app"
default_schema = "app"

[templates]
dto = "dto.hbs"
"#,
        );

        let config = GeneratorConfig::from_file(&path).unwrap();

        assert_eq!(config.database.url.as_deref(), Some("mysql://root@localhost/app"));
        assert_eq!(config.templates.dto, Some(dir.path().join("dto.hbs")));
        assert_eq!(config.templates.model, None);

        let dialect = config.dialect().unwrap();
        assert_eq!(dialect.kind(), DialectKind::MySql);
        assert_eq!(dialect.default_schema(), "app");
    }

    #[test]
    fn test_explicit_dialect_wins_over_url() {
        let config: GeneratorConfig = toml::from_str(
            r#"
[database]
url = "mysql://localhost/app"
dialect = "postgresql"
"#,
        )
        .unwrap();

        let dialect = config.dialect().unwrap();
        assert_eq!(dialect.kind(), DialectKind::Postgres);
        assert_eq!(dialect.default_schema(), "public");
    }

    #[test]
    fn test_missing_url() {
        let config = GeneratorConfig::default();
        assert!(matches!(config.database_url(), Err(GenError::Config(_))));
        assert!(matches!(config.dialect(), Err(GenError::Config(_))));
    }

    #[test]
    fn test_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "repogen.toml", "[database\nurl = 1");

        assert!(matches!(GeneratorConfig::from_file(&path), Err(GenError::Toml(_))));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("DATABASE_URL", "postgres://generic/db"),
            ("REPOGEN_DATABASE_URL", "postgres://specific/db"),
            ("REPOGEN_DEFAULT_SCHEMA", "audit"),
        ]);
        let mut config = GeneratorConfig::default();

        config.apply_overrides_from(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.database_url().unwrap(), "postgres://specific/db");
        assert_eq!(config.dialect().unwrap().default_schema(), "audit");
    }

    #[test]
    fn test_generic_database_url_override() {
        let mut config = GeneratorConfig::default();
        config.apply_overrides_from(|key| {
            (key == "DATABASE_URL").then(|| "mysql://localhost/db".to_string())
        });

        assert_eq!(config.dialect().unwrap().kind(), DialectKind::MySql);
    }

    #[test]
    fn test_load_templates() {
        let dir = TempDir::new().unwrap();
        write(&dir, "model.hbs", "pub struct {{StructName}};");
        let path = write(&dir, "repogen.toml", "[templates]\nmodel = \"model.hbs\"\n");

        let templates = GeneratorConfig::from_file(&path)
            .unwrap()
            .load_templates()
            .unwrap();

        assert_eq!(templates.model, "pub struct {{StructName}};");
        assert_eq!(templates.dto, crate::codegen::templates::DTO_TEMPLATE);
    }

    #[test]
    fn test_missing_template_file() {
        let mut config = GeneratorConfig::default();
        config.templates.repository = Some(PathBuf::from("/nonexistent/repository.hbs"));

        let err = config.load_templates().unwrap_err();
        assert!(err.to_string().contains("repository.hbs"));
    }
}
