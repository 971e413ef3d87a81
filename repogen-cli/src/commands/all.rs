use anyhow::{Context, Result};
use clap::Args;
use repogen::codegen::{require_names, Pipeline};
use repogen::introspect::split_table_name;
use repogen::GeneratorConfig;
use std::path::PathBuf;

use super::{ensure_writable, write_output, DatabaseArgs};

#[derive(Debug, Args)]
pub struct AllArgs {
    /// Table name, optionally schema-qualified (`public.users`)
    pub table: String,

    /// Package (module) name recorded in the generated sources
    #[arg(short, long)]
    pub package: String,

    #[command(flatten)]
    pub database: DatabaseArgs,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

impl AllArgs {
    pub async fn execute(self, mut config: GeneratorConfig) -> Result<()> {
        require_names(&self.package, &self.table)?;
        let templates = config.load_templates()?;
        let (database, dialect) = self.database.connect(&mut config).await?;

        let (_, table) = split_table_name(&self.table, dialect.default_schema());
        let files = [
            self.output.join(format!("{}_dto.rs", table)),
            self.output.join(format!("{}_model.rs", table)),
            self.output.join(format!("{}_repository.rs", table)),
        ];
        for path in &files {
            ensure_writable(path, self.force)?;
        }

        let sources = Pipeline::with_templates(database, dialect, templates)
            .run(&self.package, &self.table)
            .await
            .with_context(|| format!("Failed to generate sources for table '{}'", self.table))?;

        let [dto_file, model_file, repository_file] = &files;
        write_output(&sources.dto, Some(dto_file.as_path()), self.force).await?;
        write_output(&sources.model, Some(model_file.as_path()), self.force).await?;
        write_output(&sources.repository, Some(repository_file.as_path()), self.force).await?;

        eprintln!("🎉 Generated {} sources in {}", sources.entity_name, self.output.display());
        Ok(())
    }
}
