use anyhow::{Context, Result};
use clap::Args;
use repogen::codegen::{require_names, DtoGenerator};
use repogen::GeneratorConfig;
use std::path::PathBuf;

use super::{write_output, DatabaseArgs};

#[derive(Debug, Args)]
pub struct DtoArgs {
    /// Table name, optionally schema-qualified (`public.users`)
    pub table: String,

    /// Package (module) name recorded in the generated source
    #[arg(short, long)]
    pub package: String,

    #[command(flatten)]
    pub database: DatabaseArgs,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing output file
    #[arg(long)]
    pub force: bool,
}

impl DtoArgs {
    pub async fn execute(self, mut config: GeneratorConfig) -> Result<()> {
        require_names(&self.package, &self.table)?;
        if let Some(output) = &self.output {
            super::ensure_writable(output, self.force)?;
        }

        let templates = config.load_templates()?;
        let (database, dialect) = self.database.connect(&mut config).await?;
        let generator = DtoGenerator::with_template(database, dialect, templates.dto);

        let source = generator
            .generate(&self.package, &self.table)
            .await
            .with_context(|| format!("Failed to generate DTO for table '{}'", self.table))?;

        write_output(&source, self.output.as_deref(), self.force).await
    }
}
