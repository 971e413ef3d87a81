use anyhow::{Context, Result};
use clap::Args;
use repogen::codegen::RepositoryGenerator;
use repogen::GeneratorConfig;
use std::path::PathBuf;

use super::{read_input, write_output};

#[derive(Debug, Args)]
pub struct RepositoryArgs {
    /// Package (module) name recorded in the generated source
    #[arg(short, long)]
    pub package: String,

    /// Model source file (defaults to stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing output file
    #[arg(long)]
    pub force: bool,
}

impl RepositoryArgs {
    pub async fn execute(self, config: GeneratorConfig) -> Result<()> {
        let templates = config.load_templates()?;
        let model_source = read_input(self.input.as_deref()).await?;

        let source = RepositoryGenerator::with_template(templates.repository)
            .generate(&self.package, &model_source)
            .context("Failed to generate repository")?;

        write_output(&source, self.output.as_deref(), self.force).await
    }
}
