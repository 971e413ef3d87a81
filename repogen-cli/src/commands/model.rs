use anyhow::{Context, Result};
use clap::Args;
use repogen::codegen::ModelGenerator;
use repogen::GeneratorConfig;
use std::path::PathBuf;

use super::{read_input, write_output};

#[derive(Debug, Args)]
pub struct ModelArgs {
    /// Package (module) name recorded in the generated source
    #[arg(short, long)]
    pub package: String,

    /// DTO source file (defaults to stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing output file
    #[arg(long)]
    pub force: bool,
}

impl ModelArgs {
    pub async fn execute(self, config: GeneratorConfig) -> Result<()> {
        let templates = config.load_templates()?;
        let dto_source = read_input(self.input.as_deref()).await?;

        let source = ModelGenerator::with_template(templates.model)
            .generate(&self.package, &dto_source)
            .context("Failed to generate model")?;

        write_output(&source, self.output.as_deref(), self.force).await
    }
}
