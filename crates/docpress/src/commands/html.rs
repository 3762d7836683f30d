//! `html` command: generate the static HTML site.

use std::path::PathBuf;

use clap::Args;

use docpress_core::{Hierarchy, IgnoreLists, SiteGenerator};

use crate::error::CliError;
use crate::output::Output;

/// Generate a static HTML site from a documentation tree.
#[derive(Args)]
pub(crate) struct HtmlArgs {
    /// Documentation source directory (contains hierarchy.yml).
    #[arg(long, default_value = "docs")]
    pub(crate) source: PathBuf,

    /// Output directory for the generated site.
    #[arg(long, default_value = "site")]
    pub(crate) output: PathBuf,

    /// Enable verbose logging.
    #[arg(long, short)]
    pub(crate) verbose: bool,
}

impl HtmlArgs {
    pub(crate) fn execute(&self, output: &Output) -> Result<(), CliError> {
        output.heading("Generating HTML documentation...");
        output.info(&format!("Source directory: {}", self.source.display()));

        let hierarchy = Hierarchy::load(&self.source)?;
        let ignore = IgnoreLists::default();

        let generator = SiteGenerator::new(&self.output, &ignore)?;
        generator.generate(&hierarchy, &self.source)?;

        output.success("HTML documentation generated successfully");
        output.info(&format!(
            "Open {} in your browser",
            generator.output_dir().join("index.html").display()
        ));
        Ok(())
    }
}
