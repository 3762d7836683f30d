//! `upload` and `delete-version` commands: hosted docs sync.

use std::path::PathBuf;

use clap::Args;

use docpress_core::{Hierarchy, IgnoreLists};
use docpress_readme::{ReadMeClient, SyncOptions, sync_hierarchy};

use crate::error::CliError;
use crate::output::Output;

/// Push the documentation hierarchy to the hosted docs service.
#[derive(Args)]
pub(crate) struct UploadArgs {
    /// Documentation source directory (contains hierarchy.yml).
    #[arg(long, default_value = "docs")]
    pub(crate) source: PathBuf,

    /// Target documentation version (e.g. 1.2.3 or 1.2.3-rc1).
    #[arg(long)]
    pub(crate) version: String,

    /// API key for the hosted docs service.
    #[arg(long, env = "README_API_KEY", hide_env_values = true)]
    pub(crate) api_key: String,

    /// Repository path prefix for content-delivery image URLs.
    #[arg(long, env = "IMAGE_PATH")]
    pub(crate) image_repo: String,

    /// Source repository for edit-this-page links (owner/name).
    #[arg(long, env = "DOCS_REPO")]
    pub(crate) docs_repo: Option<String>,

    /// Enable verbose logging.
    #[arg(long, short)]
    pub(crate) verbose: bool,
}

impl UploadArgs {
    pub(crate) fn execute(&self, output: &Output) -> Result<(), CliError> {
        output.heading(&format!(
            "Uploading documentation as version {}...",
            self.version
        ));

        let hierarchy = Hierarchy::load(&self.source)?;
        let ignore = IgnoreLists::default();
        let client = ReadMeClient::new(&self.api_key, &self.version);
        let options = SyncOptions {
            image_repo: self.image_repo.clone(),
            docs_repo: self.docs_repo.clone(),
        };

        let report = sync_hierarchy(&client, &hierarchy, &self.source, &ignore, &options)?;

        output.success(&format!(
            "Sync complete: {} categories created, {} docs created, {} docs updated, {} skipped",
            report.categories_created,
            report.docs_created,
            report.docs_updated,
            report.docs_skipped
        ));
        Ok(())
    }
}

/// Delete a documentation version from the hosted docs service.
#[derive(Args)]
pub(crate) struct DeleteVersionArgs {
    /// Version to delete.
    #[arg(long)]
    pub(crate) version: String,

    /// API key for the hosted docs service.
    #[arg(long, env = "README_API_KEY", hide_env_values = true)]
    pub(crate) api_key: String,
}

impl DeleteVersionArgs {
    pub(crate) fn execute(&self, output: &Output) -> Result<(), CliError> {
        let client = ReadMeClient::new(&self.api_key, &self.version);
        client.delete_version()?;
        output.success(&format!("Deleted version {}", self.version));
        Ok(())
    }
}
