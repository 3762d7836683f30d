//! CLI error types.

use docpress_core::{HierarchyError, SiteError};
use docpress_readme::{ReadMeError, SyncError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Hierarchy(#[from] HierarchyError),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{0}")]
    Api(#[from] ReadMeError),

    #[error("{0}")]
    Sync(#[from] SyncError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
