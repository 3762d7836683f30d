//! Hierarchy sync driver.
//!
//! Walks the document hierarchy in order and mirrors it onto the hosted
//! service: categories and documents are created or updated with explicit
//! order fields, nested documents carry their parent's id. A missing source
//! file skips that document; any API failure aborts the run — no partial
//! remote state is assumed consistent.

use std::path::Path;

use tracing::{info, warn};

use docpress_core::{
    Document, DocumentError, DocNode, Hierarchy, IgnoreLists, Pipeline, RenderContext,
    RenderTarget,
};

use crate::client::ReadMeClient;
use crate::error::ReadMeError;

/// Options for one sync run.
#[derive(Clone, Debug)]
pub struct SyncOptions {
    /// Repository path prefix for content-delivery image URLs. Required —
    /// hosted image rewriting cannot run without it.
    pub image_repo: String,
    /// Repository carrying the document sources, for edit links.
    pub docs_repo: Option<String>,
}

/// Outcome counts for one sync run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub categories_created: usize,
    pub docs_created: usize,
    pub docs_updated: usize,
    pub docs_skipped: usize,
}

/// Sync error.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("{0}")]
    Api(#[from] ReadMeError),

    #[error("{0}")]
    Document(#[from] DocumentError),
}

/// Push the whole hierarchy to the hosted service.
///
/// Creates the target version when absent, walks every category and document
/// in order, and finally promotes the version to stable (suffix-free
/// versions only).
pub fn sync_hierarchy(
    client: &ReadMeClient,
    hierarchy: &Hierarchy,
    source_dir: &Path,
    ignore: &IgnoreLists,
    options: &SyncOptions,
) -> Result<SyncReport, SyncError> {
    client.create_version_if_not_exists()?;

    let target = RenderTarget::HostedApi {
        image_repo: options.image_repo.clone(),
        docs_repo: options.docs_repo.clone(),
    };
    let pipeline = Pipeline::new(ignore);
    let mut report = SyncReport::default();

    for category in &hierarchy.categories {
        let title = category.display_title();
        info!("Syncing category: {title}");
        let (category_id, created) = client.create_category_if_not_exists(&category.slug, &title)?;
        if created {
            report.categories_created += 1;
        }

        sync_docs(
            client,
            &pipeline,
            &target,
            &category.children,
            source_dir,
            &category.slug,
            &category_id,
            None,
            &mut report,
        )?;
    }

    client.make_version_stable()?;
    Ok(report)
}

#[allow(clippy::too_many_arguments)]
fn sync_docs(
    client: &ReadMeClient,
    pipeline: &Pipeline<'_>,
    target: &RenderTarget,
    docs: &[DocNode],
    source_dir: &Path,
    category_path: &str,
    category_id: &str,
    parent_id: Option<&str>,
    report: &mut SyncReport,
) -> Result<(), SyncError> {
    for (order, node) in docs.iter().enumerate() {
        let doc_dir = source_dir.join(category_path);
        let doc_path = doc_dir.join(format!("{}.md", node.slug));

        let raw = match std::fs::read_to_string(&doc_path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping {}: {e}", doc_path.display());
                report.docs_skipped += 1;
                continue;
            }
        };

        let document = Document::parse(&node.slug, &raw)?;
        let ctx = RenderContext::new(target.clone(), source_dir, &doc_dir, &node.slug);
        let body = pipeline.render(&document.body, &ctx);

        let (doc_id, created) =
            client.create_or_update_doc(order, category_id, &document, &body, parent_id)?;
        if created {
            report.docs_created += 1;
            info!("Created doc {}", node.slug);
        } else {
            report.docs_updated += 1;
            info!("Updated doc {}", node.slug);
        }

        if !node.children.is_empty() {
            sync_docs(
                client,
                pipeline,
                target,
                &node.children,
                source_dir,
                &format!("{category_path}/{}", node.slug),
                category_id,
                Some(&doc_id),
                report,
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sync_report_default_is_zeroed() {
        let report = SyncReport::default();
        assert_eq!(report.categories_created, 0);
        assert_eq!(report.docs_created, 0);
        assert_eq!(report.docs_updated, 0);
        assert_eq!(report.docs_skipped, 0);
    }

    #[test]
    fn test_sync_options_carry_repos() {
        let options = SyncOptions {
            image_repo: "acme/docs/main/docs/figures".to_owned(),
            docs_repo: Some("acme/docs".to_owned()),
        };
        assert!(options.docs_repo.is_some());
    }
}
