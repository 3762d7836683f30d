//! Image-path and document-link rewriting.
//!
//! Both rewrites are idempotent: once rewritten, the source pattern no longer
//! occurs in the text, so a second pass is a no-op.

use crate::config::IgnoreLists;
use crate::patterns::{DOC_LINK_RE, FIGURE_PATH_RE, IMG_TAG_RE};
use crate::pipeline::RenderTarget;

/// Base URL for raw repository content in hosted output.
pub const GITHUB_RAW: &str = "https://raw.githubusercontent.com";

fn figure_url(subpath: &str, target: &RenderTarget) -> String {
    match target {
        RenderTarget::StaticSite => format!("assets/{subpath}"),
        RenderTarget::HostedApi { image_repo, .. } => {
            format!("{GITHUB_RAW}/{image_repo}/{subpath}")
        }
    }
}

/// Rewrite relative `figures/` paths to the target's addressing scheme.
///
/// Handles both Markdown image sources and raw `<img>` tags whose `src`
/// attribute embeds a figure path. Ignore-listed filenames are left
/// untouched.
pub fn rewrite_figure_paths(body: &str, target: &RenderTarget, ignore: &IgnoreLists) -> String {
    // <img> tags first: the figure path sits inside an attribute value and
    // needs the whole tag rewritten, not just the path.
    let body = IMG_TAG_RE.replace_all(body, |caps: &regex::Captures<'_>| {
        let tag = &caps[0];
        let src = &caps[1];
        if src.contains("../figures/") {
            if let Some(fig) = FIGURE_PATH_RE.captures(src) {
                let subpath = &fig[2];
                if !ignore.ignores_image(subpath) {
                    return tag.replace(src, &figure_url(subpath, target));
                }
            }
        }
        tag.to_owned()
    });

    FIGURE_PATH_RE
        .replace_all(&body, |caps: &regex::Captures<'_>| {
            let subpath = &caps[2];
            if ignore.ignores_image(subpath) {
                caps[0].to_owned()
            } else {
                figure_url(subpath, target)
            }
        })
        .into_owned()
}

/// Rewrite internal `(.md)` links to the target's routing scheme.
///
/// The final path segment is the slug: static output routes to
/// `<slug>.html`, hosted output to `/docs/<slug>`. Fragments are preserved.
/// In hosted output, links containing an ignored-document placeholder pass
/// through unchanged.
pub fn rewrite_doc_links(body: &str, target: &RenderTarget, ignore: &IgnoreLists) -> String {
    DOC_LINK_RE
        .replace_all(body, |caps: &regex::Captures<'_>| {
            let matched = &caps[0];
            if matches!(target, RenderTarget::HostedApi { .. })
                && ignore.contains_ignored_doc(matched)
            {
                return matched.to_owned();
            }

            let slug = caps[2].rsplit('/').next().unwrap_or(&caps[2]);
            let fragment = caps.get(3).map_or("", |m| m.as_str());
            match target {
                RenderTarget::StaticSite => format!("({slug}.html{fragment})"),
                RenderTarget::HostedApi { .. } => format!("(/docs/{slug}{fragment})"),
            }
        })
        .into_owned()
}
