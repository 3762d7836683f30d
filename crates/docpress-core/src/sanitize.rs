//! HTML sanitization allowlists.
//!
//! Every file- or user-derived fragment passes through one of these configs
//! before landing in an output artifact. The narrow configs cover small
//! generated fragments (tables, figures) and admit only the tags and
//! attributes that fragment needs; the broad config covers whole document
//! bodies in hosted output and extends the baseline allowlist with styling,
//! anchor, label, and data-attribute support. `<script>` content is removed
//! outright, not merely the tags.

use std::collections::{HashMap, HashSet};

use ammonia::Builder;

use crate::pipeline::RenderTarget;

/// Sanitize a generated table fragment.
///
/// Allows the wrapper `div[class]`, the table skeleton, `th[title,style]`,
/// and `td[style]` — nothing else.
#[must_use]
pub fn clean_table_fragment(html: &str) -> String {
    let mut tag_attributes = HashMap::new();
    tag_attributes.insert("div", HashSet::from(["class"]));
    tag_attributes.insert("th", HashSet::from(["title", "style"]));
    tag_attributes.insert("td", HashSet::from(["style"]));

    Builder::default()
        .tags(HashSet::from([
            "div", "table", "thead", "tbody", "tr", "th", "td",
        ]))
        .tag_attributes(tag_attributes)
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(html)
        .to_string()
}

/// Sanitize a generated figure fragment.
///
/// The allowed `img` attributes differ per target: static output styles the
/// element, hosted output additionally centers it with the legacy `align`
/// attribute its renderer understands.
#[must_use]
pub fn clean_figure_fragment(html: &str, target: &RenderTarget) -> String {
    let img_attributes = match target {
        RenderTarget::StaticSite => HashSet::from(["src", "alt", "style"]),
        RenderTarget::HostedApi { .. } => HashSet::from(["src", "align", "style"]),
    };

    let mut tag_attributes = HashMap::new();
    tag_attributes.insert("img", img_attributes);

    Builder::default()
        .tags(HashSet::from(["figure", "img", "figcaption"]))
        .tag_attributes(tag_attributes)
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(html)
        .to_string()
}

/// Sanitize a whole document body for hosted output.
///
/// Extends the baseline allowlist with `style`, `a`, and `label` tags,
/// `width`/`style`/`target`/`class` attributes on every tag, and `data-`
/// prefixed attributes. Comments are kept and `rel` rewriting is disabled so
/// the hosted renderer's own markup survives.
#[must_use]
pub fn clean_document_body(html: &str) -> String {
    Builder::default()
        .add_tags(["style", "a", "label"])
        .add_generic_attributes(["width", "style", "target", "class"])
        .generic_attribute_prefixes(HashSet::from(["data-"]))
        .link_rel(None)
        .strip_comments(false)
        .clean_content_tags(HashSet::from(["script"]))
        .clean(html)
        .to_string()
}
