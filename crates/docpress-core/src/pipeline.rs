//! Pipeline orchestration.
//!
//! One pipeline serves both output targets; a [`RenderTarget`] selects the
//! rewrite strategy each pass applies. The pass order is fixed: snippet and
//! table resolution run first because inserted content may itself carry
//! unrewritten references; math preservation brackets the generic Markdown
//! conversion to shield fenced math from it; heading anchors are injected
//! last because they operate on rendered heading tags.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use pulldown_cmark::{Options, Parser, html};
use regex::Regex;

use crate::callouts::convert_structural;
use crate::code::{MathPreserver, highlight_code_blocks};
use crate::config::IgnoreLists;
use crate::images::render_images;
use crate::links::{rewrite_doc_links, rewrite_figure_paths};
use crate::media::{convert_cloudinary_videos, convert_youtube_videos};
use crate::sanitize::clean_document_body;
use crate::snippets::{append_edit_snippet, insert_snippets};
use crate::tables::{convert_tables, strict_align_validator};
use crate::util::slugify;

/// Output target, selecting rewrite strategies per pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderTarget {
    /// One HTML file per document plus shared assets.
    StaticSite,
    /// Documents pushed to the hosted docs service.
    HostedApi {
        /// Repository path prefix for content-delivery image URLs.
        image_repo: String,
        /// Repository carrying the document sources, for edit links.
        docs_repo: Option<String>,
    },
}

/// Per-document rendering context. Constructed once, never mutated.
#[derive(Clone, Debug)]
pub struct RenderContext {
    pub target: RenderTarget,
    /// Root of the documentation source tree.
    pub source_dir: PathBuf,
    /// Directory of the document being rendered; snippet and table paths
    /// resolve against it.
    pub doc_dir: PathBuf,
    pub slug: String,
}

impl RenderContext {
    #[must_use]
    pub fn new(target: RenderTarget, source_dir: &Path, doc_dir: &Path, slug: &str) -> Self {
        Self {
            target,
            source_dir: source_dir.to_path_buf(),
            doc_dir: doc_dir.to_path_buf(),
            slug: slug.to_owned(),
        }
    }
}

/// Convert Markdown to HTML.
///
/// This is the black-box conversion step; everything before it is plain text
/// rewriting, everything after operates on rendered HTML.
#[must_use]
pub fn markdown_to_html(markdown: &str) -> String {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);
    let mut output = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut output, parser);
    output
}

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<(h[1-6])>(.*?)</h[1-6]>").unwrap());

/// Give every rendered heading an anchor id and a self-referential link.
#[must_use]
pub fn inject_heading_anchors(html: &str) -> String {
    HEADING_RE
        .replace_all(html, |caps: &regex::Captures<'_>| {
            let tag = &caps[1];
            let content = &caps[2];
            let anchor_id = slugify(&strip_tags(content));
            format!(
                r##"<{tag} id="{anchor_id}"><a href="#{anchor_id}" class="heading-link">{content}</a></{tag}>"##
            )
        })
        .into_owned()
}

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

/// The document transformation pipeline.
pub struct Pipeline<'a> {
    ignore: &'a IgnoreLists,
}

impl<'a> Pipeline<'a> {
    #[must_use]
    pub fn new(ignore: &'a IgnoreLists) -> Self {
        Self { ignore }
    }

    /// Run the full pass sequence over one document body.
    ///
    /// Returns the rendered HTML fragment for the target: the article body
    /// for static output, the submission body for hosted output.
    #[must_use]
    pub fn render(&self, body: &str, ctx: &RenderContext) -> String {
        let hosted = matches!(ctx.target, RenderTarget::HostedApi { .. });
        let sanitizer = |content: &str| clean_document_body(content);
        let snippet_sanitizer: Option<&dyn Fn(&str) -> String> =
            if hosted { Some(&sanitizer) } else { None };

        let mut body = body.to_owned();
        if let RenderTarget::HostedApi {
            docs_repo: Some(repo),
            ..
        } = &ctx.target
        {
            body = append_edit_snippet(
                &body,
                &ctx.source_dir,
                &ctx.doc_dir,
                &ctx.slug,
                repo,
                snippet_sanitizer,
            );
        }
        let body = insert_snippets(&body, &ctx.doc_dir, snippet_sanitizer);

        let body = if hosted {
            convert_tables(&body, &ctx.doc_dir, self.ignore, Some(&strict_align_validator))
        } else {
            convert_tables(&body, &ctx.doc_dir, self.ignore, None)
        };

        let body = rewrite_figure_paths(&body, &ctx.target, self.ignore);
        let body = rewrite_doc_links(&body, &ctx.target, self.ignore);
        let body = convert_structural(&body, &markdown_to_html);
        let body = render_images(&body, &ctx.target, self.ignore);
        let body = convert_cloudinary_videos(&body, &ctx.target);
        let body = convert_youtube_videos(&body, &ctx.target);

        let mut math = MathPreserver::new();
        let body = if hosted { math.extract(&body) } else { body };

        let body = highlight_code_blocks(&body);
        let html = markdown_to_html(&body);
        let html = if hosted { math.restore(&html) } else { html };

        if hosted {
            html
        } else {
            inject_heading_anchors(&html)
        }
    }
}
