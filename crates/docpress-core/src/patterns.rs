//! Text-matching rules for every construct the pipeline rewrites.
//!
//! Each matcher is anchored tightly enough to avoid false positives on
//! ordinary prose and never consumes content past its syntactic terminator.
//! Replacement closures receive only the captured groups and return pure
//! string substitutions.

use std::sync::LazyLock;

use regex::Regex;

/// Snippet reference: `!snippet[relative/path.md]`.
pub static SNIPPET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!snippet\[(.*?)\]").unwrap());

/// CSV table reference: `!table[relative/path.csv]`.
pub static CSV_TABLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!table\[(.+?)\]").unwrap());

/// Markdown image: `![alt](src)`, where `src` may carry a `#key=value` suffix.
pub static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap());

/// Relative figure path: one to five `../` segments into a `figures/` tree.
pub static FIGURE_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\.\./){1,5}figures/((.+)\.(png|jpg|jpeg|gif|svg|webp))").unwrap()
});

/// Internal document link: `(relative/path.md#fragment)`.
pub static DOC_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([\./]*)([\w\-/]+)\.md(#.*?)?\)").unwrap());

/// Cloudinary-hosted video link with cloud id, version token, and filename.
pub static CLOUDINARY_VIDEO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\[(.*?)\]\((https://res\.cloudinary\.com/([^/]+)/video/upload/v(\d+)/([^/]+\.mp4))\)",
    )
    .unwrap()
});

/// YouTube watch or short link carrying an 11-character video id.
pub static YOUTUBE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\[(.*?)\]\((https?://(?:www\.)?(?:youtube\.com/watch\?v=|youtu\.be/)([a-zA-Z0-9_-]{11})(?:[&?][^\)]*)?)\)",
    )
    .unwrap()
});

/// Fenced code block with an optional info string, non-greedy across lines.
pub static CODE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```([^\n]*)\n(.*?)```").unwrap());

/// Raw `<img>` tag with a double-quoted `src` attribute.
pub static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<img\s+[^>]*src="([^"]*)"[^>]*>"#).unwrap());

/// Admonition marker inside a blockquote line.
pub static ADMONITION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[!(NOTE|TIP|IMPORTANT|WARNING|CAUTION)\]").unwrap());
