//! Fenced code handling: syntax highlighting and math preservation.
//!
//! Highlighting resolves each fence's language against the syntect lexer
//! registry and emits inline-styled HTML; unrecognized languages fall back to
//! an escaped `<pre><code>` fragment with a `language-` class for client-side
//! highlighting. Math preservation swaps `latex`/`tex`/`math` fences for
//! collision-free placeholder tokens before the generic Markdown conversion
//! and restores them afterwards, byte-for-byte.

use std::sync::LazyLock;

use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::patterns::CODE_BLOCK_RE;
use crate::util::escape_html;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Theme used for inline-styled highlighted output.
const HIGHLIGHT_THEME: &str = "InspiredGitHub";

/// Fence languages diverted into math placeholders.
const MATH_LANGUAGES: &[&str] = &["latex", "tex", "math"];

/// Sentinel framing placeholder tokens. A private-use codepoint cannot occur
/// in well-formed document text, so tokens never collide with content.
const PLACEHOLDER_SENTINEL: char = '\u{E000}';

/// Replace fenced code blocks with highlighted HTML.
///
/// An empty info string highlights as `text`. The emitted fragment is raw
/// HTML, so the downstream Markdown converter passes it through unchanged.
#[must_use]
pub fn highlight_code_blocks(body: &str) -> String {
    CODE_BLOCK_RE
        .replace_all(body, |caps: &regex::Captures<'_>| {
            let info = caps[1].trim();
            let language = info.split_whitespace().next().unwrap_or("");
            let language = if language.is_empty() { "text" } else { language };
            let code = &caps[2];

            if let Some(syntax) = SYNTAX_SET.find_syntax_by_token(language) {
                let theme = &THEME_SET.themes[HIGHLIGHT_THEME];
                if let Ok(highlighted) =
                    highlighted_html_for_string(code, &SYNTAX_SET, syntax, theme)
                {
                    return highlighted;
                }
            }

            format!(
                "<pre><code class=\"language-{language}\">{}</code></pre>",
                escape_html(code)
            )
        })
        .into_owned()
}

/// Side table of extracted math blocks, restored after conversion.
#[derive(Debug, Default)]
pub struct MathPreserver {
    blocks: Vec<String>,
}

impl MathPreserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn token(index: usize) -> String {
        format!("{PLACEHOLDER_SENTINEL}math-block-{index}{PLACEHOLDER_SENTINEL}")
    }

    /// Whether any block was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Swap math fences for placeholder tokens, recording their content.
    ///
    /// Non-math fences are left for the highlighter. Matching is
    /// case-insensitive on the fence language.
    pub fn extract(&mut self, body: &str) -> String {
        CODE_BLOCK_RE
            .replace_all(body, |caps: &regex::Captures<'_>| {
                let language = caps[1].trim().to_ascii_lowercase();
                if MATH_LANGUAGES.contains(&language.as_str()) {
                    let index = self.blocks.len();
                    self.blocks.push(caps[2].to_owned());
                    Self::token(index)
                } else {
                    caps[0].to_owned()
                }
            })
            .into_owned()
    }

    /// Substitute placeholders back with the raw block content, wrapped in a
    /// dedicated container the converter never touched.
    #[must_use]
    pub fn restore(&self, html: &str) -> String {
        let mut html = html.to_owned();
        for (index, content) in self.blocks.iter().enumerate() {
            html = html.replace(
                &Self::token(index),
                &format!("<div class=\"math-block\">\n{content}</div>"),
            );
        }
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_known_language_is_highlighted() {
        let html = highlight_code_blocks("```rust\nfn main() {}\n```");
        assert!(html.contains("<pre"));
        assert!(html.contains("style="));
        assert!(!html.contains("```"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_escaped_pre() {
        let html = highlight_code_blocks("```imaginarylang\na < b\n```");
        assert_eq!(
            html,
            "<pre><code class=\"language-imaginarylang\">a &lt; b\n</code></pre>"
        );
    }

    #[test]
    fn test_missing_language_highlights_as_text() {
        let html = highlight_code_blocks("```\nplain\n```");
        assert!(!html.contains("```"));
        assert!(html.contains("plain"));
    }

    #[test]
    fn test_surrounding_prose_is_untouched() {
        let html = highlight_code_blocks("before\n\n```rust\nlet x = 1;\n```\n\nafter");
        assert!(html.starts_with("before"));
        assert!(html.ends_with("after"));
    }

    #[test]
    fn test_math_fence_is_extracted_and_restored_byte_for_byte() {
        let source = "```latex\n\\frac{a}{b} x_i ^2\n```";
        let mut preserver = MathPreserver::new();
        let extracted = preserver.extract(source);
        assert!(!extracted.contains("\\frac"));
        assert!(extracted.contains('\u{E000}'));

        let restored = preserver.restore(&extracted);
        assert!(restored.contains("\\frac{a}{b} x_i ^2\n"));
        assert!(restored.contains("<div class=\"math-block\">"));
        assert!(!restored.contains('\u{E000}'));
    }

    #[test]
    fn test_math_matching_is_case_insensitive() {
        let mut preserver = MathPreserver::new();
        let extracted = preserver.extract("```LaTeX\ne = mc^2\n```");
        assert!(!extracted.contains("mc^2"));
        assert!(!preserver.is_empty());
    }

    #[test]
    fn test_non_math_fences_are_left_for_the_highlighter() {
        let mut preserver = MathPreserver::new();
        let source = "```rust\nlet x = 1;\n```";
        assert_eq!(preserver.extract(source), source);
        assert!(preserver.is_empty());
    }

    #[test]
    fn test_placeholders_are_unique_per_block() {
        let mut preserver = MathPreserver::new();
        let extracted = preserver.extract("```tex\na\n```\n\n```math\nb\n```");
        assert!(extracted.contains("math-block-0"));
        assert!(extracted.contains("math-block-1"));

        let restored = preserver.restore(&extracted);
        let a_pos = restored.find("a\n").unwrap();
        let b_pos = restored.find("b\n").unwrap();
        assert!(a_pos < b_pos);
    }
}
