//! Admonition (callout) conversion.
//!
//! Two strategies exist. The simple strategy substitutes marker tokens in
//! place and closes the container at the next paragraph break — a best-effort
//! approximation that can mis-close on adjacent or internally blank callouts.
//! The structural strategy splits the body into blockquote runs, renders a
//! marked run's content through the ordinary Markdown conversion, and wraps
//! it in a balanced container. The pipeline uses the structural strategy.

use std::sync::LazyLock;

use regex::Regex;

use crate::patterns::ADMONITION_RE;

/// The recognized admonition kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalloutKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl CalloutKind {
    const ALL: [Self; 5] = [
        Self::Note,
        Self::Tip,
        Self::Important,
        Self::Warning,
        Self::Caution,
    ];

    fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "NOTE" => Some(Self::Note),
            "TIP" => Some(Self::Tip),
            "IMPORTANT" => Some(Self::Important),
            "WARNING" => Some(Self::Warning),
            "CAUTION" => Some(Self::Caution),
            _ => None,
        }
    }

    fn token(self) -> &'static str {
        match self {
            Self::Note => "[!NOTE]",
            Self::Tip => "[!TIP]",
            Self::Important => "[!IMPORTANT]",
            Self::Warning => "[!WARNING]",
            Self::Caution => "[!CAUTION]",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::Tip => "Tip",
            Self::Important => "Important",
            Self::Warning => "Warning",
            Self::Caution => "Caution",
        }
    }

    fn class(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Tip => "tip",
            Self::Important => "important",
            Self::Warning => "warning",
            Self::Caution => "caution",
        }
    }

    fn emoji(self) -> &'static str {
        match self {
            Self::Note | Self::Important => "\u{1F4D8}",
            Self::Tip => "\u{1F44D}",
            Self::Warning => "\u{1F6A7}",
            Self::Caution => "\u{2757}\u{FE0F}",
        }
    }
}

static PARAGRAPH_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)(<div class="(?:note|tip|important|warning|caution)">.*?)(\n\n|$)"#).unwrap()
});

/// Simple substitution strategy.
///
/// Each marker becomes an opening container plus a styled label; a
/// best-effort pass appends the closing tag at the next paragraph break.
#[must_use]
pub fn convert_simple(body: &str) -> String {
    let mut body = body.to_owned();
    for kind in CalloutKind::ALL {
        body = body.replace(
            kind.token(),
            &format!(
                r#"<div class="{}">{} <strong>{}:</strong>"#,
                kind.class(),
                kind.emoji(),
                kind.label()
            ),
        );
    }
    PARAGRAPH_CLOSE_RE
        .replace_all(&body, "${1}</div>${2}")
        .into_owned()
}

/// One run of consecutive lines, either blockquote-prefixed or not.
struct Run<'a> {
    quoted: bool,
    lines: Vec<&'a str>,
}

/// Split the body into blockquote and non-blockquote runs.
///
/// Fenced code blocks are tracked line-by-line so a `>` at the start of a
/// fenced line never opens a run.
fn split_runs(body: &str) -> Vec<Run<'_>> {
    let mut runs: Vec<Run<'_>> = Vec::new();
    let mut in_fence = false;

    for line in body.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
        }
        let quoted = !in_fence && line.trim_start().starts_with('>');

        match runs.last_mut() {
            Some(run) if run.quoted == quoted => run.lines.push(line),
            _ => runs.push(Run {
                quoted,
                lines: vec![line],
            }),
        }
    }

    runs
}

/// Strip the blockquote prefix (`>` plus one optional space) from a line.
fn strip_quote_prefix(line: &str) -> &str {
    let stripped = line.trim_start().strip_prefix('>').unwrap_or(line);
    stripped.strip_prefix(' ').unwrap_or(stripped)
}

/// Structural strategy.
///
/// Blockquote runs whose first line carries an admonition marker are stripped
/// of their prefixes and the marker, re-rendered through `render_markdown`
/// (the ordinary Markdown-to-HTML step), and wrapped in a balanced container.
/// Other runs pass through unchanged.
pub fn convert_structural(body: &str, render_markdown: &dyn Fn(&str) -> String) -> String {
    let mut output: Vec<String> = Vec::new();

    for run in split_runs(body) {
        if run.quoted {
            let first = strip_quote_prefix(run.lines[0]);
            if let Some(kind) = ADMONITION_RE
                .captures(first)
                .and_then(|caps| CalloutKind::from_marker(&caps[1]))
            {
                let content = run
                    .lines
                    .iter()
                    .map(|line| strip_quote_prefix(line).replace(kind.token(), ""))
                    .collect::<Vec<_>>()
                    .join("\n");
                let inner = render_markdown(content.trim());
                output.push(format!(
                    r#"<div class="{}"><p>{} <strong>{}:</strong></p>{}</div>"#,
                    kind.class(),
                    kind.emoji(),
                    kind.label(),
                    inner.trim()
                ));
                continue;
            }
        }
        output.push(run.lines.join("\n"));
    }

    output.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(markdown: &str) -> String {
        crate::pipeline::markdown_to_html(markdown)
    }

    fn count_tag(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_simple_opens_and_closes_container() {
        let body = "> [!NOTE]\n> Remember this.\n\nNext paragraph.";
        let result = convert_simple(body);
        assert!(result.contains(r#"<div class="note">"#));
        assert!(result.contains("<strong>Note:</strong>"));
        assert_eq!(count_tag(&result, "</div>"), 1);
        assert!(result.contains("Next paragraph."));
    }

    #[test]
    fn test_simple_handles_all_kinds() {
        for (token, class) in [
            ("[!NOTE]", "note"),
            ("[!TIP]", "tip"),
            ("[!IMPORTANT]", "important"),
            ("[!WARNING]", "warning"),
            ("[!CAUTION]", "caution"),
        ] {
            let result = convert_simple(&format!("> {token}\n> text"));
            assert!(result.contains(&format!(r#"<div class="{class}">"#)));
        }
    }

    #[test]
    fn test_structural_two_line_note_is_balanced() {
        let body = "> [!NOTE]\n> text";
        let result = convert_structural(body, &render);
        assert_eq!(count_tag(&result, "<div"), 1);
        assert_eq!(count_tag(&result, "</div>"), 1);
        assert!(result.contains("<strong>Note:</strong>"));
        assert!(result.contains("text"));
    }

    #[test]
    fn test_structural_renders_nested_list() {
        let body = "> [!TIP]\n> - one\n> - two";
        let result = convert_structural(body, &render);
        assert_eq!(count_tag(&result, "<div"), 1);
        assert_eq!(count_tag(&result, "</div>"), 1);
        assert!(result.contains("<ul>"));
        assert!(result.contains("<li>one</li>"));
    }

    #[test]
    fn test_structural_leaves_plain_blockquote_alone() {
        let body = "> just a quote\n> second line";
        let result = convert_structural(body, &render);
        assert_eq!(result, body);
    }

    #[test]
    fn test_structural_ignores_markers_past_the_first_line() {
        let body = "> quote\n> [!NOTE] late marker";
        let result = convert_structural(body, &render);
        assert_eq!(result, body);
    }

    #[test]
    fn test_structural_skips_fenced_code() {
        let body = "```\n> [!NOTE] not a callout\n```";
        let result = convert_structural(body, &render);
        assert_eq!(result, body);
    }

    #[test]
    fn test_structural_preserves_surrounding_text() {
        let body = "before\n\n> [!WARNING]\n> careful\n\nafter";
        let result = convert_structural(body, &render);
        assert!(result.starts_with("before"));
        assert!(result.ends_with("after"));
        assert_eq!(count_tag(&result, r#"<div class="warning">"#), 1);
    }
}
