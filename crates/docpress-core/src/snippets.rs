//! Snippet inclusion.
//!
//! `!snippet[path]` references are spliced in place with the referenced
//! file's contents. A broken snippet never aborts the document: the reference
//! is replaced with a visible bracketed diagnostic naming the resolved path.

use std::path::Path;

use crate::patterns::SNIPPET_RE;
use crate::util::resolve_relative;

/// Token replaced with the document's edit URL inside the edit-this-page
/// snippet.
const EDIT_LINK_TOKEN: &str = "!!LINK!!";

/// Splice snippet contents into `body`.
///
/// Paths are resolved relative to `doc_dir`. When a `sanitizer` is given
/// (hosted output), every spliced fragment runs through it before insertion,
/// since the content is later merged into externally rendered HTML.
pub fn insert_snippets(
    body: &str,
    doc_dir: &Path,
    sanitizer: Option<&dyn Fn(&str) -> String>,
) -> String {
    SNIPPET_RE
        .replace_all(body, |caps: &regex::Captures<'_>| {
            let snippet_path = resolve_relative(doc_dir, &caps[1]);
            match std::fs::read_to_string(&snippet_path) {
                Ok(content) => match sanitizer {
                    Some(clean) => clean(&content),
                    None => content,
                },
                Err(_) => format!(
                    "[File not found or could not be read: {}]",
                    snippet_path.display()
                ),
            }
        })
        .into_owned()
}

/// Append and resolve the edit-this-page snippet for hosted output.
///
/// The snippet lives at `<source root>/snippets/edit-this-page.md`; the
/// reference climbs out of the document directory with as many `../` segments
/// as it is deep. The spliced content's `!!LINK!!` token is replaced with the
/// document's edit URL in `docs_repo`.
pub fn append_edit_snippet(
    body: &str,
    source_dir: &Path,
    doc_dir: &Path,
    slug: &str,
    docs_repo: &str,
    sanitizer: Option<&dyn Fn(&str) -> String>,
) -> String {
    let depth = doc_dir
        .strip_prefix(source_dir)
        .map(|rel| rel.components().count())
        .unwrap_or(0);
    let snippet_ref = format!("{}snippets/edit-this-page.md", "../".repeat(depth));

    let body = format!("{body}\n\n!snippet[{snippet_ref}]");
    let body = insert_snippets(&body, doc_dir, sanitizer);

    let doc_path = match doc_dir.strip_prefix(source_dir) {
        Ok(rel) if rel.as_os_str().is_empty() => format!("{slug}.md"),
        Ok(rel) => format!("{}/{slug}.md", rel.display()),
        Err(_) => format!("{slug}.md"),
    };
    let source_name = source_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    body.replace(
        EDIT_LINK_TOKEN,
        &format!("https://github.com/{docs_repo}/edit/main/{source_name}/{doc_path}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_snippet_is_spliced_in_place() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("note.md"), "included text").unwrap();

        let result = insert_snippets("before !snippet[note.md] after", dir.path(), None);
        assert_eq!(result, "before included text after");
    }

    #[test]
    fn test_snippet_resolves_parent_segments() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("guides");
        fs::create_dir(&sub).unwrap();
        fs::write(dir.path().join("shared.md"), "shared").unwrap();

        let result = insert_snippets("!snippet[../shared.md]", &sub, None);
        assert_eq!(result, "shared");
    }

    #[test]
    fn test_missing_snippet_yields_diagnostic_with_path() {
        let dir = TempDir::new().unwrap();
        let result = insert_snippets("!snippet[gone.md]", dir.path(), None);
        let expected_path = dir.path().join("gone.md");
        assert_eq!(
            result,
            format!(
                "[File not found or could not be read: {}]",
                expected_path.display()
            )
        );
    }

    #[test]
    fn test_sanitizer_runs_on_spliced_content() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("raw.md"), "<script>x()</script>keep").unwrap();

        let sanitizer = |content: &str| content.replace("<script>x()</script>", "");
        let result = insert_snippets("!snippet[raw.md]", dir.path(), Some(&sanitizer));
        assert_eq!(result, "keep");
    }

    #[test]
    fn test_resolution_is_single_pass() {
        // A snippet whose content itself contains a reference is not
        // re-expanded.
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("outer.md"), "!snippet[inner.md]").unwrap();
        fs::write(dir.path().join("inner.md"), "deep").unwrap();

        let result = insert_snippets("!snippet[outer.md]", dir.path(), None);
        assert_eq!(result, "!snippet[inner.md]");
        // Re-running on the output resolves the remaining reference.
        assert_eq!(insert_snippets(&result, dir.path(), None), "deep");
    }

    #[test]
    fn test_edit_snippet_substitutes_link_token() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("docs");
        let doc_dir = source.join("guides");
        fs::create_dir_all(source.join("snippets")).unwrap();
        fs::create_dir_all(&doc_dir).unwrap();
        fs::write(
            source.join("snippets/edit-this-page.md"),
            "[Edit this page](!!LINK!!)",
        )
        .unwrap();

        let result = append_edit_snippet("body", &source, &doc_dir, "intro", "acme/docs", None);
        assert_eq!(
            result,
            "body\n\n[Edit this page](https://github.com/acme/docs/edit/main/docs/guides/intro.md)"
        );
    }
}
