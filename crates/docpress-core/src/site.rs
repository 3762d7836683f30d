//! Static-site generation.
//!
//! Drives per-document and per-site output: one HTML page per document, a
//! navigation sidebar, breadcrumb trails, an index page picked from the first
//! document, a copied `assets/` tree mirroring the source `figures/` tree,
//! and shared stylesheet/script boilerplate.

use std::path::{Path, PathBuf};

use tracing::{error, info};
use walkdir::WalkDir;

use crate::config::IgnoreLists;
use crate::document::Document;
use crate::hierarchy::{DocNode, Hierarchy};
use crate::pipeline::{Pipeline, RenderContext, RenderTarget};
use crate::util::escape_html;

/// Shared stylesheet written to `css/style.css`.
const STYLE_CSS: &str = include_str!("../assets/style.css");

/// Shared script written to `js/main.js`.
const MAIN_JS: &str = include_str!("../assets/main.js");

/// Image extensions mirrored into the `assets/` tree.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp"];

/// Site generation error.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Breadcrumb trail: display name plus an optional link target.
pub type Breadcrumbs = Vec<(String, Option<String>)>;

/// Generates a static HTML site from a documentation tree.
pub struct SiteGenerator<'a> {
    output_dir: PathBuf,
    ignore: &'a IgnoreLists,
}

impl<'a> SiteGenerator<'a> {
    /// Create a generator, preparing the output directory layout.
    pub fn new(output_dir: &Path, ignore: &'a IgnoreLists) -> Result<Self, SiteError> {
        std::fs::create_dir_all(output_dir.join("assets"))?;
        std::fs::create_dir_all(output_dir.join("css"))?;
        std::fs::create_dir_all(output_dir.join("js"))?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            ignore,
        })
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Generate the whole site: every document, the index page, copied
    /// assets, and static files.
    pub fn generate(&self, hierarchy: &Hierarchy, source_dir: &Path) -> Result<(), SiteError> {
        self.write_static_files()?;
        self.copy_assets(source_dir)?;

        for category in &hierarchy.categories {
            info!("Processing category: {}", category.display_title());
            let breadcrumbs = vec![
                ("Home".to_owned(), Some("index.html".to_owned())),
                (category.display_title(), None),
            ];
            self.generate_children(
                &category.children,
                hierarchy,
                source_dir,
                &category.slug,
                &breadcrumbs,
            );
        }

        self.generate_index(hierarchy, source_dir)?;
        Ok(())
    }

    fn generate_children(
        &self,
        docs: &[DocNode],
        hierarchy: &Hierarchy,
        source_dir: &Path,
        category_path: &str,
        breadcrumbs: &Breadcrumbs,
    ) {
        for doc in docs {
            let mut crumbs = breadcrumbs.clone();
            crumbs.push((doc.slug.clone(), Some(format!("{}.html", doc.slug))));

            // A missing source file skips the document, never the walk.
            self.generate_document(doc, hierarchy, source_dir, category_path, &crumbs);

            if !doc.children.is_empty() {
                self.generate_children(
                    &doc.children,
                    hierarchy,
                    source_dir,
                    &format!("{category_path}/{}", doc.slug),
                    &crumbs,
                );
            }
        }
    }

    /// Render one document to `<slug>.html`.
    ///
    /// Returns the output path, or `None` when the source file is missing or
    /// unreadable (logged and skipped).
    pub fn generate_document(
        &self,
        doc: &DocNode,
        hierarchy: &Hierarchy,
        source_dir: &Path,
        category_path: &str,
        breadcrumbs: &Breadcrumbs,
    ) -> Option<PathBuf> {
        let doc_dir = source_dir.join(category_path);
        let doc_path = doc_dir.join(format!("{}.md", doc.slug));

        let raw = match std::fs::read_to_string(&doc_path) {
            Ok(content) => content,
            Err(e) => {
                error!("File not found: {} ({e})", doc_path.display());
                return None;
            }
        };

        let document = Document::parse_lenient(&doc.slug, &raw);
        let ctx = RenderContext::new(RenderTarget::StaticSite, source_dir, &doc_dir, &doc.slug);
        let content = Pipeline::new(self.ignore).render(&document.body, &ctx);

        let navigation = navigation_html(hierarchy, &doc.slug);
        let page = page_template(&document.title, &content, &navigation, breadcrumbs);

        let output_path = self.output_dir.join(format!("{}.html", doc.slug));
        if let Err(e) = std::fs::write(&output_path, page) {
            error!("Failed to write {}: {e}", output_path.display());
            return None;
        }
        info!("Generated: {}.html", doc.slug);
        Some(output_path)
    }

    /// Render `index.html` from the first document of the first category,
    /// falling back to a welcome page for an empty hierarchy.
    pub fn generate_index(
        &self,
        hierarchy: &Hierarchy,
        source_dir: &Path,
    ) -> Result<PathBuf, SiteError> {
        let output_path = self.output_dir.join("index.html");

        let Some((category, doc)) = hierarchy.first_document() else {
            let content = "<div class=\"welcome\"><h2>Welcome to the Documentation</h2>\
                           <p>Select a topic from the navigation to get started.</p></div>";
            let navigation = navigation_html(hierarchy, "");
            let page = page_template("Home", content, &navigation, &Vec::new());
            std::fs::write(&output_path, page)?;
            info!("Index page generated");
            return Ok(output_path);
        };

        let doc_dir = source_dir.join(&category.slug);
        let doc_path = doc_dir.join(format!("{}.md", doc.slug));
        let raw = std::fs::read_to_string(&doc_path)?;

        let document = Document::parse_lenient(&doc.slug, &raw);
        let ctx = RenderContext::new(RenderTarget::StaticSite, source_dir, &doc_dir, &doc.slug);
        let content = Pipeline::new(self.ignore).render(&document.body, &ctx);

        let navigation = navigation_html(hierarchy, &doc.slug);
        let breadcrumbs = vec![("Home".to_owned(), Some("index.html".to_owned()))];
        let page = page_template(&document.title, &content, &navigation, &breadcrumbs);

        std::fs::write(&output_path, page)?;
        info!("Index page generated from first doc");
        Ok(output_path)
    }

    /// Mirror the source `figures/` tree into `assets/`, images only.
    pub fn copy_assets(&self, source_dir: &Path) -> Result<(), SiteError> {
        let figures_dir = source_dir.join("figures");
        if !figures_dir.exists() {
            return Ok(());
        }
        info!("Copying assets from {}", figures_dir.display());

        for entry in WalkDir::new(&figures_dir).into_iter().filter_map(Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }
            let extension = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_ascii_lowercase);
            let Some(extension) = extension else { continue };
            if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&figures_dir)
                .unwrap_or_else(|_| entry.path());
            let dest = self.output_dir.join("assets").join(relative);
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &dest)?;
        }
        Ok(())
    }

    /// Write the shared stylesheet and script.
    pub fn write_static_files(&self) -> Result<(), SiteError> {
        std::fs::write(self.output_dir.join("css/style.css"), STYLE_CSS)?;
        std::fs::write(self.output_dir.join("js/main.js"), MAIN_JS)?;
        Ok(())
    }
}

/// Build the navigation sidebar for the whole hierarchy.
#[must_use]
pub fn navigation_html(hierarchy: &Hierarchy, current_slug: &str) -> String {
    let mut nav = String::from(
        "<nav class=\"sidebar\"><div class=\"nav-header\">Documentation</div><ul class=\"nav-list\">",
    );

    for category in &hierarchy.categories {
        nav.push_str("<li class=\"nav-category\">");
        nav.push_str(&format!(
            "<div class=\"category-title\">{}</div>",
            escape_html(&category.display_title())
        ));
        nav.push_str("<ul class=\"nav-sublist\">");
        for doc in &category.children {
            nav.push_str(&nav_item_html(doc, current_slug, 0));
        }
        nav.push_str("</ul></li>");
    }

    nav.push_str("</ul></nav>");
    nav
}

fn nav_item_html(doc: &DocNode, current_slug: &str, level: usize) -> String {
    let active_class = if doc.slug == current_slug {
        " class=\"active\""
    } else {
        ""
    };
    let indent_class = if level > 0 {
        format!("indent-{level}")
    } else {
        String::new()
    };
    let title = escape_html(&doc.display_title());

    let mut item = format!(
        "<li class=\"{indent_class}\" data-slug=\"{}\">",
        escape_html(&doc.slug)
    );

    if doc.children.is_empty() {
        item.push_str(&format!(
            "<a href=\"{}.html\"{active_class}>{title}</a>",
            doc.slug
        ));
    } else {
        item.push_str(&format!(
            "<a href=\"{}.html\"{active_class}><span class=\"has-children-indicator\">\u{203A} </span>{title}</a>",
            doc.slug
        ));
        item.push_str("<ul class=\"nav-sublist collapsed\">");
        for child in &doc.children {
            item.push_str(&nav_item_html(child, current_slug, level + 1));
        }
        item.push_str("</ul>");
    }

    item.push_str("</li>");
    item
}

/// Render the breadcrumb trail.
fn breadcrumbs_html(breadcrumbs: &Breadcrumbs) -> String {
    if breadcrumbs.is_empty() {
        return String::new();
    }
    let mut html = String::from("<div class=\"breadcrumbs\">");
    for (i, (name, link)) in breadcrumbs.iter().enumerate() {
        if i > 0 {
            html.push_str(" &gt; ");
        }
        match link {
            Some(target) => html.push_str(&format!(
                "<a href=\"{target}\">{}</a>",
                escape_html(name)
            )),
            None => html.push_str(&escape_html(name)),
        }
    }
    html.push_str("</div>");
    html
}

/// Assemble the full page document.
#[must_use]
pub fn page_template(
    title: &str,
    content: &str,
    navigation: &str,
    breadcrumbs: &Breadcrumbs,
) -> String {
    let title = escape_html(title);
    let breadcrumb_html = breadcrumbs_html(breadcrumbs);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Documentation</title>
    <link rel="stylesheet" href="css/style.css">
</head>
<body>
    {navigation}
    <main class="content">
        {breadcrumb_html}
        <article>
            <h1>{title}</h1>
            {content}
        </article>
    </main>
    <script src="js/main.js"></script>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn hierarchy() -> Hierarchy {
        Hierarchy::from_yaml(
            "
- slug: guides
  title: Guides
  children:
    - slug: intro
    - slug: setup
      children:
        - slug: advanced
",
        )
        .unwrap()
    }

    fn write_source(dir: &Path) {
        fs::create_dir_all(dir.join("guides/setup")).unwrap();
        fs::write(
            dir.join("guides/intro.md"),
            "---\ntitle: Introduction\n---\n# Intro\n\nWelcome.\n",
        )
        .unwrap();
        fs::write(
            dir.join("guides/setup.md"),
            "---\ntitle: Setup\n---\nInstall steps.\n",
        )
        .unwrap();
        fs::write(
            dir.join("guides/setup/advanced.md"),
            "---\ntitle: Advanced\n---\nDeep dive.\n",
        )
        .unwrap();
    }

    #[test]
    fn test_generate_writes_page_per_document_and_index() {
        let source = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_source(source.path());

        let ignore = IgnoreLists::empty();
        let generator = SiteGenerator::new(output.path(), &ignore).unwrap();
        generator.generate(&hierarchy(), source.path()).unwrap();

        assert!(output.path().join("intro.html").exists());
        assert!(output.path().join("setup.html").exists());
        assert!(output.path().join("advanced.html").exists());
        assert!(output.path().join("index.html").exists());
        assert!(output.path().join("css/style.css").exists());
        assert!(output.path().join("js/main.js").exists());

        let intro = fs::read_to_string(output.path().join("intro.html")).unwrap();
        assert!(intro.contains("<title>Introduction - Documentation</title>"));
        assert!(intro.contains("Welcome."));
    }

    #[test]
    fn test_missing_document_is_skipped() {
        let source = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_source(source.path());
        fs::remove_file(source.path().join("guides/setup.md")).unwrap();

        let ignore = IgnoreLists::empty();
        let generator = SiteGenerator::new(output.path(), &ignore).unwrap();
        generator.generate(&hierarchy(), source.path()).unwrap();

        assert!(!output.path().join("setup.html").exists());
        // The rest of the site still builds.
        assert!(output.path().join("intro.html").exists());
        assert!(output.path().join("advanced.html").exists());
    }

    #[test]
    fn test_index_uses_first_document() {
        let source = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_source(source.path());

        let ignore = IgnoreLists::empty();
        let generator = SiteGenerator::new(output.path(), &ignore).unwrap();
        generator.generate(&hierarchy(), source.path()).unwrap();

        let index = fs::read_to_string(output.path().join("index.html")).unwrap();
        assert!(index.contains("Welcome."));
    }

    #[test]
    fn test_index_falls_back_to_welcome_page() {
        let source = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        let ignore = IgnoreLists::empty();
        let generator = SiteGenerator::new(output.path(), &ignore).unwrap();
        generator
            .generate_index(&Hierarchy::default(), source.path())
            .unwrap();

        let index = fs::read_to_string(output.path().join("index.html")).unwrap();
        assert!(index.contains("Welcome to the Documentation"));
    }

    #[test]
    fn test_copy_assets_mirrors_figures_tree() {
        let source = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::create_dir_all(source.path().join("figures/arch")).unwrap();
        fs::write(source.path().join("figures/arch/stack.png"), b"png").unwrap();
        fs::write(source.path().join("figures/notes.txt"), b"txt").unwrap();

        let ignore = IgnoreLists::empty();
        let generator = SiteGenerator::new(output.path(), &ignore).unwrap();
        generator.copy_assets(source.path()).unwrap();

        assert!(output.path().join("assets/arch/stack.png").exists());
        assert!(!output.path().join("assets/notes.txt").exists());
    }

    #[test]
    fn test_navigation_marks_active_document() {
        let nav = navigation_html(&hierarchy(), "intro");
        assert!(nav.contains(r#"<a href="intro.html" class="active">Intro</a>"#));
        assert!(nav.contains("category-title"));
        assert!(nav.contains("indent-1"));
    }

    #[test]
    fn test_navigation_nests_children() {
        let nav = navigation_html(&hierarchy(), "");
        assert!(nav.contains("has-children-indicator"));
        assert!(nav.contains(r#"data-slug="advanced""#));
    }

    #[test]
    fn test_breadcrumbs_render_links_and_plain_entries() {
        let crumbs = vec![
            ("Home".to_owned(), Some("index.html".to_owned())),
            ("Guides".to_owned(), None),
            ("intro".to_owned(), Some("intro.html".to_owned())),
        ];
        let html = breadcrumbs_html(&crumbs);
        assert_eq!(
            html,
            "<div class=\"breadcrumbs\"><a href=\"index.html\">Home</a> &gt; Guides &gt; <a href=\"intro.html\">intro</a></div>"
        );
    }
}
