//! Process-wide rewrite exemptions.
//!
//! The ignore lists are an explicit, immutable value constructed once and
//! threaded into every pass that needs them. Components never consult ambient
//! state for exemptions.

/// CSS properties that image style overrides may set.
pub const ALLOWED_CSS_PROPERTIES: &[&str] = &["width", "height"];

/// Filenames and URLs exempt from rewriting.
///
/// `docs` entries are placeholder document slugs whose links must survive
/// untouched in hosted output; `images` and `tables` are fixture files shown
/// literally in the documentation about the tooling itself; `external_urls`
/// are citation domains excluded from link checking.
#[derive(Clone, Debug)]
pub struct IgnoreLists {
    pub docs: Vec<String>,
    pub images: Vec<String>,
    pub tables: Vec<String>,
    pub external_urls: Vec<String>,
}

impl Default for IgnoreLists {
    fn default() -> Self {
        Self {
            docs: vec![
                "placeholder-example-doc".to_owned(),
                "some-existing-doc".to_owned(),
            ],
            images: vec!["docs-only-example.png".to_owned()],
            tables: vec!["example-table-for-docs.csv".to_owned()],
            external_urls: vec![
                "openai.com".to_owned(),
                "science.org".to_owned(),
                "annualreviews.org".to_owned(),
                "sciencedirect.com".to_owned(),
            ],
        }
    }
}

impl IgnoreLists {
    /// An empty set of exemptions, useful for tests and overrides.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            docs: Vec::new(),
            images: Vec::new(),
            tables: Vec::new(),
            external_urls: Vec::new(),
        }
    }

    pub fn ignores_image(&self, filename: &str) -> bool {
        self.images.iter().any(|entry| entry == filename)
    }

    pub fn ignores_table(&self, filename: &str) -> bool {
        self.tables.iter().any(|entry| entry == filename)
    }

    /// Whether any ignored document placeholder occurs in `text`.
    pub fn contains_ignored_doc(&self, text: &str) -> bool {
        self.docs.iter().any(|entry| text.contains(entry.as_str()))
    }
}
