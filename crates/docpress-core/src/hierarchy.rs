//! Document hierarchy: an ordered forest of categories and documents.
//!
//! Loaded once from `hierarchy.yml` in the source root and read-only during
//! generation. Slugs must be unique across the whole forest — they double as
//! cross-document link targets and output filenames.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::util::title_from_slug;

/// Hierarchy file name looked up in the source root.
pub const HIERARCHY_FILENAME: &str = "hierarchy.yml";

/// A document entry in the hierarchy, possibly with nested children.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct DocNode {
    pub slug: String,
    pub title: Option<String>,
    #[serde(default)]
    pub children: Vec<DocNode>,
}

/// A top-level category owning an ordered list of documents.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub slug: String,
    pub title: Option<String>,
    #[serde(default)]
    pub children: Vec<DocNode>,
}

impl Category {
    /// Display title, derived from the slug when not set explicitly.
    #[must_use]
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| title_from_slug(&self.slug))
    }
}

impl DocNode {
    /// Display title, derived from the slug when not set explicitly.
    #[must_use]
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| title_from_slug(&self.slug))
    }
}

/// The ordered category forest for one site.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hierarchy {
    pub categories: Vec<Category>,
}

/// Hierarchy load error.
#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
    #[error("failed to read hierarchy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid hierarchy YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("duplicate slug '{0}' in hierarchy")]
    DuplicateSlug(String),
}

impl Hierarchy {
    /// Load the hierarchy from `hierarchy.yml` under `source_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, malformed, or violates the
    /// slug-uniqueness invariant.
    pub fn load(source_dir: &Path) -> Result<Self, HierarchyError> {
        let content = std::fs::read_to_string(source_dir.join(HIERARCHY_FILENAME))?;
        Self::from_yaml(&content)
    }

    /// Parse a hierarchy from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, HierarchyError> {
        let categories: Vec<Category> = serde_yaml::from_str(content)?;
        let hierarchy = Self { categories };
        hierarchy.validate_unique_slugs()?;
        Ok(hierarchy)
    }

    /// First document of the first category, used as the index page.
    #[must_use]
    pub fn first_document(&self) -> Option<(&Category, &DocNode)> {
        let category = self.categories.first()?;
        let doc = category.children.first()?;
        Some((category, doc))
    }

    fn validate_unique_slugs(&self) -> Result<(), HierarchyError> {
        fn visit<'a>(
            node: &'a DocNode,
            seen: &mut HashSet<&'a str>,
        ) -> Result<(), HierarchyError> {
            if !seen.insert(node.slug.as_str()) {
                return Err(HierarchyError::DuplicateSlug(node.slug.clone()));
            }
            for child in &node.children {
                visit(child, seen)?;
            }
            Ok(())
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.slug.as_str()) {
                return Err(HierarchyError::DuplicateSlug(category.slug.clone()));
            }
            for doc in &category.children {
                visit(doc, &mut seen)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const YAML: &str = "
- slug: getting-started
  title: Getting Started
  children:
    - slug: overview
      children:
        - slug: details
    - slug: install
- slug: reference
";

    #[test]
    fn test_from_yaml_preserves_order_and_nesting() {
        let hierarchy = Hierarchy::from_yaml(YAML).unwrap();
        assert_eq!(hierarchy.categories.len(), 2);
        assert_eq!(hierarchy.categories[0].slug, "getting-started");
        assert_eq!(hierarchy.categories[0].children[0].slug, "overview");
        assert_eq!(
            hierarchy.categories[0].children[0].children[0].slug,
            "details"
        );
        assert_eq!(hierarchy.categories[0].children[1].slug, "install");
    }

    #[test]
    fn test_duplicate_slug_is_rejected() {
        let yaml = "
- slug: guide
  children:
    - slug: intro
    - slug: intro
";
        let err = Hierarchy::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, HierarchyError::DuplicateSlug(slug) if slug == "intro"));
    }

    #[test]
    fn test_duplicate_across_categories_is_rejected() {
        let yaml = "
- slug: a
  children:
    - slug: shared
- slug: b
  children:
    - slug: shared
";
        assert!(Hierarchy::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_display_title_falls_back_to_slug() {
        let hierarchy = Hierarchy::from_yaml(YAML).unwrap();
        assert_eq!(hierarchy.categories[0].display_title(), "Getting Started");
        assert_eq!(hierarchy.categories[1].display_title(), "Reference");
    }

    #[test]
    fn test_first_document() {
        let hierarchy = Hierarchy::from_yaml(YAML).unwrap();
        let (category, doc) = hierarchy.first_document().unwrap();
        assert_eq!(category.slug, "getting-started");
        assert_eq!(doc.slug, "overview");
    }
}
