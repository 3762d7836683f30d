//! Document model and YAML front-matter parsing.
//!
//! A document is parsed once from a source file's front-matter and body and is
//! immutable afterwards. The hosted sync path requires front-matter; the
//! static-site generator tolerates its absence and derives a title from the
//! slug.

use serde::Deserialize;

use crate::util::title_from_slug;

/// A single documentation page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Unique identifier, used as the output filename and link target.
    pub slug: String,
    pub title: String,
    /// Raw Markdown body (front-matter stripped).
    pub body: String,
    pub hidden: bool,
    pub description: Option<String>,
}

/// Front-matter fields recognized in document sources.
#[derive(Debug, Default, Deserialize)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub hidden: Option<bool>,
    pub description: Option<String>,
}

/// Document parse error.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("no front matter found in document '{0}'")]
    MissingFrontMatter(String),

    #[error("invalid front matter in document '{slug}': {source}")]
    InvalidFrontMatter {
        slug: String,
        source: serde_yaml::Error,
    },
}

/// Split a source file into its front-matter block and Markdown body.
///
/// Front-matter is a leading `---` line followed by YAML and a closing `---`.
/// Returns `None` when the file does not start with a delimiter.
#[must_use]
pub fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---")?;
    let (front_matter, body) = rest.split_once("---")?;
    Some((front_matter, body.strip_prefix('\n').unwrap_or(body)))
}

impl Document {
    /// Parse a document, requiring front-matter.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::MissingFrontMatter`] when the source carries
    /// no front-matter block, or [`DocumentError::InvalidFrontMatter`] when
    /// the block is not valid YAML.
    pub fn parse(slug: &str, content: &str) -> Result<Self, DocumentError> {
        let (front_matter, body) = split_front_matter(content)
            .ok_or_else(|| DocumentError::MissingFrontMatter(slug.to_owned()))?;

        let fields: FrontMatter =
            serde_yaml::from_str(front_matter).map_err(|source| DocumentError::InvalidFrontMatter {
                slug: slug.to_owned(),
                source,
            })?;

        Ok(Self {
            slug: slug.to_owned(),
            title: fields.title.unwrap_or_default(),
            body: body.to_owned(),
            hidden: fields.hidden.unwrap_or(false),
            description: fields.description,
        })
    }

    /// Parse a document, tolerating missing or malformed front-matter.
    ///
    /// Used by the static-site generator: a file without front-matter becomes
    /// a document titled after its slug, with the whole file as body.
    #[must_use]
    pub fn parse_lenient(slug: &str, content: &str) -> Self {
        match Self::parse(slug, content) {
            Ok(mut doc) => {
                if doc.title.is_empty() {
                    doc.title = title_from_slug(slug);
                }
                doc
            }
            Err(_) => Self {
                slug: slug.to_owned(),
                title: title_from_slug(slug),
                body: content.to_owned(),
                hidden: false,
                description: None,
            },
        }
    }
}
