//! Markdown transformation pipeline for documentation sites.
//!
//! This crate turns a tree of Markdown documentation into either static HTML
//! pages or bodies ready for submission to a hosted docs service. The heart
//! of it is a sequence of composable text-rewriting passes — snippet
//! inclusion, CSV table rendering, image and link rewriting, callout
//! conversion, video embedding, code highlighting, math preservation, and
//! HTML sanitization — driven by a single [`Pipeline`] parameterized by
//! [`RenderTarget`].
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use docpress_core::{IgnoreLists, Pipeline, RenderContext, RenderTarget};
//!
//! let ignore = IgnoreLists::default();
//! let ctx = RenderContext::new(
//!     RenderTarget::StaticSite,
//!     Path::new("docs"),
//!     Path::new("docs/guides"),
//!     "intro",
//! );
//! let html = Pipeline::new(&ignore).render("# Intro\n\nHello.", &ctx);
//! ```

pub mod callouts;
pub mod code;
pub mod config;
pub mod document;
pub mod hierarchy;
pub mod images;
pub mod links;
pub mod media;
pub mod patterns;
pub mod pipeline;
pub mod sanitize;
pub mod site;
pub mod snippets;
pub mod tables;
mod util;

pub use config::IgnoreLists;
pub use document::{Document, DocumentError};
pub use hierarchy::{Category, DocNode, Hierarchy, HierarchyError};
pub use pipeline::{Pipeline, RenderContext, RenderTarget, markdown_to_html};
pub use site::{SiteError, SiteGenerator};
pub use util::{escape_html, slugify, title_from_slug};
