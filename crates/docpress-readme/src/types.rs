//! Typed payloads and responses for the hosted docs API.

use serde::Deserialize;

/// A remote category.
#[derive(Clone, Debug, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub order: i64,
}

/// A remote document.
#[derive(Clone, Debug, Deserialize)]
pub struct RemoteDoc {
    #[serde(rename = "_id")]
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub hidden: bool,
}

/// A remote version descriptor.
#[derive(Clone, Debug, Deserialize)]
pub struct Version {
    pub version: String,
    #[serde(default)]
    pub version_clean: String,
    #[serde(default)]
    pub is_stable: bool,
}
