//! Hosted docs REST API client.
//!
//! Synchronous HTTP client for a ReadMe-style documentation API. All
//! content calls carry the target version in an `x-readme-version` header;
//! documents and categories are addressed by slug.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};
use tracing::info;
use ureq::Agent;

use docpress_core::Document;

use crate::error::ReadMeError;
use crate::types::{Category, RemoteDoc, Version};

/// Fixed API base path.
pub const API_BASE: &str = "https://dash.readme.com/api/v1";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Hosted docs REST API client.
pub struct ReadMeClient {
    agent: Agent,
    base_url: String,
    version: String,
    auth_header: String,
}

impl ReadMeClient {
    /// Create a client for one documentation version.
    #[must_use]
    pub fn new(api_key: &str, version: &str) -> Self {
        Self::with_base_url(api_key, version, API_BASE)
    }

    /// Create a client against a non-default base URL (tests, proxies).
    #[must_use]
    pub fn with_base_url(api_key: &str, version: &str, base_url: &str) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            version: version.to_owned(),
            auth_header: format!("Basic {}", BASE64.encode(format!("{api_key}:"))),
        }
    }

    /// The documentation version this client addresses.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether the version carries a pre-release suffix (e.g. `1.2.3-rc1`).
    #[must_use]
    pub fn version_has_suffix(&self) -> bool {
        self.version.contains('-')
    }

    // ── HTTP plumbing ────────────────────────────────────────────────

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn get(&self, path: &str, versioned: bool) -> Result<Option<Value>, ReadMeError> {
        let url = self.url(path);
        let mut request = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json");
        if versioned {
            request = request.header("x-readme-version", &self.version);
        }

        let response = request.call()?;
        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status == 404 {
            return Ok(None);
        }
        if status >= 400 {
            return Err(ReadMeError::Http {
                status,
                body: read_error_body(&mut body),
            });
        }
        Ok(Some(body.read_json()?))
    }

    fn send(
        &self,
        method: &'static str,
        path: &str,
        payload: &Value,
        versioned: bool,
    ) -> Result<Option<Value>, ReadMeError> {
        let url = self.url(path);
        let mut request = match method {
            "PUT" => self.agent.put(&url),
            _ => self.agent.post(&url),
        }
        .header("Authorization", &self.auth_header)
        .header("Content-Type", "application/json")
        .header("Accept", "application/json");
        if versioned {
            request = request.header("x-readme-version", &self.version);
        }

        let payload_bytes = serde_json::to_vec(payload)?;
        let response = request.send(&payload_bytes[..])?;
        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            return Err(ReadMeError::Http {
                status,
                body: read_error_body(&mut body),
            });
        }
        Ok(body.read_json().ok())
    }

    fn delete(&self, path: &str, versioned: bool) -> Result<(), ReadMeError> {
        let url = self.url(path);
        let mut request = self
            .agent
            .delete(&url)
            .header("Authorization", &self.auth_header);
        if versioned {
            request = request.header("x-readme-version", &self.version);
        }

        let response = request.call()?;
        let status = response.status().as_u16();
        if status >= 400 && status != 404 {
            let mut body = response.into_body();
            return Err(ReadMeError::Http {
                status,
                body: read_error_body(&mut body),
            });
        }
        Ok(())
    }

    // ── Categories ───────────────────────────────────────────────────

    /// List categories for this version, sorted by their order field.
    pub fn get_categories(&self) -> Result<Vec<Category>, ReadMeError> {
        let Some(value) = self.get("/categories", true)? else {
            return Ok(Vec::new());
        };
        let mut categories: Vec<Category> = serde_json::from_value(value)?;
        categories.sort_by_key(|c| c.order);
        Ok(categories)
    }

    /// List a category's documents, sorted by their order field.
    pub fn get_category_docs(&self, category_slug: &str) -> Result<Vec<RemoteDoc>, ReadMeError> {
        let Some(value) = self.get(&format!("/categories/{category_slug}/docs"), true)? else {
            return Ok(Vec::new());
        };
        let mut docs: Vec<RemoteDoc> = serde_json::from_value(value)?;
        docs.sort_by_key(|d| d.order);
        Ok(docs)
    }

    /// Create a category when absent; returns its id and whether it was created.
    pub fn create_category_if_not_exists(
        &self,
        slug: &str,
        title: &str,
    ) -> Result<(String, bool), ReadMeError> {
        if let Some(category) = self.get(&format!("/categories/{slug}"), true)? {
            let id = category["_id"]
                .as_str()
                .ok_or_else(|| ReadMeError::CategoryCreate(title.to_owned()))?
                .to_owned();
            return Ok((id, false));
        }

        let response = self
            .send(
                "POST",
                "/categories",
                &json!({ "title": title, "type": "guide" }),
                true,
            )?
            .ok_or_else(|| ReadMeError::CategoryCreate(title.to_owned()))?;
        let id = response["_id"]
            .as_str()
            .ok_or_else(|| ReadMeError::CategoryCreate(title.to_owned()))?
            .to_owned();
        Ok((id, true))
    }

    /// Delete one category by slug.
    pub fn delete_category(&self, slug: &str) -> Result<(), ReadMeError> {
        info!("Deleting category {slug}");
        self.delete(&format!("/categories/{slug}"), true)
    }

    /// Delete every category in this version.
    pub fn delete_categories(&self) -> Result<(), ReadMeError> {
        info!("Deleting categories for version {}", self.version);
        for category in self.get_categories()? {
            self.delete_category(&category.slug)?;
        }
        Ok(())
    }

    // ── Documents ────────────────────────────────────────────────────

    /// Remote id of a document, or `None` when it does not exist.
    pub fn get_doc_id(&self, slug: &str) -> Result<Option<String>, ReadMeError> {
        let response = self.get(&format!("/docs/{slug}"), true)?;
        Ok(response
            .and_then(|value| value["_id"].as_str().map(str::to_owned)))
    }

    /// Create or update a document; returns its id and whether it was created.
    ///
    /// Ordering inside the category is preserved via the explicit `order`
    /// field; nesting via `parentDoc`.
    pub fn create_or_update_doc(
        &self,
        order: usize,
        category_id: &str,
        doc: &Document,
        body: &str,
        parent_id: Option<&str>,
    ) -> Result<(String, bool), ReadMeError> {
        let payload = doc_payload(order, category_id, doc, body, parent_id);

        match self.get_doc_id(&doc.slug)? {
            Some(doc_id) => {
                self.send("PUT", &format!("/docs/{}", doc.slug), &payload, true)?;
                Ok((doc_id, false))
            }
            None => {
                let response = self
                    .send("POST", "/docs", &payload, true)?
                    .ok_or_else(|| ReadMeError::DocWrite {
                        action: "create",
                        title: doc.title.clone(),
                    })?;
                let id = response["_id"]
                    .as_str()
                    .ok_or_else(|| ReadMeError::DocWrite {
                        action: "create",
                        title: doc.title.clone(),
                    })?
                    .to_owned();
                Ok((id, true))
            }
        }
    }

    /// Delete one document by slug.
    pub fn delete_doc(&self, slug: &str) -> Result<(), ReadMeError> {
        info!("Deleting doc {slug}");
        self.delete(&format!("/docs/{slug}"), true)
    }

    // ── Versions ─────────────────────────────────────────────────────

    /// The remote stable version string.
    pub fn get_stable_version(&self) -> Result<String, ReadMeError> {
        let Some(value) = self.get("/version", false)? else {
            return Err(ReadMeError::NoStableVersion);
        };
        let versions: Vec<Version> = serde_json::from_value(value)?;
        versions
            .into_iter()
            .find(|v| v.is_stable)
            .map(|v| v.version_clean)
            .ok_or(ReadMeError::NoStableVersion)
    }

    /// Fork this version from the stable one when it does not exist yet.
    ///
    /// Returns whether a new version was created.
    pub fn create_version_if_not_exists(&self) -> Result<bool, ReadMeError> {
        if self.get(&format!("/version/{}", self.version), false)?.is_some() {
            return Ok(false);
        }

        let stable = self.get_stable_version()?;
        info!("Creating version {} forked from {stable}", self.version);
        self.send(
            "POST",
            "/version",
            &json!({
                "version": self.version,
                "from": stable,
                "is_stable": false,
                "is_hidden": true,
            }),
            false,
        )
        .map_err(|e| ReadMeError::Version(e.to_string()))?;
        Ok(true)
    }

    /// Promote this version to stable. Suffixed versions stay hidden.
    pub fn make_version_stable(&self) -> Result<(), ReadMeError> {
        if self.version_has_suffix() {
            return Ok(());
        }
        info!("Setting version {} to stable", self.version);
        self.send(
            "PUT",
            &format!("/version/{}", self.version),
            &json!({ "is_stable": true, "is_hidden": false }),
            false,
        )
        .map_err(|e| ReadMeError::Version(e.to_string()))?;
        Ok(())
    }

    /// Delete this version remotely.
    pub fn delete_version(&self) -> Result<(), ReadMeError> {
        self.delete(&format!("/version/v{}", self.version), false)?;
        info!("Deleted version {}", self.version);
        Ok(())
    }
}

fn read_error_body(body: &mut ureq::Body) -> String {
    body.read_to_string()
        .unwrap_or_else(|_| "(unable to read error body)".to_owned())
}

/// Build the create/update payload for a document.
fn doc_payload(
    order: usize,
    category_id: &str,
    doc: &Document,
    body: &str,
    parent_id: Option<&str>,
) -> Value {
    let mut payload = json!({
        "title": doc.title,
        "type": "basic",
        "body": body,
        "category": category_id,
        "hidden": doc.hidden,
        "order": order,
        "parentDoc": parent_id,
    });
    if let Some(description) = &doc.description {
        payload["excerpt"] = json!(description);
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc() -> Document {
        Document {
            slug: "intro".to_owned(),
            title: "Introduction".to_owned(),
            body: "unused".to_owned(),
            hidden: false,
            description: Some("First steps".to_owned()),
        }
    }

    #[test]
    fn test_doc_payload_carries_order_and_parent() {
        let payload = doc_payload(3, "cat1", &doc(), "processed body", Some("parent1"));
        assert_eq!(payload["order"], 3);
        assert_eq!(payload["category"], "cat1");
        assert_eq!(payload["parentDoc"], "parent1");
        assert_eq!(payload["body"], "processed body");
        assert_eq!(payload["excerpt"], "First steps");
        assert_eq!(payload["type"], "basic");
    }

    #[test]
    fn test_doc_payload_without_parent_or_description() {
        let mut plain = doc();
        plain.description = None;
        let payload = doc_payload(0, "cat1", &plain, "", None);
        assert!(payload["parentDoc"].is_null());
        assert!(payload.get("excerpt").is_none());
    }

    #[test]
    fn test_version_suffix_detection() {
        assert!(ReadMeClient::new("key", "1.2.3-rc1").version_has_suffix());
        assert!(!ReadMeClient::new("key", "1.2.3").version_has_suffix());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ReadMeClient::with_base_url("key", "1.0.0", "http://localhost:9999/");
        assert_eq!(client.url("/docs/x"), "http://localhost:9999/docs/x");
    }
}
