//! Markdown image rendering.
//!
//! `![alt](src)` becomes a sanitized `<figure>` fragment. The source may
//! carry a `#key=value&...` suffix with style overrides, restricted to an
//! explicit property allowlist.

use crate::config::{ALLOWED_CSS_PROPERTIES, IgnoreLists};
use crate::patterns::IMAGE_RE;
use crate::pipeline::RenderTarget;
use crate::sanitize::clean_figure_fragment;
use crate::util::escape_html;

/// Parse `key=value&key=value` style overrides, keeping allowlisted keys.
fn parse_style_overrides(fragment: &str) -> Vec<String> {
    fragment
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, _)| ALLOWED_CSS_PROPERTIES.contains(key))
        .map(|(key, value)| format!("{key}: {value}"))
        .collect()
}

/// Replace Markdown images with styled figure fragments.
///
/// Images whose source contains an ignore-listed filename pass through
/// unchanged.
pub fn render_images(body: &str, target: &RenderTarget, ignore: &IgnoreLists) -> String {
    IMAGE_RE
        .replace_all(body, |caps: &regex::Captures<'_>| {
            let alt_text = &caps[1];
            let image_src = &caps[2];
            if ignore.images.iter().any(|name| image_src.contains(name.as_str())) {
                return caps[0].to_owned();
            }

            let (src, style_fragment) = match image_src.split_once('#') {
                Some((src, fragment)) => (src, Some(fragment)),
                None => (image_src, None),
            };

            let mut style = match target {
                RenderTarget::StaticSite => "border-radius: 8px; max-width: 100%;".to_owned(),
                RenderTarget::HostedApi { .. } => "border-radius: 8px;".to_owned(),
            };
            if let Some(fragment) = style_fragment {
                let overrides = parse_style_overrides(fragment);
                if !overrides.is_empty() {
                    style = format!("{style} {}", overrides.join("; "));
                }
            }

            let src = escape_html(src);
            let img = match target {
                RenderTarget::StaticSite => {
                    if alt_text.is_empty() {
                        format!(r#"<img src="{src}" style="{style}" />"#)
                    } else {
                        format!(
                            r#"<img src="{src}" alt="{}" style="{style}" />"#,
                            escape_html(alt_text)
                        )
                    }
                }
                RenderTarget::HostedApi { .. } => {
                    format!(r#"<img src="{src}" align="center" style="{style}" />"#)
                }
            };

            let html = if alt_text.is_empty() {
                format!("<figure>{img}</figure>")
            } else {
                format!(
                    "<figure>{img}<figcaption>{}</figcaption></figure>",
                    escape_html(alt_text)
                )
            };

            clean_figure_fragment(&html, target)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hosted() -> RenderTarget {
        RenderTarget::HostedApi {
            image_repo: "acme/docs/main/docs/figures".to_owned(),
            docs_repo: None,
        }
    }

    #[test]
    fn test_static_image_becomes_figure_with_caption() {
        let html = render_images(
            "![A chart](assets/chart.png)",
            &RenderTarget::StaticSite,
            &IgnoreLists::empty(),
        );
        assert!(html.contains(r#"src="assets/chart.png""#));
        assert!(html.contains(r#"alt="A chart""#));
        assert!(html.contains("<figcaption>A chart</figcaption>"));
        assert!(html.contains("max-width: 100%"));
    }

    #[test]
    fn test_image_without_alt_has_no_caption() {
        let html = render_images(
            "![](assets/chart.png)",
            &RenderTarget::StaticSite,
            &IgnoreLists::empty(),
        );
        assert!(!html.contains("figcaption"));
        assert!(html.contains("<figure>"));
    }

    #[test]
    fn test_allowed_style_override_is_applied() {
        let html = render_images(
            "![A](a.png#width=300px)",
            &RenderTarget::StaticSite,
            &IgnoreLists::empty(),
        );
        assert!(html.contains("width: 300px"));
        assert!(html.contains(r#"src="a.png""#));
    }

    #[test]
    fn test_disallowed_style_override_is_dropped() {
        let html = render_images(
            "![A](a.png#position=absolute&height=2em)",
            &RenderTarget::StaticSite,
            &IgnoreLists::empty(),
        );
        assert!(!html.contains("position"));
        assert!(html.contains("height: 2em"));
    }

    #[test]
    fn test_hosted_image_is_centered() {
        let html = render_images("![A](a.png)", &hosted(), &IgnoreLists::empty());
        assert!(html.contains(r#"align="center""#));
        assert!(!html.contains("max-width"));
    }

    #[test]
    fn test_ignored_image_passes_through() {
        let body = "![Example](../figures/docs-only-example.png)";
        let html = render_images(body, &RenderTarget::StaticSite, &IgnoreLists::default());
        assert_eq!(html, body);
    }

    #[test]
    fn test_markup_in_alt_text_is_neutralized() {
        let html = render_images(
            "![<script>x()</script>](a.png)",
            &RenderTarget::StaticSite,
            &IgnoreLists::empty(),
        );
        assert!(!html.contains("<script>"));
    }
}
