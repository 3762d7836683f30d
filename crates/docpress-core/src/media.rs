//! Video link embedding.
//!
//! Bare Cloudinary and YouTube links become playable embeds: raw HTML5
//! markup for static output, structured `[block:*]` payloads for the hosted
//! service. The hosted embed widget requires its payload URL parameters
//! pre-encoded, so nested URLs have `:` and `/` percent-encoded.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde_json::json;

use crate::patterns::{CLOUDINARY_VIDEO_RE, YOUTUBE_LINK_RE};
use crate::pipeline::RenderTarget;
use crate::util::escape_html;

/// Characters the hosted embed widget expects percent-encoded in payload URLs.
const EMBED_PAYLOAD: &AsciiSet = &CONTROLS.add(b':').add(b'/');

fn encode_payload_url(url: &str) -> String {
    utf8_percent_encode(url, EMBED_PAYLOAD).to_string()
}

/// Wrap a JSON payload in the hosted service's block delimiters.
fn block(kind: &str, payload: &serde_json::Value) -> String {
    let body = serde_json::to_string_pretty(payload).unwrap_or_default();
    format!("[block:{kind}]\n{body}\n[/block]")
}

/// Rewrite Cloudinary video links into playable embeds.
///
/// The poster image is the video URL with its extension replaced by `.jpg`.
pub fn convert_cloudinary_videos(body: &str, target: &RenderTarget) -> String {
    CLOUDINARY_VIDEO_RE
        .replace_all(body, |caps: &regex::Captures<'_>| {
            let cloud_id = &caps[3];
            let version = &caps[4];
            let filename = &caps[5];
            let url =
                format!("https://res.cloudinary.com/{cloud_id}/video/upload/v{version}/{filename}");
            let poster = url.replace(".mp4", ".jpg");

            match target {
                RenderTarget::StaticSite => format!(
                    r#"<div class="video-container"><video width="640" height="360" controls poster="{poster}"><source src="{url}" type="video/mp4">Your browser does not support the video tag.</video></div>"#
                ),
                RenderTarget::HostedApi { .. } => {
                    let html = format!(
                        r#"<div style="display: flex;justify-content: center;"><video width="640" height="360" style="border-radius: 10px;" controls poster="{poster}"><source src="{url}" type="video/mp4">Your browser does not support the video tag.</video></div>"#
                    );
                    block("html", &json!({ "html": html }))
                }
            }
        })
        .into_owned()
}

/// Rewrite YouTube links into playable embeds.
pub fn convert_youtube_videos(body: &str, target: &RenderTarget) -> String {
    YOUTUBE_LINK_RE
        .replace_all(body, |caps: &regex::Captures<'_>| {
            let title = &caps[1];
            let video_id = &caps[3];

            match target {
                RenderTarget::StaticSite => {
                    let embed_url = format!("https://www.youtube.com/embed/{video_id}");
                    format!(
                        r#"<div class="video-container"><iframe width="854" height="480" src="{embed_url}" title="{}" frameborder="0" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture" allowfullscreen></iframe></div>"#,
                        escape_html(title)
                    )
                }
                RenderTarget::HostedApi { .. } => {
                    let watch_url = format!("https://www.youtube.com/watch?v={video_id}");
                    let embed_url =
                        format!("https://www.youtube.com/embed/{video_id}?feature=oembed");
                    let thumbnail_url =
                        format!("https://i.ytimg.com/vi/{video_id}/hqdefault.jpg");
                    let iframe = format!(
                        r#"<iframe class="embedly-embed" src="//cdn.embedly.com/widgets/media.html?src={}&display_name=YouTube&url={}&image={}&type=text%2Fhtml&schema=youtube" width="854" height="480" scrolling="no" title="YouTube embed" frameborder="0" allow="autoplay; fullscreen; encrypted-media; picture-in-picture;" allowfullscreen="true"></iframe>"#,
                        encode_payload_url(&embed_url),
                        encode_payload_url(&watch_url),
                        encode_payload_url(&thumbnail_url),
                    );
                    block(
                        "embed",
                        &json!({
                            "html": iframe,
                            "url": watch_url,
                            "title": title,
                            "favicon": "https://www.youtube.com/favicon.ico",
                            "image": thumbnail_url,
                            "provider": "https://www.youtube.com/",
                            "href": watch_url,
                            "typeOfEmbed": "youtube",
                        }),
                    )
                }
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOUDINARY: &str =
        "[Demo](https://res.cloudinary.com/acme/video/upload/v1234/clip.mp4)";
    const YOUTUBE: &str = "[Intro video](https://www.youtube.com/watch?v=dQw4w9WgXcQ)";

    #[test]
    fn test_cloudinary_static_has_video_element_and_poster() {
        let html = convert_cloudinary_videos(CLOUDINARY, &RenderTarget::StaticSite);
        assert!(html.contains(r#"<div class="video-container">"#));
        assert!(html.contains(
            r#"poster="https://res.cloudinary.com/acme/video/upload/v1234/clip.jpg""#
        ));
        assert!(html.contains(
            r#"src="https://res.cloudinary.com/acme/video/upload/v1234/clip.mp4""#
        ));
    }

    #[test]
    fn test_cloudinary_hosted_emits_html_block() {
        let target = RenderTarget::HostedApi {
            image_repo: "acme/docs".to_owned(),
            docs_repo: None,
        };
        let result = convert_cloudinary_videos(CLOUDINARY, &target);
        assert!(result.starts_with("[block:html]\n"));
        assert!(result.ends_with("\n[/block]"));
        assert!(result.contains("clip.jpg"));
    }

    #[test]
    fn test_youtube_static_has_iframe_with_escaped_title() {
        let body = "[A <b> title](https://youtu.be/dQw4w9WgXcQ)";
        let html = convert_youtube_videos(body, &RenderTarget::StaticSite);
        assert!(html.contains(r#"src="https://www.youtube.com/embed/dQw4w9WgXcQ""#));
        assert!(html.contains("A &lt;b&gt; title"));
    }

    #[test]
    fn test_youtube_hosted_payload_urls_are_encoded() {
        let target = RenderTarget::HostedApi {
            image_repo: "acme/docs".to_owned(),
            docs_repo: None,
        };
        let result = convert_youtube_videos(YOUTUBE, &target);
        assert!(result.starts_with("[block:embed]\n"));
        assert!(result.contains(
            "src=https%3A%2F%2Fwww.youtube.com%2Fembed%2FdQw4w9WgXcQ?feature=oembed"
        ));
        assert!(result.contains("url=https%3A%2F%2Fwww.youtube.com%2Fwatch?v=dQw4w9WgXcQ"));
        assert!(result.contains(r#""typeOfEmbed": "youtube""#));
        assert!(result.contains(r#""title": "Intro video""#));
        assert!(
            result.contains(r#""image": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg""#)
        );
    }

    #[test]
    fn test_plain_links_are_untouched() {
        let body = "[Docs](https://example.com/watch)";
        assert_eq!(
            convert_youtube_videos(body, &RenderTarget::StaticSite),
            body
        );
        assert_eq!(
            convert_cloudinary_videos(body, &RenderTarget::StaticSite),
            body
        );
    }
}
