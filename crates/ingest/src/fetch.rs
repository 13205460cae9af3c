//! Content fetching: retrieve a web page and pull out its title,
//! description, social image, and a bounded slice of body text.
//!
//! The HTML pass is a single streaming rewrite; handlers collect the
//! pieces we care about and the rewritten output itself is discarded.

use lol_html::{element, rewrite_str, text, RewriteStrSettings};
use serde::Serialize;
use slidesmith_core::{Error, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// Upper bound on extracted body text, in characters, after whitespace
/// collapsing. Keeps the downstream prompt small.
pub const MAX_PAGE_CONTENT_CHARS: usize = 2000;

/// What a fetched page boils down to for synthesis.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageContent {
    pub title: String,
    pub description: String,
    /// The page's social-preview image URL, if any.
    pub image: String,
    /// Whitespace-collapsed body text, at most [`MAX_PAGE_CONTENT_CHARS`].
    pub content: String,
    pub url: String,
}

/// Fetch `url` and extract its content.
///
/// Errors: a malformed or non-HTTP URL is [`Error::Validation`]; network
/// failures and non-2xx responses are [`Error::Upstream`].
pub async fn fetch_page(url: &str) -> Result<PageContent> {
    let parsed = validate_url(url)?;

    let client = reqwest::Client::builder()
        .user_agent(concat!("slidesmith/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| Error::Upstream(format!("failed to build HTTP client: {}", e)))?;

    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(|e| Error::Upstream(format!("failed to fetch {}: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Upstream(format!("{} returned {}", url, status)));
    }

    let html = response
        .text()
        .await
        .map_err(|e| Error::Upstream(format!("failed to read response body: {}", e)))?;

    log::debug!("fetched {} ({} bytes of HTML)", url, html.len());
    extract_page_content(&html, url)
}

/// Check that `url` parses and uses an HTTP scheme before any network
/// traffic happens.
fn validate_url(url: &str) -> Result<reqwest::Url> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| Error::Validation(format!("invalid URL '{}': {}", url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Validation(format!(
            "unsupported URL scheme '{}'",
            parsed.scheme()
        )));
    }
    Ok(parsed)
}

/// Extract page content from already-fetched HTML. Split out from the
/// network call so it can be exercised directly.
pub fn extract_page_content(html: &str, url: &str) -> Result<PageContent> {
    // Content elements whose text feeds the synthesis prompt.
    const BODY_SELECTORS: [&str; 6] = ["p", "h1", "h2", "h3", "li", "blockquote"];

    let mut title_text = String::new();
    let mut meta: HashMap<String, String> = HashMap::new();
    // One handler per selector; they share the accumulator through a cell.
    let body_text = RefCell::new(String::new());

    let mut handlers = vec![
        text!("title", |t| {
            title_text.push_str(t.as_str());
            Ok(())
        }),
        element!("meta[content]", |el| {
            let key = el
                .get_attribute("property")
                .or_else(|| el.get_attribute("name"));
            if let (Some(key), Some(content)) = (key, el.get_attribute("content")) {
                // First occurrence wins, matching head order.
                meta.entry(key.to_ascii_lowercase()).or_insert(content);
            }
            Ok(())
        }),
    ];
    for selector in BODY_SELECTORS {
        handlers.push(text!(selector, |t| {
            let mut body = body_text.borrow_mut();
            body.push_str(t.as_str());
            body.push(' ');
            Ok(())
        }));
    }

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: handlers,
            ..RewriteStrSettings::default()
        },
    )
    .map_err(|e| Error::Format(format!("failed to parse page HTML: {}", e)))?;

    let body_text = body_text.into_inner();

    let title = meta
        .get("og:title")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| collapse_whitespace(&title_text));
    let description = meta
        .get("og:description")
        .or_else(|| meta.get("description"))
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    let image = meta.get("og:image").map(|s| s.trim().to_string()).unwrap_or_default();
    let content = truncate_chars(&collapse_whitespace(&body_text), MAX_PAGE_CONTENT_CHARS);

    if title.is_empty() && content.is_empty() {
        return Err(Error::Validation(format!(
            "page at {} contained no extractable content",
            url
        )));
    }

    Ok(PageContent {
        title,
        description,
        image,
        content,
        url: url.to_string(),
    })
}

/// Collapse all runs of whitespace into single spaces and trim the ends.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max` characters on a character boundary.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_title_without_open_graph() {
        let html = "<html><head><title>Foo</title></head><body><p>Hello</p></body></html>";
        let page = extract_page_content(html, "https://example.com").unwrap();

        assert_eq!(page.title, "Foo");
        assert_eq!(page.description, "");
        assert_eq!(page.content, "Hello");
        assert_eq!(page.url, "https://example.com");
    }

    #[test]
    fn test_open_graph_tags_win_over_title() {
        let html = concat!(
            "<html><head><title>Fallback</title>",
            r#"<meta property="og:title" content="OG Title">"#,
            r#"<meta property="og:description" content="OG Desc">"#,
            r#"<meta property="og:image" content="https://example.com/og.png">"#,
            "</head><body><p>Body</p></body></html>"
        );
        let page = extract_page_content(html, "https://example.com").unwrap();

        assert_eq!(page.title, "OG Title");
        assert_eq!(page.description, "OG Desc");
        assert_eq!(page.image, "https://example.com/og.png");
    }

    #[test]
    fn test_plain_description_meta_is_a_fallback() {
        let html = concat!(
            "<html><head><title>T</title>",
            r#"<meta name="description" content="Plain desc">"#,
            "</head><body></body></html>"
        );
        let page = extract_page_content(html, "https://example.com").unwrap();
        assert_eq!(page.description, "Plain desc");
    }

    #[test]
    fn test_body_text_is_collapsed_and_bounded() {
        let mut body = String::new();
        for _ in 0..500 {
            body.push_str("<p>word   word\n\tword</p>");
        }
        let html = format!("<html><head><title>T</title></head><body>{}</body></html>", body);
        let page = extract_page_content(&html, "https://example.com").unwrap();

        assert!(!page.content.contains("  "));
        assert!(!page.content.contains('\n'));
        assert!(page.content.chars().count() <= MAX_PAGE_CONTENT_CHARS);
    }

    #[test]
    fn test_empty_page_is_a_validation_error() {
        let html = "<html><head></head><body><div>no content elements</div></body></html>";
        let err = extract_page_content(html, "https://example.com").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_invalid_url_is_a_validation_error() {
        assert!(matches!(validate_url("not a url"), Err(Error::Validation(_))));
        assert!(matches!(
            validate_url("ftp://example.com/file"),
            Err(Error::Validation(_))
        ));
        assert!(validate_url("https://example.com/post").is_ok());
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
    }
}
