//! HTML helpers for the article normalizer: tag stripping for snippets and
//! image discovery in page metadata or embedded feed content.

use once_cell::sync::Lazy;
use regex::Regex;

static OG_IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<meta[^>]+property=["']og:image["'][^>]+content=["']([^"']+)["']"#).unwrap()
});

static OG_IMAGE_REV: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<meta[^>]+content=["']([^"']+)["'][^>]+property=["']og:image["']"#).unwrap()
});

static TWITTER_IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<meta[^>]+name=["']twitter:image["'][^>]+content=["']([^"']+)["']"#).unwrap()
});

static TWITTER_IMAGE_REV: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<meta[^>]+content=["']([^"']+)["'][^>]+name=["']twitter:image["']"#).unwrap()
});

static IMG_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<img[^>]+src=["']([^"']+)["']"#).unwrap());

static FIGURE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<figure[^>]*>(.*?)</figure>").unwrap());

/// Strip HTML down to plain text: drops script/style blocks wholesale,
/// removes remaining tags, decodes the common entities, and collapses
/// whitespace.
pub fn strip_html(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    // Remove <script>...</script> and <style>...</style> blocks (case-insensitive)
    let mut buf = input.to_string();
    for tag in ["script", "style"] {
        let open = format!("<{}", tag);
        let close = format!("</{}>", tag);
        loop {
            let lower = buf.to_lowercase();
            if let Some(start) = lower.find(&open) {
                if let Some(end_rel) = lower[start..].find(&close) {
                    let end = start + end_rel + close.len();
                    buf.replace_range(start..end, "");
                    continue;
                } else {
                    // no closing tag; drop from start to end
                    buf.replace_range(start..buf.len(), "");
                }
            }
            break;
        }
    }

    // Strip remaining tags by skipping characters between '<' and '>'
    let mut out = String::with_capacity(buf.len());
    let mut in_tag = false;
    for ch in buf.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }

    out.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate to a character limit, marking the cut with an ellipsis.
/// Text within the limit is returned unchanged.
pub fn truncate_snippet(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}...", truncated.trim_end())
}

/// Pull a social-preview image URL out of an article page: `og:image`
/// first, `twitter:image` as the fallback. Handles either attribute order.
pub fn extract_meta_image(html: &str) -> Option<String> {
    for pattern in [&*OG_IMAGE, &*OG_IMAGE_REV, &*TWITTER_IMAGE, &*TWITTER_IMAGE_REV] {
        if let Some(caps) = pattern.captures(html) {
            if let Some(url) = caps.get(1) {
                return Some(url.as_str().to_string());
            }
        }
    }
    None
}

/// Find a thumbnail inside embedded feed content. First pass takes the
/// first `<img>` whose host is in `trusted_hosts`; if none qualifies, the
/// search narrows to `<img>` tags nested in `<figure>` blocks.
pub fn extract_content_image(html: &str, trusted_hosts: &[String]) -> Option<String> {
    for caps in IMG_SRC.captures_iter(html) {
        if let Some(src) = caps.get(1) {
            if is_trusted_host(src.as_str(), trusted_hosts) {
                return Some(src.as_str().to_string());
            }
        }
    }

    for figure in FIGURE_BLOCK.captures_iter(html) {
        let inner = match figure.get(1) {
            Some(m) => m.as_str(),
            None => continue,
        };
        if let Some(caps) = IMG_SRC.captures(inner) {
            if let Some(src) = caps.get(1) {
                return Some(src.as_str().to_string());
            }
        }
    }

    None
}

/// Host component of an absolute URL, without any userinfo/port handling
/// beyond what feed image URLs actually contain.
fn url_host(url: &str) -> Option<&str> {
    let rest = url.split_once("://")?.1;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let host = &rest[..end];
    host.split(':').next().filter(|h| !h.is_empty())
}

fn is_trusted_host(url: &str, trusted_hosts: &[String]) -> bool {
    match url_host(url) {
        Some(host) => trusted_hosts.iter().any(|t| t == host),
        None => false,
    }
}
