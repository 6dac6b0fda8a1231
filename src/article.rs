use chrono::Utc;
use feed_rs::model::Entry;
use serde::Serialize;

use crate::extract;

/// Title shown when a feed entry carries none.
pub const TITLE_PLACEHOLDER: &str = "Untitled";

/// Snippet shown when an entry has neither a summary nor usable content.
pub const SNIPPET_PLACEHOLDER: &str = "Read the full article on our blog.";

/// Character limit for snippets derived from embedded content.
pub const SNIPPET_MAX_CHARS: usize = 200;

/// One feed entry, normalized to the shape the site's article components
/// consume. Every field has a defined fallback so the shape is always
/// complete; built fresh per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedArticle {
    pub title: String,
    pub link: String,
    pub pub_date: String,
    pub content_snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub categories: Vec<String>,
}

/// Map one feed entry to a [`NormalizedArticle`]. The thumbnail starts out
/// empty; enrichment is a separate, strategy-dependent step.
///
/// Fallbacks, in field order: placeholder title, the canonical blog URL for
/// the link, "now" for the publish date, and the snippet chain
/// summary -> stripped content -> placeholder sentence.
pub fn normalize_entry(entry: &Entry, fallback_link: &str) -> NormalizedArticle {
    let title = entry
        .title
        .as_ref()
        .map(|t| t.content.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| TITLE_PLACEHOLDER.to_string());

    let link = entry
        .links
        .first()
        .map(|l| l.href.clone())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| fallback_link.to_string());

    let pub_date = entry
        .published
        .or(entry.updated)
        .unwrap_or_else(Utc::now)
        .to_rfc2822();

    let content_snippet = derive_snippet(entry);

    let categories = entry
        .categories
        .iter()
        .map(|c| c.label.clone().unwrap_or_else(|| c.term.clone()))
        .collect();

    NormalizedArticle {
        title,
        link,
        pub_date,
        content_snippet,
        thumbnail: None,
        categories,
    }
}

/// Ordered snippet fallback, first success wins: the feed's own summary
/// verbatim, else embedded content stripped to plain text and truncated,
/// else the fixed placeholder.
fn derive_snippet(entry: &Entry) -> String {
    if let Some(summary) = &entry.summary {
        let trimmed = summary.content.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    if let Some(body) = entry.content.as_ref().and_then(|c| c.body.as_deref()) {
        let text = extract::strip_html(body);
        if !text.is_empty() {
            return extract::truncate_snippet(&text, SNIPPET_MAX_CHARS);
        }
    }

    SNIPPET_PLACEHOLDER.to_string()
}

/// First embedded-content image acceptable as a thumbnail, if any.
pub fn embedded_thumbnail(entry: &Entry, trusted_hosts: &[String]) -> Option<String> {
    let body = entry.content.as_ref().and_then(|c| c.body.as_deref())?;
    extract::extract_content_image(body, trusted_hosts)
}
