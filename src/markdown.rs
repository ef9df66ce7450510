//! Summary Markdown
//!
//! Renders the AI-generated summary to HTML. The text comes from an external
//! service: raw HTML is escaped and link/image targets are limited to
//! web and mail URLs.

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag};

/// Schemes a link or image may point at; relative URLs are always allowed
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

/// Whether a link destination is relative or uses an allowed scheme.
/// Browsers ignore whitespace and control characters inside a scheme.
fn is_safe_url(url: &str) -> bool {
    let cleaned: String = url.chars().filter(|c| !c.is_whitespace() && !c.is_control()).collect();
    let Some(colon) = cleaned.find(':') else {
        return true;
    };
    let scheme = &cleaned[..colon];
    if scheme.contains(['/', '?', '#']) {
        return true;
    }
    ALLOWED_SCHEMES.iter().any(|allowed| scheme.eq_ignore_ascii_case(allowed))
}

fn sanitize_url(url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&url) {
        url
    } else {
        log::warn!("[SUMMARY] Dropping unsafe link target");
        CowStr::Borrowed("#")
    }
}

/// Parse markdown into HTML safe to inject
pub fn render_summary(text: &str) -> String {
    let events = Parser::new_ext(text, get_options()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(CowStr::from(raw.into_string())),
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
            link_type,
            dest_url: sanitize_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => Event::Start(Tag::Image {
            link_type,
            dest_url: sanitize_url(dest_url),
            title,
            id,
        }),
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });
    let mut html_output = String::new();
    push_html(&mut html_output, events);
    html_output
}
