//! Markdown → HTML conversion for block import.
//!
//! GitHub-flavoured extensions are enabled. Raw HTML in the source is
//! dropped and unsafe link targets are blanked, so imported content only
//! carries markup produced by the converter itself.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

pub trait MarkdownConverter: Send + Sync {
    fn convert(&self, markdown: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CommonMarkConverter;

impl CommonMarkConverter {
    pub fn new() -> Self {
        Self
    }

    fn options() -> Options {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options
    }
}

const UNSAFE_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "file:"];
const SAFE_DATA_PREFIXES: [&str; 4] = [
    "data:image/png",
    "data:image/gif",
    "data:image/jpeg",
    "data:image/webp",
];

/// Script-capable or local-file URL
pub fn is_unsafe_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    if UNSAFE_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return true;
    }
    lower.starts_with("data:") && !SAFE_DATA_PREFIXES.iter().any(|p| lower.starts_with(p))
}

fn neutralize(url: CowStr<'_>) -> CowStr<'_> {
    if is_unsafe_url(&url) {
        CowStr::Borrowed("")
    } else {
        url
    }
}

impl MarkdownConverter for CommonMarkConverter {
    fn convert(&self, markdown: &str) -> String {
        let events = Parser::new_ext(markdown, Self::options()).filter_map(|event| match event {
            Event::Html(_) | Event::InlineHtml(_) => None,
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => Some(Event::Start(Tag::Link {
                link_type,
                dest_url: neutralize(dest_url),
                title,
                id,
            })),
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => Some(Event::Start(Tag::Image {
                link_type,
                dest_url: neutralize(dest_url),
                title,
                id,
            })),
            other => Some(other),
        });

        let mut output = String::new();
        html::push_html(&mut output, events);
        output
    }
}
