use blockwright_common::{Block, BlockData};
use serde_json::Value;
use tracing::debug;

use super::{BlockStrategy, InlineMarkup};

/// Video embeds. Data preparation derives `embedUrl` and `provider` from the
/// user-entered `url` for YouTube and Vimeo links.
pub struct VideoStrategy {
    markup: InlineMarkup,
}

impl VideoStrategy {
    pub fn new(markup: InlineMarkup) -> Self {
        Self { markup }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub provider: &'static str,
    pub embed_url: String,
}

/// Resolve an embeddable player URL. Unknown providers and unparseable ids
/// yield `None`.
pub fn resolve_embed(url: &str) -> Option<Embed> {
    if url.contains("youtube.com") || url.contains("youtu.be") {
        youtube_id(url).map(|id| Embed {
            provider: "youtube",
            embed_url: format!("https://www.youtube.com/embed/{id}"),
        })
    } else if url.contains("vimeo.com") {
        vimeo_id(url).map(|id| Embed {
            provider: "vimeo",
            embed_url: format!("https://player.vimeo.com/video/{id}"),
        })
    } else {
        None
    }
}

/// Text after the last `v=` up to `&`, else after the last `youtu.be/` up to `?`.
/// The id format itself is not checked.
fn youtube_id(url: &str) -> Option<&str> {
    let id = if let Some(pos) = url.rfind("v=") {
        url[pos + 2..].split('&').next()
    } else if let Some(pos) = url.rfind("youtu.be/") {
        url[pos + "youtu.be/".len()..].split('?').next()
    } else {
        None
    };
    id.filter(|id| !id.is_empty())
}

/// Last path segment, digits only
fn vimeo_id(url: &str) -> Option<&str> {
    url_path(url)
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
}

/// Path component of a URL (without query or fragment)
fn url_path(url: &str) -> &str {
    let without_scheme = match url.find("://") {
        Some(pos) => &url[pos + 3..],
        None => return url.split(['?', '#']).next().unwrap_or(url),
    };
    let without_query = without_scheme
        .split(['?', '#'])
        .next()
        .unwrap_or(without_scheme);
    match without_query.find('/') {
        Some(pos) => &without_query[pos..],
        None => "",
    }
}

impl BlockStrategy for VideoStrategy {
    fn name(&self) -> &'static str {
        "video"
    }

    fn supports(&self, block: &Block) -> bool {
        block.block_type == "video"
    }

    fn prepare_data(&self, mut data: BlockData) -> BlockData {
        let Some(embed) = data
            .get("url")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(resolve_embed)
        else {
            return data;
        };

        match embed {
            Some(embed) => {
                debug!(provider = embed.provider, embed_url = %embed.embed_url, "Resolved video embed");
                data.insert("provider".to_string(), Value::String(embed.provider.to_string()));
                data.insert("embedUrl".to_string(), Value::String(embed.embed_url));
            }
            None => debug!("Video URL not embeddable"),
        }
        data
    }

    fn render(&self, block: &Block) -> String {
        self.markup.render(block)
    }
}
