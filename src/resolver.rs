//! Maps user supplied video links to a canonical video identifier.
//!
//! Resolution never fails loudly: anything that is not a recognized link
//! shape simply yields `None`.

use std::fmt;

use url::Url;

const SHORT_LINK_HOST: &str = "youtu.be";
const VIDEO_HOST: &str = "youtube.com";
const WATCH_PATH: &str = "/watch";
const EMBED_PREFIXES: [&str; 2] = ["/embed/", "/v/"];

/// Opaque token naming a single video on the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch page for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts the video identifier from `raw`, or `None` when the input is not
/// a URL or not one of the known link shapes.
pub fn resolve_video_id(raw: &str) -> Option<VideoId> {
    let url = Url::parse(raw).ok()?;
    let host = url.host_str()?;
    let path = url.path();

    let id = if host == SHORT_LINK_HOST {
        path.strip_prefix('/').unwrap_or(path).to_string()
    } else if host.contains(VIDEO_HOST) {
        if path == WATCH_PATH {
            url.query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned())?
        } else if EMBED_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
            path.split('/').nth(2)?.to_string()
        } else {
            return None;
        }
    } else {
        return None;
    };

    if id.is_empty() {
        return None;
    }

    Some(VideoId(id))
}
