//! YouTube URL parsing and thumbnail templating.
//!
//! URLs are treated as untrusted input: only YouTube domains are accepted
//! and video IDs are strictly validated (11 chars, alphanumeric + `-_`).

/// Base URL for the public thumbnail host.
pub const THUMBNAIL_BASE_URL: &str = "https://img.youtube.com";

/// Thumbnail quality tiers, tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailQuality {
    /// Highest resolution, not available for every video
    Max,
    /// Standard high-quality tier, almost always present
    High,
}

impl ThumbnailQuality {
    pub fn file_name(&self) -> &'static str {
        match self {
            ThumbnailQuality::Max => "maxresdefault.jpg",
            ThumbnailQuality::High => "hqdefault.jpg",
        }
    }
}

/// Path component of a thumbnail URL for a video ID.
pub fn thumbnail_path(video_id: &str, quality: ThumbnailQuality) -> String {
    format!("/vi/{}/{}", video_id, quality.file_name())
}

/// Full thumbnail URL for a video ID.
pub fn thumbnail_url(video_id: &str, quality: ThumbnailQuality) -> String {
    format!("{}{}", THUMBNAIL_BASE_URL, thumbnail_path(video_id, quality))
}

/// Canonical watch URL for a video ID.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Extract the YouTube video ID from a URL.
///
/// Supported shapes, first match wins:
/// - https://youtube.com/watch?v=VIDEO_ID (also `&v=` in playlist URLs)
/// - https://youtu.be/VIDEO_ID
/// - https://youtube.com/embed/VIDEO_ID
/// - https://youtube.com/v/VIDEO_ID
/// - https://youtube.com/shorts/VIDEO_ID
///
/// Returns `None` for non-YouTube hosts, when no shape matches, or when the
/// captured segment is not exactly 11 valid characters.
pub fn extract_youtube_id(url: &str) -> Option<String> {
    let url = url.trim();

    if !is_youtube_domain(url) {
        return None;
    }

    let candidate = extract_from_watch_url(url)
        .or_else(|| extract_from_short_url(url))
        .or_else(|| extract_from_embed_url(url))
        .or_else(|| extract_from_v_url(url))
        .or_else(|| extract_from_shorts_url(url))?;

    if is_valid_youtube_id(&candidate) {
        Some(candidate)
    } else {
        None
    }
}

/// Check if URL is from a YouTube domain
fn is_youtube_domain(url: &str) -> bool {
    let url = url.to_ascii_lowercase();
    url.contains("youtube.com") || url.contains("youtu.be")
}

/// Extract ID from youtube.com/watch?v=VIDEO_ID or ...&v=VIDEO_ID
fn extract_from_watch_url(url: &str) -> Option<String> {
    let v_pos = url.find("?v=").or_else(|| url.find("&v="))?;
    extract_id_from_segment(&url[v_pos + 3..])
}

/// Extract ID from youtu.be/VIDEO_ID
fn extract_from_short_url(url: &str) -> Option<String> {
    let be_pos = url.find("youtu.be/")?;
    extract_id_from_segment(&url[be_pos + 9..])
}

/// Extract ID from youtube.com/embed/VIDEO_ID
fn extract_from_embed_url(url: &str) -> Option<String> {
    let embed_pos = url.find("/embed/")?;
    extract_id_from_segment(&url[embed_pos + 7..])
}

/// Extract ID from youtube.com/v/VIDEO_ID
fn extract_from_v_url(url: &str) -> Option<String> {
    let v_pos = url.find("/v/")?;
    extract_id_from_segment(&url[v_pos + 3..])
}

/// Extract ID from youtube.com/shorts/VIDEO_ID
fn extract_from_shorts_url(url: &str) -> Option<String> {
    let shorts_pos = url.find("/shorts/")?;
    extract_id_from_segment(&url[shorts_pos + 8..])
}

/// Take the candidate segment up to the next URL delimiter.
fn extract_id_from_segment(segment: &str) -> Option<String> {
    let delimiters = ['&', '#', '?', '/'];
    let end = segment
        .find(|c| delimiters.contains(&c))
        .unwrap_or(segment.len());
    let id = segment[..end].trim();
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// YouTube video IDs are exactly 11 characters: alphanumeric, `-`, `_`.
fn is_valid_youtube_id(id: &str) -> bool {
    id.len() == 11
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
