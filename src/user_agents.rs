//! User-agent classification helpers

/// Substrings that mark an automated agent
const BOT_MARKERS: &[&str] = &["bot", "crawler", "spider"];

/// Whether a `User-Agent` header value looks like an automated agent
/// rather than a human-driven browser.
///
/// A case-insensitive substring scan; needs no API call and no credits.
pub fn is_bot(user_agent: &str) -> bool {
    let lowered = user_agent.to_ascii_lowercase();
    BOT_MARKERS.iter().any(|marker| lowered.contains(marker))
}
