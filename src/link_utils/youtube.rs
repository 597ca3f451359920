use log::debug;
use url::Url;

use super::decode::query_param;

const YOUTUBE_HOST: &str = "www.youtube.com";
const REDIRECT_PATH: &str = "/redirect";

/// Returns the link wrapped by a `www.youtube.com/redirect?q=...` URL, or
/// `None` when the input is anything else (including unparseable text).
pub fn extract_youtube_redirect(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;

    if parsed.host_str() != Some(YOUTUBE_HOST) || parsed.path() != REDIRECT_PATH {
        return None;
    }

    let decoded = query_param(url, "q")?;
    debug!("Unwrapped YouTube redirect to {}", decoded);
    Some(decoded)
}
