use log::{debug, info};

use crate::common::constants::MAX_REQUEST_SIZE;
use crate::common::{CleaningRequest, CleaningResult, Platform, UnaffiliateResult};
use crate::error::UnaffiliateError;
use crate::link_utils::{classify, extract_youtube_redirect, Fetcher};

/// Runs one cleaning request end to end: body guard, YouTube unwrap,
/// classification, redirect resolution and stripping.
pub struct Unaffiliator<F> {
    fetcher: F,
    max_request_size: usize,
}

impl<F: Fetcher> Unaffiliator<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            max_request_size: MAX_REQUEST_SIZE,
        }
    }

    pub fn with_max_request_size(mut self, max_request_size: usize) -> Self {
        self.max_request_size = max_request_size;
        self
    }

    pub fn max_request_size(&self) -> usize {
        self.max_request_size
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Handles a raw `{ "url": ... }` request body.
    pub async fn handle(&self, body: &[u8]) -> UnaffiliateResult<CleaningResult> {
        if body.len() > self.max_request_size {
            debug!("Rejecting body of {} bytes", body.len());
            return Err(UnaffiliateError::BodyTooLarge {
                limit: self.max_request_size,
            });
        }

        let request: CleaningRequest = serde_json::from_slice(body)?;
        self.clean(&request.url).await
    }

    /// Cleans a single link. No size guard is applied here.
    pub async fn clean(&self, url: &str) -> UnaffiliateResult<CleaningResult> {
        let youtube_target = extract_youtube_redirect(url);
        let was_youtube_redirect = youtube_target.is_some();
        let target = youtube_target.unwrap_or_else(|| url.to_string());

        let platform = classify(&target);
        if platform == Platform::Other {
            debug!("Passing {} through unchanged", target);
            return Ok(CleaningResult::new(target, was_youtube_redirect, platform));
        }

        let resolved = platform
            .resolve(&self.fetcher, &target)
            .await
            .ok_or(UnaffiliateError::Unresolved(platform))?;
        debug!("Resolved {} to {}", target, resolved);

        let cleaned = platform.strip(&resolved)?;
        info!("Cleaned {} link: {}", platform.display_name(), cleaned);

        Ok(CleaningResult::new(cleaned, was_youtube_redirect, platform))
    }
}
