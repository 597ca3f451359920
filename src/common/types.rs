use serde::{Deserialize, Serialize};

use crate::error::UnaffiliateError;

/// Common result type for unaffiliate operations
pub type UnaffiliateResult<T> = Result<T, UnaffiliateError>;

/// Platforms the cleaner knows about.
///
/// `YouTube` only ever marks the input stage; results report the platform of
/// the wrapped link instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    AliExpress,
    MercadoLivre,
    Amazon,
    Shopee,
    YouTube,
    Banggood,
    Other,
}

/// Body of an incoming cleaning request
#[derive(Debug, Clone, Deserialize)]
pub struct CleaningRequest {
    pub url: String,
}

/// The cleaned link handed back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningResult {
    pub url: String,
    pub was_youtube_redirect: bool,
    pub platform: Platform,
}

impl CleaningResult {
    pub fn new(url: String, was_youtube_redirect: bool, platform: Platform) -> Self {
        Self {
            url,
            was_youtube_redirect,
            platform,
        }
    }
}
