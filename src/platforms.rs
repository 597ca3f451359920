//! Each supported platform pairs one redirect follower with one stripper.
//! The classifier picks the variant once; nothing else branches on platform.

use log::debug;

use crate::common::Platform;
use crate::link_utils::{
    clean_amazon_url, clean_banggood_url, clean_url, follow_aliexpress_redirect, follow_redirect,
    resolve_mercadolivre_social, CleanUrlType, Fetcher,
};

impl Platform {
    /// Name used in user-facing messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::AliExpress => "AliExpress",
            Platform::MercadoLivre => "MercadoLivre",
            Platform::Amazon => "Amazon",
            Platform::Shopee => "Shopee",
            Platform::YouTube => "YouTube",
            Platform::Banggood => "Banggood",
            Platform::Other => "Other",
        }
    }

    /// Follows the platform's redirect chain to the page that gets cleaned.
    /// `None` means the upstream could not be reached.
    pub async fn resolve<F: Fetcher + ?Sized>(&self, fetcher: &F, url: &str) -> Option<String> {
        match self {
            Platform::AliExpress => follow_aliexpress_redirect(fetcher, url).await,
            Platform::MercadoLivre => {
                let resolved = follow_redirect(fetcher, url).await?;
                if !resolved.contains("/social/") {
                    return Some(resolved);
                }

                debug!("{} is a social share page, looking for the product", resolved);
                match resolve_mercadolivre_social(fetcher, &resolved).await {
                    Some(product) => Some(product),
                    None => Some(resolved),
                }
            }
            Platform::Amazon | Platform::Shopee | Platform::Banggood => {
                follow_redirect(fetcher, url).await
            }
            Platform::YouTube | Platform::Other => Some(url.to_string()),
        }
    }

    /// Removes the platform's tracking parameters from a resolved URL.
    pub fn strip(&self, url: &str) -> Result<String, url::ParseError> {
        match self {
            Platform::AliExpress => clean_url(url, CleanUrlType::AliExpress),
            Platform::MercadoLivre => clean_url(url, CleanUrlType::MercadoLivre),
            Platform::Shopee => clean_url(url, CleanUrlType::Shopee),
            Platform::Amazon => Ok(clean_amazon_url(url)),
            Platform::Banggood => Ok(clean_banggood_url(url)),
            Platform::YouTube | Platform::Other => Ok(url.to_string()),
        }
    }
}
