use log::debug;

use crate::common::Platform;

/// A link has to contain one of these before it is dispatched at all.
const SUPPORTED_FRAGMENTS: &[&str] = &[
    "amazon.",
    "amzn.",
    "aliexpress.com",
    "mercadolivre.com",
    "mercadolibre.com",
    "shopee.com.br",
    "banggood.com",
];

/// Dispatch order. The first platform with a matching fragment wins.
const DISPATCH_RULES: &[(Platform, &[&str])] = &[
    (Platform::Shopee, &["shopee.com.br"]),
    (Platform::Amazon, &["amazon.", "amzn."]),
    (Platform::AliExpress, &["aliexpress.com"]),
    (Platform::MercadoLivre, &["mercado"]),
    (Platform::Banggood, &["banggood.com"]),
];

/// Matching is done on the raw string so share-link subdomains and app deep
/// links are picked up without parsing.
pub fn is_supported_platform(url: &str) -> bool {
    SUPPORTED_FRAGMENTS
        .iter()
        .any(|fragment| url.contains(fragment))
}

pub fn classify(url: &str) -> Platform {
    if !is_supported_platform(url) {
        debug!("No supported platform found in {}", url);
        return Platform::Other;
    }

    let platform = DISPATCH_RULES
        .iter()
        .find(|(_, fragments)| fragments.iter().any(|fragment| url.contains(fragment)))
        .map(|(platform, _)| *platform)
        .unwrap_or(Platform::Other);

    debug!("Classified {} as {:?}", url, platform);
    platform
}
