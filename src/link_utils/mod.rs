mod classify;
mod decode;
mod fetcher;
mod follow;
mod strip;
mod youtube;

pub use classify::{classify, is_supported_platform};
pub use decode::{decode_component, query_param};
pub use fetcher::{Fetcher, HttpFetcher};
pub use follow::{follow_aliexpress_redirect, follow_redirect, resolve_mercadolivre_social};
pub use strip::{
    clean_aliexpress_url, clean_amazon_url, clean_banggood_url, clean_url, CleanUrlType,
    ALIEXPRESS_PARAMS, BANGGOOD_PARAMS, MERCADOLIVRE_PARAMS, SHOPEE_PARAMS,
};
pub use youtube::extract_youtube_redirect;

#[cfg(test)]
pub(crate) use fetcher::stub::StubFetcher;
