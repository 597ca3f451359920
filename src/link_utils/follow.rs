use std::sync::OnceLock;

use log::{debug, warn};
use regex::Regex;
use url::Url;

use super::decode::query_param;
use super::fetcher::Fetcher;
use super::strip::clean_aliexpress_url;

const ALIEXPRESS_SHARE_MARKER: &str = "star.aliexpress.com/share/share.htm";
const SOCIAL_PAGE_HEADERS: &[(&str, &str)] = &[
    ("Accept", "text/html"),
    ("Accept-Language", "pt-BR,pt;q=0.9"),
];

/// One hop without redirect following. A missing `Location` means the link
/// is already canonical; a transport failure yields `None`.
pub async fn follow_redirect<F: Fetcher + ?Sized>(fetcher: &F, url: &str) -> Option<String> {
    match fetcher.resolve_location(url).await {
        Ok(Some(location)) => {
            debug!("{} redirects to {}", url, location);
            Some(location)
        }
        Ok(None) => Some(url.to_string()),
        Err(e) => {
            warn!("Could not follow redirect for {}: {:#}", url, e);
            None
        }
    }
}

/// Like [`follow_redirect`], but also unwraps AliExpress share pages, whose
/// real target sits in the `redirectUrl` parameter.
pub async fn follow_aliexpress_redirect<F: Fetcher + ?Sized>(
    fetcher: &F,
    url: &str,
) -> Option<String> {
    let location = match fetcher.resolve_location(url).await {
        Ok(location) => location,
        Err(e) => {
            warn!("Could not follow AliExpress redirect for {}: {:#}", url, e);
            return None;
        }
    };

    if let Some(location) = location {
        debug!("{} redirects to {}", url, location);

        if let Some(target) = unwrap_share_link(&location) {
            return Some(target);
        }
        if location.contains("aliexpress.com") {
            return Some(clean_aliexpress_url(&location));
        }
        return Some(location);
    }

    Some(unwrap_share_link(url).unwrap_or_else(|| url.to_string()))
}

fn unwrap_share_link(url: &str) -> Option<String> {
    if !url.contains(ALIEXPRESS_SHARE_MARKER) {
        return None;
    }

    let target = query_param(url, "redirectUrl")?;
    debug!("Unwrapped AliExpress share link to {}", target);
    Some(clean_aliexpress_url(&target))
}

/// Pulls the product link out of a MercadoLivre `/social/` share page.
pub async fn resolve_mercadolivre_social<F: Fetcher + ?Sized>(
    fetcher: &F,
    url: &str,
) -> Option<String> {
    let html = match fetcher.fetch_page(url, SOCIAL_PAGE_HEADERS).await {
        Ok(html) => html,
        Err(e) => {
            warn!("Could not fetch MercadoLivre social page {}: {:#}", url, e);
            return None;
        }
    };

    let product = extract_product_link(&html, url);
    if product.is_none() {
        debug!("No product link found on {}", url);
    }
    product
}

fn product_link_regex() -> &'static Regex {
    static PRODUCT_RE: OnceLock<Regex> = OnceLock::new();
    PRODUCT_RE.get_or_init(|| {
        Regex::new(r#"<a class="poly-component__title" href="([^"]+)""#)
            .expect("valid product link regex")
    })
}

fn extract_product_link(html: &str, page_url: &str) -> Option<String> {
    let href = product_link_regex().captures(html)?.get(1)?.as_str();
    let href = html_escape::decode_html_entities(href);
    let href = href.split('#').next().unwrap_or_default();

    if href.is_empty() {
        return None;
    }

    match Url::parse(href) {
        Ok(absolute) => Some(absolute.into()),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(page_url)
            .and_then(|base| base.join(href))
            .ok()
            .map(String::from),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link_utils::fetcher::stub::StubFetcher;

    #[tokio::test]
    async fn test_follow_redirect_uses_location() {
        let fetcher = StubFetcher::new()
            .with_location("https://amzn.to/abc", Some("https://www.amazon.com/dp/X?tag=t"));

        assert_eq!(
            follow_redirect(&fetcher, "https://amzn.to/abc").await.as_deref(),
            Some("https://www.amazon.com/dp/X?tag=t")
        );
    }

    #[tokio::test]
    async fn test_follow_redirect_without_location_is_canonical() {
        let fetcher = StubFetcher::new().with_location("https://shopee.com.br/p", None);

        assert_eq!(
            follow_redirect(&fetcher, "https://shopee.com.br/p").await.as_deref(),
            Some("https://shopee.com.br/p")
        );
    }

    #[tokio::test]
    async fn test_follow_redirect_transport_failure() {
        let fetcher = StubFetcher::new();
        assert_eq!(follow_redirect(&fetcher, "https://shopee.com.br/p").await, None);
    }

    #[tokio::test]
    async fn test_follow_aliexpress_share_location() {
        let share = "https://star.aliexpress.com/share/share.htm?platform=AE&redirectUrl=https%3A%2F%2Fpt.aliexpress.com%2Fitem%2F1005.html%3Fspm%3Dx";
        let fetcher =
            StubFetcher::new().with_location("https://s.click.aliexpress.com/e/_abc", Some(share));

        assert_eq!(
            follow_aliexpress_redirect(&fetcher, "https://s.click.aliexpress.com/e/_abc")
                .await
                .as_deref(),
            Some("https://pt.aliexpress.com/item/1005.html")
        );
    }

    #[tokio::test]
    async fn test_follow_aliexpress_plain_location_drops_query() {
        let fetcher = StubFetcher::new().with_location(
            "https://s.click.aliexpress.com/e/_abc",
            Some("https://pt.aliexpress.com/item/1005.html?pdp_ext_f=1&spm=2"),
        );

        assert_eq!(
            follow_aliexpress_redirect(&fetcher, "https://s.click.aliexpress.com/e/_abc")
                .await
                .as_deref(),
            Some("https://pt.aliexpress.com/item/1005.html")
        );
    }

    #[tokio::test]
    async fn test_follow_aliexpress_foreign_location_untouched() {
        let fetcher = StubFetcher::new().with_location(
            "https://s.click.aliexpress.com/e/_abc",
            Some("https://login.example.com/?next=1"),
        );

        assert_eq!(
            follow_aliexpress_redirect(&fetcher, "https://s.click.aliexpress.com/e/_abc")
                .await
                .as_deref(),
            Some("https://login.example.com/?next=1")
        );
    }

    #[tokio::test]
    async fn test_follow_aliexpress_request_url_is_share_link() {
        let share = "https://star.aliexpress.com/share/share.htm?redirectUrl=https%253A%252F%252Fwww.aliexpress.com%252Fitem%252F42.html%253Fsrc%253Dx";
        let fetcher = StubFetcher::new().with_location(share, None);

        assert_eq!(
            follow_aliexpress_redirect(&fetcher, share).await.as_deref(),
            Some("https://www.aliexpress.com/item/42.html")
        );
    }

    #[tokio::test]
    async fn test_follow_aliexpress_transport_failure() {
        let fetcher = StubFetcher::new();
        assert_eq!(
            follow_aliexpress_redirect(&fetcher, "https://s.click.aliexpress.com/e/_x").await,
            None
        );
    }

    #[tokio::test]
    async fn test_resolve_mercadolivre_social() {
        let html = r#"<div><a class="poly-component__title" href="https://produto.mercadolivre.com.br/MLB-1-item-_JM?matt_tool=9&amp;from=share#polycard_client=x">Item</a></div>"#;
        let social = "https://www.mercadolivre.com.br/social/loja?matt_tool=9";
        let fetcher = StubFetcher::new().with_page(social, html);

        assert_eq!(
            resolve_mercadolivre_social(&fetcher, social).await.as_deref(),
            Some("https://produto.mercadolivre.com.br/MLB-1-item-_JM?matt_tool=9&from=share")
        );
    }

    #[tokio::test]
    async fn test_resolve_mercadolivre_social_no_match() {
        let social = "https://www.mercadolivre.com.br/social/loja";
        let fetcher = StubFetcher::new().with_page(social, "<html><body>empty</body></html>");

        assert_eq!(resolve_mercadolivre_social(&fetcher, social).await, None);
    }

    #[test]
    fn test_extract_product_link_relative_href() {
        let html = r#"<a class="poly-component__title" href="/MLB-77-produto-_JM#x">"#;
        assert_eq!(
            extract_product_link(html, "https://www.mercadolivre.com.br/social/loja").as_deref(),
            Some("https://www.mercadolivre.com.br/MLB-77-produto-_JM")
        );
    }

    #[test]
    fn test_extract_product_link_only_fragment() {
        let html = r##"<a class="poly-component__title" href="#top">"##;
        assert_eq!(
            extract_product_link(html, "https://www.mercadolivre.com.br/social/loja"),
            None
        );
    }
}
