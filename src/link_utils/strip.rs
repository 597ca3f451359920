use url::form_urlencoded::Serializer;
use url::Url;

pub const ALIEXPRESS_PARAMS: &[&str] = &[
    "spm",
    "srcSns",
    "businessType",
    "templateId",
    "currency",
    "language",
    "src",
    "pdp_npi",
    "algo_pvid",
    "algo_exp_id",
    "sku_id",
    "sourceType",
    "spreadType",
    "bizType",
    "social_params",
];

pub const SHOPEE_PARAMS: &[&str] = &[
    "uls_trackid",
    "utm_campaign",
    "utm_content",
    "utm_medium",
    "utm_source",
    "utm_term",
];

pub const MERCADOLIVRE_PARAMS: &[&str] = &["ref", "matt_tool", "forceInApp", "from"];

pub const BANGGOOD_PARAMS: &[&str] = &["cur_warehouse", "ID", "rmmds", "p", "custlinkid"];

/// Link families handled by the generic [`clean_url`] cleaner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanUrlType {
    AliExpress,
    MercadoLivre,
    Shopee,
}

/// Removes the tracking parameters of `kind` from an absolute URL.
///
/// Unlike the other cleaners this one does not tolerate relative or garbage
/// input; callers only hand it links that already resolved.
pub fn clean_url(url: &str, kind: CleanUrlType) -> Result<String, url::ParseError> {
    let mut parsed = Url::parse(url)?;

    match kind {
        CleanUrlType::AliExpress => {
            remove_params(&mut parsed, ALIEXPRESS_PARAMS);
            normalize_aliexpress_path(&mut parsed);
        }
        CleanUrlType::Shopee => {
            remove_params(&mut parsed, SHOPEE_PARAMS);
        }
        CleanUrlType::MercadoLivre => {
            remove_params(&mut parsed, MERCADOLIVRE_PARAMS);
        }
    }

    Ok(parsed.into())
}

/// Keeps scheme, host and path of an AliExpress page and drops everything
/// else. Non-AliExpress and unparseable input is returned as is.
pub fn clean_aliexpress_url(url: &str) -> String {
    let mut parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return url.to_string(),
    };

    match parsed.host_str() {
        Some(host) if host.contains("aliexpress.com") => {}
        _ => return url.to_string(),
    }

    parsed.set_query(None);
    parsed.set_fragment(None);
    parsed.into()
}

/// Reduces an Amazon product link to `/dp/<id>` and always drops the query.
pub fn clean_amazon_url(url: &str) -> String {
    let mut parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return url.to_string(),
    };

    let path = parsed.path().to_string();
    if let Some(index) = path.find("/dp/") {
        let product_id = path[index + 4..].split('/').next().unwrap_or_default();
        parsed.set_path(&format!("/dp/{}", product_id));
    }

    parsed.set_query(None);
    parsed.into()
}

pub fn clean_banggood_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            remove_params(&mut parsed, BANGGOOD_PARAMS);
            parsed.into()
        }
        Err(_) => url.to_string(),
    }
}

/// `/item/1005.html_x.y` style paths collapse to `/item/1005.html`.
fn normalize_aliexpress_path(url: &mut Url) {
    let path = url.path().to_string();
    if let Some((stem, _)) = path.split_once('.') {
        url.set_path(&format!("{}.html", stem));
    }
}

/// Drops every query pair whose key is in `names` and returns how many were
/// removed. The query is only rewritten when something was removed, and
/// surviving pairs keep their order.
fn remove_params(url: &mut Url, names: &[&str]) -> usize {
    let pairs: Vec<(String, String)> = match url.query() {
        Some(_) => url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect(),
        None => return 0,
    };

    let total = pairs.len();
    let kept: Vec<(String, String)> = pairs
        .into_iter()
        .filter(|(key, _)| !names.contains(&key.as_str()))
        .collect();
    let removed = total - kept.len();

    if removed == 0 {
        return 0;
    }

    if kept.is_empty() {
        url.set_query(None);
    } else {
        let mut serializer = Serializer::new(String::new());
        for (key, value) in &kept {
            serializer.append_pair(key, value);
        }
        let query = serializer.finish();
        url.set_query(Some(&query));
    }

    removed
}
