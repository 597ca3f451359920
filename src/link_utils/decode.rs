use percent_encoding::percent_decode_str;
use url::Url;

/// Percent-decodes one more layer of a value that already came out of a
/// query string. Wrapped links are often encoded twice.
pub fn decode_component(value: &str) -> Option<String> {
    percent_decode_str(value)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// First value of `name` in the query of `url`, decoded.
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let value = parsed
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())?;

    if value.is_empty() {
        None
    } else {
        decode_component(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_component_double_encoded() {
        assert_eq!(
            decode_component("https%3A%2F%2Fa.com%2Fx").as_deref(),
            Some("https://a.com/x")
        );
        assert_eq!(
            decode_component("https://a.com/x").as_deref(),
            Some("https://a.com/x")
        );
    }

    #[test]
    fn test_decode_component_invalid_utf8() {
        assert_eq!(decode_component("%FF%FE"), None);
    }

    #[test]
    fn test_query_param() {
        let url = "https://star.aliexpress.com/share/share.htm?platform=AE&redirectUrl=https%253A%252F%252Fwww.aliexpress.com%252Fitem%252F1.html";
        assert_eq!(
            query_param(url, "redirectUrl").as_deref(),
            Some("https://www.aliexpress.com/item/1.html")
        );
        assert_eq!(query_param(url, "missing"), None);
        assert_eq!(query_param("::::", "redirectUrl"), None);
    }
}
