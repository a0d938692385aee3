use std::fmt::Display;

use crate::error::{Result, TransportError};

/// Appends `key=value` pairs to `url`, using `&` if it already carries a
/// query string and `?` otherwise.
///
/// Values are written verbatim: nothing is percent-encoded. Callers pass
/// numeric bounds, which never need it; use `add_params_encoded` for
/// arbitrary text. An empty parameter list leaves `url` untouched.
pub fn add_params<I, K, V>(url: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Display,
{
    let query = params
        .into_iter()
        .map(|(k, v)| format!("{}={}", k.as_ref(), v))
        .collect::<Vec<_>>()
        .join("&");
    if query.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}

/// Like `add_params`, but form-encodes keys and values. `url` must be
/// absolute.
pub fn add_params_encoded<I, K, V>(url: &str, params: I) -> Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Display,
{
    let mut parsed = reqwest::Url::parse(url).map_err(|e| TransportError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    {
        let mut pairs = parsed.query_pairs_mut();
        for (k, v) in params {
            pairs.append_pair(k.as_ref(), &v.to_string());
        }
    }
    Ok(parsed.into())
}

#[cfg(test)]
mod tests {
    use super::{add_params, add_params_encoded};
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_query_string_when_absent() {
        assert_eq!(add_params("x", [("a", 1), ("b", 2)]), "x?a=1&b=2");
    }

    #[test]
    fn extends_existing_query_string() {
        assert_eq!(add_params("x?c=3", [("a", 1)]), "x?c=3&a=1");
    }

    #[test]
    fn values_are_not_encoded() {
        assert_eq!(
            add_params("http://h/p", [("q", "a b&c")]),
            "http://h/p?q=a b&c"
        );
    }

    #[test]
    fn empty_params_leave_url_alone() {
        let none: [(&str, i32); 0] = [];
        assert_eq!(add_params("x", none), "x");
    }

    #[test]
    fn float_bounds_render_plainly() {
        assert_eq!(
            add_params("u", [("northLatitude", 42.5), ("westLongitude", -71.0)]),
            "u?northLatitude=42.5&westLongitude=-71"
        );
    }

    #[test]
    fn encoded_variant_escapes_reserved_characters() {
        assert_eq!(
            add_params_encoded("http://h/x?c=3", [("q", "a b&c=d")]).unwrap(),
            "http://h/x?c=3&q=a+b%26c%3Dd"
        );
    }

    #[test]
    fn encoded_values_survive_any_reserved_text() {
        let samples = ["plain", "a&b", "k=v", "50%", "#frag", "?x", "ü ñ", "+/"];
        for sample in samples {
            let url = add_params_encoded("http://h/x", [("v", sample)]).unwrap();
            let parsed = reqwest::Url::parse(&url).unwrap();
            let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
            assert_eq!(pairs, vec![("v".to_string(), sample.to_string())], "{url}");
        }
    }

    #[test]
    fn encoded_variant_rejects_relative_urls() {
        assert!(add_params_encoded("x", [("a", 1)]).is_err());
    }
}
