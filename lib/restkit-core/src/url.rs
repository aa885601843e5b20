//! URL composition: appended query strings and `{name}` segment substitution.
//!
//! Both operations work on the URL as a string, before it is parsed and
//! resolved against a base URL. `apply_query` never merges with a query
//! string already present in the input; callers must not pass one.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::{Error, Result, ToNameValues};

/// Characters percent-encoded in query and segment components.
///
/// Everything except the RFC 3986 unreserved set. Space encodes as `%20`,
/// never `+`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a single URL component.
#[must_use]
pub fn encode(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Percent-decode a URL component, replacing invalid UTF-8 lossily.
#[must_use]
pub fn decode(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}

/// Append the projected `params` to `url` as a query string.
///
/// `None` returns the URL unchanged. Names and values are percent-encoded
/// independently; a pair with an absent value renders as a bare name.
///
/// # Errors
///
/// Returns an error if projection fails (see [`ToNameValues`]).
pub fn apply_query(url: &str, params: Option<&dyn ToNameValues>) -> Result<String> {
    let Some(params) = params else {
        return Ok(url.to_string());
    };

    let query = params
        .to_name_values()?
        .iter()
        .map(|nv| {
            let name = encode(&nv.name);
            match &nv.value {
                Some(value) => format!("{name}={}", encode(value)),
                None => name,
            }
        })
        .collect::<Vec<_>>()
        .join("&");

    Ok(format!("{url}?{query}"))
}

/// Replace every literal `{name}` in `url` with the percent-encoded value of
/// the matching projected parameter.
///
/// `None` returns the URL unchanged.
///
/// # Errors
///
/// Returns [`Error::MissingSegmentValue`] for a parameter with an absent
/// value; segments never tolerate omission.
pub fn apply_segments(url: &str, params: Option<&dyn ToNameValues>) -> Result<String> {
    let Some(params) = params else {
        return Ok(url.to_string());
    };

    let mut url = url.to_string();
    for nv in params.to_name_values()? {
        let Some(value) = &nv.value else {
            return Err(Error::MissingSegmentValue { name: nv.name });
        };
        url = url.replace(&format!("{{{}}}", nv.name), &encode(value));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use assert2::let_assert;

    use super::*;
    use crate::Params;

    #[test]
    fn encode_space_as_percent_20() {
        assert_eq!(encode("c d"), "c%20d");
        assert_eq!(encode("a+b"), "a%2Bb");
        assert_eq!(encode("safe-._~"), "safe-._~");
    }

    #[test]
    fn decode_roundtrip() {
        assert_eq!(decode("c%20d"), "c d");
        assert_eq!(decode(&encode("ü ber/weird?")), "ü ber/weird?");
    }

    #[test]
    fn apply_query_none_is_identity() {
        let url = apply_query("http://x", None).expect("compose");
        assert_eq!(url, "http://x");
    }

    #[test]
    fn apply_query_appends_pairs() {
        let params = Params::new().set("a", 1).set("b", "c d");
        let url = apply_query("http://x", Some(&params)).expect("compose");
        assert_eq!(url, "http://x?a=1&b=c%20d");
    }

    #[test]
    fn apply_query_bare_name_for_absent_value() {
        let params = Params::new().set("flag", None::<&str>).set("a", 1);
        let url = apply_query("http://x", Some(&params)).expect("compose");
        assert_eq!(url, "http://x?flag&a=1");
    }

    #[test]
    fn apply_query_rejects_empty_name() {
        let params = Params::new().set("", 1);
        let_assert!(Err(Error::EmptyParamName) = apply_query("http://x", Some(&params)));
    }

    #[test]
    fn apply_segments_none_is_identity() {
        let url = apply_segments("http://x/{id}", None).expect("compose");
        assert_eq!(url, "http://x/{id}");
    }

    #[test]
    fn apply_segments_substitutes_values() {
        let params = Params::new().set("id", 7);
        let url = apply_segments("http://x/{id}", Some(&params)).expect("compose");
        assert_eq!(url, "http://x/7");
    }

    #[test]
    fn apply_segments_encodes_values() {
        let params = Params::new().set("name", "a b");
        let url = apply_segments("http://x/{name}/tail", Some(&params)).expect("compose");
        assert_eq!(url, "http://x/a%20b/tail");
    }

    #[test]
    fn apply_segments_replaces_every_occurrence() {
        let params = Params::new().set("id", 3);
        let url = apply_segments("http://x/{id}/copy/{id}", Some(&params)).expect("compose");
        assert_eq!(url, "http://x/3/copy/3");
    }

    #[test]
    fn apply_segments_rejects_absent_value() {
        let params = Params::new().set("id", None::<u32>);
        let_assert!(
            Err(Error::MissingSegmentValue { name }) =
                apply_segments("http://x/{id}", Some(&params))
        );
        assert_eq!(name, "id");
    }
}
