//! Shareable verification links.
//!
//! A share link is any URL whose query component carries a single `hash`
//! parameter holding a fingerprint. Parsing accepts any host and path
//! prefix; only the fingerprint parameter matters.

use url::Url;

use docv_types::Fingerprint;

use crate::error::LinkError;

/// Query parameter carrying the fingerprint.
pub const FINGERPRINT_PARAM: &str = "hash";

/// Build the canonical verification URL for a fingerprint.
///
/// Any `hash` parameter already present on the base URL is dropped so the
/// result always carries exactly one.
pub fn build(base_url: &str, fingerprint: &Fingerprint) -> Result<String, LinkError> {
    let mut url = Url::parse(base_url).map_err(|e| LinkError::InvalidUrl(e.to_string()))?;

    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != FINGERPRINT_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &retained {
            pairs.append_pair(key, value);
        }
        pairs.append_pair(FINGERPRINT_PARAM, &fingerprint.to_hex());
    }

    Ok(url.into())
}

/// Extract the fingerprint from a share link, regardless of host or path.
pub fn parse(link: &str) -> Result<Fingerprint, LinkError> {
    let url = Url::parse(link).map_err(|e| LinkError::InvalidUrl(e.to_string()))?;
    let value = url
        .query_pairs()
        .find(|(key, _)| key == FINGERPRINT_PARAM)
        .map(|(_, value)| value.into_owned())
        .ok_or(LinkError::MissingFingerprint)?;
    Ok(Fingerprint::from_hex(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp() -> Fingerprint {
        Fingerprint::from_digest([0x42; 32])
    }

    #[test]
    fn build_appends_the_single_hash_parameter() {
        let link = build("https://docverify.dev/verify", &fp()).unwrap();
        assert_eq!(
            link,
            format!("https://docverify.dev/verify?hash={}", fp().to_hex())
        );
    }

    #[test]
    fn roundtrip_preserves_the_fingerprint() {
        let link = build("http://localhost:3000/verify", &fp()).unwrap();
        assert_eq!(parse(&link).unwrap(), fp());
    }

    #[test]
    fn parse_accepts_any_host_and_path() {
        let hex = fp().to_hex();
        for link in [
            format!("http://44.211.78.74:3000/manualverify?hash={hex}"),
            format!("https://example.org/deep/path/verify?hash={hex}"),
            format!("https://example.org/?other=1&hash={hex}"),
        ] {
            assert_eq!(parse(&link).unwrap(), fp());
        }
    }

    #[test]
    fn build_replaces_a_stale_hash_parameter() {
        let stale = format!("https://docverify.dev/verify?hash={}", "0".repeat(64));
        let link = build(&stale, &fp()).unwrap();
        assert_eq!(parse(&link).unwrap(), fp());
        assert_eq!(link.matches("hash=").count(), 1);
    }

    #[test]
    fn parse_rejects_links_without_a_fingerprint() {
        assert_eq!(
            parse("https://docverify.dev/verify").unwrap_err(),
            LinkError::MissingFingerprint
        );
    }

    #[test]
    fn parse_rejects_malformed_fingerprints() {
        assert!(matches!(
            parse("https://docverify.dev/verify?hash=abc123").unwrap_err(),
            LinkError::InvalidFingerprint(_)
        ));
    }

    #[test]
    fn build_rejects_invalid_base_urls() {
        assert!(matches!(
            build("not a url", &fp()).unwrap_err(),
            LinkError::InvalidUrl(_)
        ));
    }
}
