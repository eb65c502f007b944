//! Purpose: Pull the compiler version token out of a free-text version banner.
//! Exports: `token_from_banner`, `resolve_banner`.
//! Role: Detection step feeding `resolve`, e.g. for "[MSC v.1928 64 bit (AMD64)]".
//! Invariants: Only the first `MSC v.` marker is considered.
//! Invariants: The token is exactly four ASCII digits not followed by another digit.
use crate::core::error::{Error, ErrorKind};
use crate::core::resolve::resolve;
use crate::core::table::LibraryName;

const MSC_MARKER: &str = "MSC v.";
const TOKEN_LEN: usize = 4;

pub fn token_from_banner(banner: &str) -> Option<&str> {
    let start = banner.find(MSC_MARKER)? + MSC_MARKER.len();
    let token = banner.get(start..start + TOKEN_LEN)?;
    if !token.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let overlong = banner
        .as_bytes()
        .get(start + TOKEN_LEN)
        .is_some_and(u8::is_ascii_digit);
    if overlong {
        return None;
    }
    tracing::debug!(token, "extracted compiler version from banner");
    Some(token)
}

pub fn resolve_banner(banner: &str) -> Result<LibraryName, Error> {
    let token = token_from_banner(banner).ok_or_else(|| {
        Error::new(ErrorKind::Usage)
            .with_message("no MSC version marker in banner")
            .with_hint("Pass a banner containing `MSC v.NNNN`, or resolve the token directly.")
    })?;
    resolve(token)
}

#[cfg(test)]
mod tests {
    use super::{resolve_banner, token_from_banner};
    use crate::core::error::ErrorKind;

    #[test]
    fn extracts_token_from_python_style_banner() {
        let banner = "3.7.9 (tags/v3.7.9:13c94747c7, Aug 17 2020, 18:58:18) [MSC v.1900 64 bit (AMD64)]";
        assert_eq!(token_from_banner(banner), Some("1900"));
    }

    #[test]
    fn rejects_missing_or_malformed_marker() {
        assert_eq!(token_from_banner("3.12.1 (main) [GCC 13.2.0]"), None);
        assert_eq!(token_from_banner("[MSC v.19"), None);
        assert_eq!(token_from_banner("[MSC v.19a8 32 bit]"), None);
        assert_eq!(token_from_banner(""), None);
    }

    #[test]
    fn rejects_tokens_longer_than_four_digits() {
        assert_eq!(token_from_banner("[MSC v.19281 64 bit]"), None);
        assert_eq!(token_from_banner("[MSC v.1928]"), Some("1928"));
        assert_eq!(token_from_banner("MSC v.1928"), Some("1928"));
    }

    #[test]
    fn first_marker_wins() {
        assert_eq!(
            token_from_banner("MSC v.1600 then MSC v.1916"),
            Some("1600")
        );
    }

    #[test]
    fn resolve_banner_chains_into_table() {
        let library = resolve_banner("[MSC v.1916 32 bit (Intel)]").expect("resolves");
        assert_eq!(library.as_str(), "vcruntime140");

        let err = resolve_banner("[MSC v.1200 32 bit (Intel)]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownCompilerVersion);
        assert_eq!(err.token(), Some("1200"));

        let err = resolve_banner("no compiler here").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
    }
}
