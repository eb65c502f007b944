//! Purpose: Map a compiler version token to the runtime library it links against.
//! Exports: `resolve`, `lookup`.
//! Role: The only consumer-facing query over `VERSION_LIBRARY_TABLE`.
//! Invariants: Matching is exact string equality; no trimming or numeric ranges.
//! Invariants: Pure and deterministic; unknown tokens always fail the same way.
use crate::core::error::{Error, ErrorKind};
use crate::core::table::{LibraryName, TableEntry, VERSION_LIBRARY_TABLE};

pub fn lookup(token: &str) -> Option<&'static TableEntry> {
    VERSION_LIBRARY_TABLE
        .iter()
        .find(|entry| entry.token == token)
}

/// Returns the runtime library for `token`, or `ErrorKind::UnknownCompilerVersion`
/// carrying the token when the table has no entry for it.
pub fn resolve(token: &str) -> Result<LibraryName, Error> {
    match lookup(token) {
        Some(entry) => {
            tracing::debug!(token, library = %entry.library, "resolved runtime library");
            Ok(entry.library)
        }
        None => {
            tracing::debug!(token, "no runtime library for compiler version");
            Err(unknown_version_error(token))
        }
    }
}

pub(crate) fn unknown_version_error(token: &str) -> Error {
    let shown = if token.is_empty() {
        "\"\"".to_string()
    } else {
        token.to_string()
    };
    Error::new(ErrorKind::UnknownCompilerVersion)
        .with_message(format!("unknown compiler version {shown}"))
        .with_hint("Check the version token, or add the release to the version table.")
        .with_token(token)
}

#[cfg(test)]
mod tests {
    use super::{lookup, resolve};
    use crate::core::error::ErrorKind;

    #[test]
    fn known_tokens_resolve() {
        let cases = [
            ("1600", "msvcr100"),
            ("1700", "msvcr110"),
            ("1800", "msvcr120"),
            ("1900", "vcruntime140"),
            ("1916", "vcruntime140"),
            ("1928", "vcruntime140"),
        ];
        for (token, library) in cases {
            let resolved = resolve(token).expect("known token");
            assert_eq!(resolved.as_str(), library, "token {token}");
        }
    }

    #[test]
    fn unknown_token_fails_with_token_in_message() {
        let err = resolve("9999").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownCompilerVersion);
        assert_eq!(err.token(), Some("9999"));
        assert!(err.message().unwrap_or_default().contains("9999"));
        assert!(err.hint().is_some());
    }

    #[test]
    fn matching_is_exact() {
        for token in [" 1900", "1900 ", "19", "19000", "01900", "v1900"] {
            let err = resolve(token).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnknownCompilerVersion, "{token:?}");
        }
    }

    #[test]
    fn empty_token_is_unknown() {
        let err = resolve("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownCompilerVersion);
        assert_eq!(err.token(), Some(""));
        assert_eq!(err.message(), Some("unknown compiler version \"\""));
    }

    #[test]
    fn repeated_calls_agree() {
        assert_eq!(resolve("1500").ok(), resolve("1500").ok());
        assert_eq!(
            resolve("1234").unwrap_err().kind(),
            resolve("1234").unwrap_err().kind()
        );
    }

    #[test]
    fn lookup_exposes_toolset() {
        let entry = lookup("1916").expect("entry");
        assert_eq!(entry.toolset, "Visual C++ 2017 (14.1x)");
        assert!(lookup("0000").is_none());

        let entry = lookup("1940").expect("entry");
        assert_eq!(entry.toolset, "Visual C++ 2022 (14.4x)");
    }
}
