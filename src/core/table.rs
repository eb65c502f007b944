//! Purpose: Hold the static version-token to runtime-library table.
//! Exports: `LibraryName`, `TableEntry`, `VERSION_LIBRARY_TABLE`.
//! Role: Single source of truth for every compiler release the resolver knows.
//! Invariants: Tokens are unique and listed in ascending order.
//! Invariants: Library names are never empty; many tokens may share one name.
//! Invariants: Extending support is a data change here, never a new code path.
use std::fmt;

use serde::Serialize;

/// Base name (no extension) of a C runtime library to link against.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LibraryName(&'static str);

impl LibraryName {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for LibraryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl AsRef<str> for LibraryName {
    fn as_ref(&self) -> &str {
        self.0
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct TableEntry {
    pub token: &'static str,
    pub library: LibraryName,
    /// Visual C++ release that reports `token`.
    pub toolset: &'static str,
}

const fn entry(token: &'static str, library: &'static str, toolset: &'static str) -> TableEntry {
    TableEntry {
        token,
        library: LibraryName::new(library),
        toolset,
    }
}

const VS2017: &str = "Visual C++ 2017 (14.1x)";
const VS2019: &str = "Visual C++ 2019 (14.2x)";
const VS2022: &str = "Visual C++ 2022 (14.3x)";
const VS2022_14_4: &str = "Visual C++ 2022 (14.4x)";

// From 1900 on the C runtime ships as the universal CRT plus a single
// `vcruntime140` support library shared by every 14.x toolset.
pub static VERSION_LIBRARY_TABLE: &[TableEntry] = &[
    entry("1300", "msvcr70", "Visual C++ .NET 2002 (7.0)"),
    entry("1310", "msvcr71", "Visual C++ .NET 2003 (7.1)"),
    entry("1400", "msvcr80", "Visual C++ 2005 (8.0)"),
    entry("1500", "msvcr90", "Visual C++ 2008 (9.0)"),
    entry("1600", "msvcr100", "Visual C++ 2010 (10.0)"),
    entry("1700", "msvcr110", "Visual C++ 2012 (11.0)"),
    entry("1800", "msvcr120", "Visual C++ 2013 (12.0)"),
    entry("1900", "vcruntime140", "Visual C++ 2015 (14.0)"),
    entry("1910", "vcruntime140", VS2017),
    entry("1911", "vcruntime140", VS2017),
    entry("1912", "vcruntime140", VS2017),
    entry("1913", "vcruntime140", VS2017),
    entry("1914", "vcruntime140", VS2017),
    entry("1915", "vcruntime140", VS2017),
    entry("1916", "vcruntime140", VS2017),
    entry("1920", "vcruntime140", VS2019),
    entry("1921", "vcruntime140", VS2019),
    entry("1922", "vcruntime140", VS2019),
    entry("1923", "vcruntime140", VS2019),
    entry("1924", "vcruntime140", VS2019),
    entry("1925", "vcruntime140", VS2019),
    entry("1926", "vcruntime140", VS2019),
    entry("1927", "vcruntime140", VS2019),
    entry("1928", "vcruntime140", VS2019),
    entry("1929", "vcruntime140", VS2019),
    entry("1930", "vcruntime140", VS2022),
    entry("1931", "vcruntime140", VS2022),
    entry("1932", "vcruntime140", VS2022),
    entry("1933", "vcruntime140", VS2022),
    entry("1934", "vcruntime140", VS2022),
    entry("1935", "vcruntime140", VS2022),
    entry("1936", "vcruntime140", VS2022),
    entry("1937", "vcruntime140", VS2022),
    entry("1938", "vcruntime140", VS2022),
    entry("1939", "vcruntime140", VS2022),
    entry("1940", "vcruntime140", VS2022_14_4),
    entry("1941", "vcruntime140", VS2022_14_4),
    entry("1942", "vcruntime140", VS2022_14_4),
    entry("1943", "vcruntime140", VS2022_14_4),
    entry("1944", "vcruntime140", VS2022_14_4),
];

#[cfg(test)]
mod tests {
    use super::{LibraryName, VERSION_LIBRARY_TABLE};
    use std::collections::HashSet;

    #[test]
    fn tokens_are_unique() {
        let mut seen = HashSet::new();
        for entry in VERSION_LIBRARY_TABLE {
            assert!(seen.insert(entry.token), "duplicate token {}", entry.token);
        }
    }

    #[test]
    fn tokens_are_sorted_ascending() {
        for pair in VERSION_LIBRARY_TABLE.windows(2) {
            assert!(
                pair[0].token < pair[1].token,
                "{} listed before {}",
                pair[0].token,
                pair[1].token
            );
        }
    }

    #[test]
    fn every_entry_is_populated() {
        for entry in VERSION_LIBRARY_TABLE {
            assert!(!entry.token.is_empty());
            assert!(!entry.library.as_str().is_empty(), "empty library for {}", entry.token);
            assert!(!entry.toolset.is_empty());
        }
    }

    #[test]
    fn modern_toolsets_share_one_library() {
        let shared = VERSION_LIBRARY_TABLE
            .iter()
            .filter(|entry| entry.token.starts_with("19"))
            .map(|entry| entry.library)
            .collect::<HashSet<_>>();
        assert_eq!(shared.len(), 1);
        assert!(shared.contains(&LibraryName::new("vcruntime140")));
    }

    #[test]
    fn toolset_labels_follow_release_series() {
        let toolset = |token: &str| {
            VERSION_LIBRARY_TABLE
                .iter()
                .find(|entry| entry.token == token)
                .map(|entry| entry.toolset)
        };
        assert_eq!(toolset("1916"), Some("Visual C++ 2017 (14.1x)"));
        assert_eq!(toolset("1929"), Some("Visual C++ 2019 (14.2x)"));
        assert_eq!(toolset("1939"), Some("Visual C++ 2022 (14.3x)"));
        assert_eq!(toolset("1940"), Some("Visual C++ 2022 (14.4x)"));
        assert_eq!(toolset("1944"), Some("Visual C++ 2022 (14.4x)"));
    }

    #[test]
    fn library_name_serializes_as_plain_string() {
        let value = serde_json::to_value(LibraryName::new("msvcr90")).expect("serialize");
        assert_eq!(value, serde_json::json!("msvcr90"));
    }
}
