//! Purpose: Library crate behind the `vcrt` CLI and downstream build tooling.
//! Exports: `api` (resolver, version table, errors); `core` is internal.
//! Role: Maps MSVC compiler version tokens to the C runtime library to link.
//! Invariants: The version table is static; nothing here performs I/O.
//! Invariants: Consumers go through `api`; `core` layout may change freely.
pub mod api;
#[doc(hidden)]
pub mod core;
