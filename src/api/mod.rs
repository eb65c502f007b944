//! Purpose: Define the stable public Rust API boundary for vcrt.
//! Exports: Resolver operations, table types, and the error model.
//! Role: Public, additive-only surface; hides internal module layout.
//! Invariants: This module is the only supported path to core types.

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::banner::{resolve_banner, token_from_banner};
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::resolve::{lookup, resolve};
pub use crate::core::table::{LibraryName, TableEntry, VERSION_LIBRARY_TABLE};
