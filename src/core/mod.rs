// Core modules: version table, resolver, banner parsing, and error modeling.
pub mod banner;
pub mod error;
pub mod resolve;
pub mod table;
