//! Loads the bulk reference data and builds the immutable lookup catalog.
//!
//! All parsing and conversion errors here are fatal: the service must not
//! come up on a partially built catalog.

/// Typed field conversion and row-to-record mapping.
pub mod convert;
/// Load-time error taxonomy.
pub mod error;
/// Key-expansion engine for keyed record dictionaries.
pub mod key;
/// Catalog assembly from the named reference sheets.
pub mod load;
/// Delimited-text parsing: separators, quoting, sheets, and workbooks.
pub mod sheet;

pub use convert::*;
pub use error::*;
pub use key::*;
pub use load::*;
pub use sheet::*;
