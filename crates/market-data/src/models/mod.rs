//! Market data models
//!
//! Security identifiers (`Cusip`) and the records providers return for them.

mod identifier;

pub use identifier::{Cusip, IdentifierMapping, CUSIP_LENGTH};
