//! Helper macros shared by the domain and adapter crates.

#[macro_use]
pub mod macros;
