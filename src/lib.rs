//! Generate struct definitions from live database table schemas.
//!
//! A [`SchemaReader`] is opened for one of the supported dialects with
//! [`connect`], and a [`Generator`] turns the columns of a table into Go or
//! Rust source text.

pub mod libs;

pub use libs::*;
