//! Shared primitives for the Cinedex service: id and timestamp aliases and
//! the domain error taxonomy used by every other crate.

pub mod error;
pub mod types;
