//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the injected store and map every failure to
//! [`AppError`](crate::error::AppError).

pub mod movie;
