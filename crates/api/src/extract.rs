//! Extractors that route axum's built-in rejections through [`AppError`].
//!
//! A malformed JSON body, an unknown field, or a non-numeric path id would
//! otherwise be answered by axum directly with a plain-text body. Using these
//! wrappers keeps every failure on the same JSON error path.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `axum::Json` with [`AppError`] as its rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` with [`AppError`] as its rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
