//! Request extractors

use crate::error::ApiError;
use axum::extract::FromRequest;

/// `axum::Json` whose rejections become [`ApiError::InvalidBody`]
///
/// A missing `Content-Type`, unparseable JSON and wrongly typed fields all
/// answer 400 in the usual error body instead of axum's plain-text replies.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
