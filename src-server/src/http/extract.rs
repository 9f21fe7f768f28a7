//! Extractors whose rejections answer with `{"detail": ...}` like every
//! other failure.

use axum::extract::{FromRequest, FromRequestParts};

use crate::domain::DomainError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(DomainError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(DomainError))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(DomainError))]
pub struct ApiQuery<T>(pub T);
