//! HTTP request handlers for the API endpoints.
//!
//! Handlers extract request data (path, body, [`CurrentUser`](crate::api::models::users::CurrentUser)),
//! validate input, delegate to [`crate::service::ReviewService`] and return JSON. Errors are
//! returned as [`crate::errors::Error`], which renders as `{"detail": "..."}`.
//!
//! - [`reviews`]: Review submission, listings and deletion
//! - [`rankings`]: The games leaderboard

pub mod rankings;
pub mod reviews;
