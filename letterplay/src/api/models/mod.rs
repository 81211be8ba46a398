//! API request and response data models.
//!
//! These types form the public HTTP contract and carry `utoipa::ToSchema` derives for the
//! OpenAPI document. Each converts from its counterpart in [`crate::db::models`].

pub mod rankings;
pub mod reviews;
pub mod users;
