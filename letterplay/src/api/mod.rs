//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers
//! - **[`models`]**: Request/response data structures
//!
//! # API Structure
//!
//! All routes are nested under `/api/v1`:
//!
//! - **Reviews** (`/games/{game_id}/reviews`, `/reviews/*`): Submit, list and delete reviews
//! - **Rankings** (`/rankings/weekly`): Games ordered by average score
//!
//! Endpoints are documented with `utoipa`; the rendered reference is served at `/docs`.

pub mod handlers;
pub mod models;
