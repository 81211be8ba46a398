//! Repository implementations for database access.
//!
//! Each repository wraps a borrowed `PgConnection` and exposes strongly typed queries
//! returning models from [`crate::db::models`]. Every write is a single statement, so
//! repositories can be built from a plain pooled connection:
//!
//! ```ignore
//! use letterplay::db::handlers::{Repository, Reviews};
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut conn = pool.acquire().await?;
//!     let mut reviews = Reviews::new(&mut conn);
//!     let ranking = reviews.top_rated_games(10).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Available Repositories
//!
//! - [`Reviews`]: Review persistence, per-game and per-user listings, the leaderboard
//! - [`Games`]: Catalog lookups (games and their genres)
//! - [`Users`]: Username resolution

pub mod games;
pub mod repository;
pub mod reviews;
pub mod users;

pub use games::Games;
pub use repository::Repository;
pub use reviews::Reviews;
pub use users::Users;
