//! Database record models matching table schemas.
//!
//! These structs map table rows onto Rust names. Columns keep the catalog's Portuguese
//! names (`avaliacoes.nota`, `jogos.titulo`, ...) and are renamed with `#[sqlx(rename)]`.
//!
//! Database models are distinct from API models so that storage and wire representations
//! can evolve independently. API models implement `From` conversions from these types.
//!
//! - [`reviews`]: Reviews and the joined shapes the review queries return
//! - [`games`]: Games, genres, companies and leaderboard rows
//! - [`users`]: The user columns needed to resolve identities

pub mod games;
pub mod reviews;
pub mod users;
