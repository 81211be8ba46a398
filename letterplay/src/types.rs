//! Common type definitions.
//!
//! # ID Types
//!
//! Catalog tables use `SERIAL` primary keys, so every entity ID is an `i32` wrapped in a
//! type alias:
//!
//! - [`UserId`]: `users.id`
//! - [`GameId`]: `jogos.id_jogo`
//! - [`ReviewId`]: `avaliacoes.id_avaliacao`
//! - [`GenreId`]: `generos.id_genero`
//! - [`CompanyId`]: `empresas.id_empresa`
//!
//! # Utility Functions
//!
//! - [`round_average`]: Round an average to a fixed number of decimal places, ties to even

use rust_decimal::{Decimal, prelude::ToPrimitive};

// Type aliases for IDs
pub type UserId = i32;
pub type GameId = i32;
pub type ReviewId = i32;
pub type GenreId = i32;
pub type CompanyId = i32;

/// Review scores, stored as `SMALLINT`
pub type Score = i16;

/// Round `value` to `places` decimal places. Exact ties go to the even digit.
/// Example: round_average(Decimal::new(4125, 3), 2) -> 4.12
pub fn round_average(value: Decimal, places: u32) -> f64 {
    value.round_dp(places).to_f64().unwrap_or(0.0)
}
