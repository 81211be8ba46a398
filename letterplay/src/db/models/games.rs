//! Database models for the games catalog (`jogos`, `generos`, `empresas`).

use crate::types::{CompanyId, GameId, GenreId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The descriptive columns of a game, without its relations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GameSummary {
    #[sqlx(rename = "id_jogo")]
    pub id: GameId,
    #[sqlx(rename = "titulo")]
    pub title: String,
    #[sqlx(rename = "capa_url")]
    pub cover_url: Option<String>,
    #[sqlx(rename = "descricao")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Genre {
    #[sqlx(rename = "id_genero")]
    pub id: GenreId,
    #[sqlx(rename = "nome_genero")]
    pub name: String,
}

/// A developer or publisher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
}

impl Company {
    /// Build a company from the nullable columns of a LEFT JOIN
    pub fn from_columns(id: Option<CompanyId>, name: Option<String>) -> Option<Self> {
        match (id, name) {
            (Some(id), Some(name)) => Some(Self { id, name }),
            _ => None,
        }
    }
}

/// A genre tagged with the game it belongs to, as returned by the batched genre lookup
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GameGenreRow {
    #[sqlx(rename = "id_jogo")]
    pub game_id: GameId,
    #[sqlx(flatten)]
    pub genre: Genre,
}

/// One aggregated leaderboard row, before genres are attached
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RankedGameRow {
    #[sqlx(flatten)]
    pub game: GameSummary,
    pub developer_id: Option<CompanyId>,
    pub developer_name: Option<String>,
    pub publisher_id: Option<CompanyId>,
    pub publisher_name: Option<String>,
    /// `AVG` over a `SMALLINT` column comes back as `NUMERIC`
    pub average_score: Decimal,
    pub review_count: i64,
}

/// A game on the leaderboard with its relations loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedGame {
    pub game: GameSummary,
    pub genres: Vec<Genre>,
    /// Mean score, rounded to 2 decimal places
    pub average_score: f64,
    pub review_count: i64,
    pub developer: Option<Company>,
    pub publisher: Option<Company>,
}
