//! API response models for the games leaderboard.

use crate::db::models::games::{Company, Genre, RankedGame};
use crate::types::{CompanyId, GameId, GenreId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GenreResponse {
    pub id_genero: GenreId,
    pub nome_genero: String,
}

impl From<Genre> for GenreResponse {
    fn from(genre: Genre) -> Self {
        Self {
            id_genero: genre.id,
            nome_genero: genre.name,
        }
    }
}

/// A developer or publisher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompanyResponse {
    pub id_empresa: CompanyId,
    pub nome: String,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id_empresa: company.id,
            nome: company.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RankedGameResponse {
    pub id_jogo: GameId,
    pub titulo: String,
    pub capa_url: Option<String>,
    pub generos: Vec<GenreResponse>,
    /// Mean score rounded to two decimal places
    pub media: f64,
    pub total_reviews: i64,
    pub descricao: Option<String>,
    pub desenvolvedora: Option<CompanyResponse>,
    pub publicadora: Option<CompanyResponse>,
}

impl From<RankedGame> for RankedGameResponse {
    fn from(ranked: RankedGame) -> Self {
        Self {
            id_jogo: ranked.game.id,
            titulo: ranked.game.title,
            capa_url: ranked.game.cover_url,
            generos: ranked.genres.into_iter().map(Into::into).collect(),
            media: ranked.average_score,
            total_reviews: ranked.review_count,
            descricao: ranked.game.description,
            desenvolvedora: ranked.developer.map(Into::into),
            publicadora: ranked.publisher.map(Into::into),
        }
    }
}
