//! Database models for reviews (`avaliacoes`).

use crate::db::models::games::GameSummary;
use crate::types::{GameId, ReviewId, Score, UserId};
use serde::{Deserialize, Serialize};

/// Database representation of a review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    #[sqlx(rename = "id_avaliacao")]
    pub id: ReviewId,
    #[sqlx(rename = "nota")]
    pub score: Score,
    #[sqlx(rename = "comentario")]
    pub comment: Option<String>,
    #[sqlx(rename = "id_jogo")]
    pub game_id: GameId,
    #[sqlx(rename = "id_user")]
    pub user_id: UserId,
}

/// Request to create a new review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreateDBRequest {
    pub user_id: UserId,
    pub game_id: GameId,
    pub score: Score,
    pub comment: Option<String>,
}

/// Request to overwrite the content of an existing review.
///
/// Both fields are always written: a resubmission without a comment clears the old one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewUpdateDBRequest {
    pub score: Score,
    pub comment: Option<String>,
}

/// A review of one game joined with its author's username
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GameReviewRecord {
    #[sqlx(flatten)]
    pub review: Review,
    pub username: String,
}

/// A review with the reviewed game loaded alongside it
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReviewWithGame {
    #[sqlx(flatten)]
    pub review: Review,
    #[sqlx(flatten)]
    pub game: GameSummary,
}
