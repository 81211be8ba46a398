//! API request/response models for reviews.
//!
//! Field names are the catalog's wire contract (`nota`, `comentario`, `media_nota`, ...),
//! shared with the existing web client.

use crate::db::models::{
    games::GameSummary,
    reviews::{GameReviewRecord, Review, ReviewWithGame},
};
use crate::types::{GameId, ReviewId, Score, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lowest accepted score
pub const MIN_SCORE: Score = 1;
/// Highest accepted score
pub const MAX_SCORE: Score = 5;

/// Body of a review submission. Resubmitting for the same game overwrites the previous review.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewCreate {
    /// Score from 1 to 5
    #[schema(minimum = 1, maximum = 5)]
    pub nota: Score,
    pub comentario: Option<String>,
}

impl ReviewCreate {
    /// Returns an error message when the payload is out of range
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&self.nota) {
            return Err(format!("nota must be between {MIN_SCORE} and {MAX_SCORE}, got {}", self.nota));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub id_avaliacao: ReviewId,
    pub nota: Score,
    pub comentario: Option<String>,
    pub id_jogo: GameId,
    pub id_user: UserId,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id_avaliacao: review.id,
            nota: review.score,
            comentario: review.comment,
            id_jogo: review.game_id,
            id_user: review.user_id,
        }
    }
}

/// One review in a game's review list, with the author's username
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GameReviewItem {
    pub id_avaliacao: ReviewId,
    pub nota: Score,
    pub comentario: Option<String>,
    pub id_jogo: GameId,
    pub id_user: UserId,
    pub username: String,
}

impl From<GameReviewRecord> for GameReviewItem {
    fn from(record: GameReviewRecord) -> Self {
        Self {
            id_avaliacao: record.review.id,
            nota: record.review.score,
            comentario: record.review.comment,
            id_jogo: record.review.game_id,
            id_user: record.review.user_id,
            username: record.username,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GameReviewsResponse {
    pub items: Vec<GameReviewItem>,
    /// Mean score rounded to one decimal place, 0.0 when there are no reviews
    pub media_nota: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GameResponse {
    pub id_jogo: GameId,
    pub titulo: String,
    pub capa_url: Option<String>,
    pub descricao: Option<String>,
}

impl From<GameSummary> for GameResponse {
    fn from(game: GameSummary) -> Self {
        Self {
            id_jogo: game.id,
            titulo: game.title,
            capa_url: game.cover_url,
            descricao: game.description,
        }
    }
}

/// A review written by the caller, with the reviewed game embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewWithGameResponse {
    pub id_avaliacao: ReviewId,
    pub nota: Score,
    pub comentario: Option<String>,
    pub id_jogo: GameId,
    pub id_user: UserId,
    pub jogo: GameResponse,
}

impl From<ReviewWithGame> for ReviewWithGameResponse {
    fn from(row: ReviewWithGame) -> Self {
        Self {
            id_avaliacao: row.review.id,
            nota: row.review.score,
            comentario: row.review.comment,
            id_jogo: row.review.game_id,
            id_user: row.review.user_id,
            jogo: row.game.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeleteReviewResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds() {
        for nota in 1..=5 {
            assert!(ReviewCreate { nota, comentario: None }.validate().is_ok());
        }
        assert!(ReviewCreate { nota: 0, comentario: None }.validate().is_err());
        assert!(ReviewCreate { nota: 6, comentario: None }.validate().is_err());
        assert!(ReviewCreate { nota: -3, comentario: None }.validate().is_err());
    }

    #[test]
    fn test_review_serializes_with_wire_names() {
        let response = ReviewResponse::from(Review {
            id: 7,
            score: 4,
            comment: None,
            game_id: 3,
            user_id: 11,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id_avaliacao": 7,
                "nota": 4,
                "comentario": null,
                "id_jogo": 3,
                "id_user": 11,
            })
        );
    }
}
