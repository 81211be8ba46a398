//! Review orchestration: one review per (user, game) and author-only deletion.
//!
//! [`ReviewService`] sits between the HTTP handlers and the repositories. It owns no state
//! beyond the pool and the leaderboard size; every call acquires one pooled connection.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, info, instrument};

use crate::api::models::{
    rankings::RankedGameResponse,
    reviews::{DeleteReviewResponse, GameReviewItem, GameReviewsResponse, ReviewCreate, ReviewResponse, ReviewWithGameResponse},
};
use crate::db::{
    handlers::{Repository, Reviews},
    models::reviews::{ReviewCreateDBRequest, ReviewUpdateDBRequest},
};
use crate::errors::{Error, Result};
use crate::types::{GameId, ReviewId, UserId, round_average};

pub const REVIEW_DELETED: &str = "Avaliação deletada com sucesso";

/// Decimal places kept on a game's mean score
const GAME_AVERAGE_PLACES: u32 = 1;

#[derive(Clone)]
pub struct ReviewService {
    pool: PgPool,
    ranking_limit: i64,
}

impl ReviewService {
    pub fn new(pool: PgPool, ranking_limit: i64) -> Self {
        Self { pool, ranking_limit }
    }

    async fn connection(&self) -> Result<sqlx::pool::PoolConnection<sqlx::Postgres>> {
        self.pool.acquire().await.map_err(|e| Error::Database(e.into()))
    }

    /// Store the caller's review of a game, overwriting their previous one if it exists.
    #[instrument(skip(self, payload), err)]
    pub async fn create_review(&self, user_id: UserId, game_id: GameId, payload: &ReviewCreate) -> Result<ReviewResponse> {
        let mut conn = self.connection().await?;
        let mut repo = Reviews::new(&mut conn);

        let review = match repo.get_by_user_and_game(user_id, game_id).await? {
            Some(existing) => {
                debug!(review_id = existing.id, "Overwriting existing review");
                repo.update(
                    existing.id,
                    &ReviewUpdateDBRequest {
                        score: payload.nota,
                        comment: payload.comentario.clone(),
                    },
                )
                .await?
            }
            None => {
                repo.create(&ReviewCreateDBRequest {
                    user_id,
                    game_id,
                    score: payload.nota,
                    comment: payload.comentario.clone(),
                })
                .await?
            }
        };

        Ok(review.into())
    }

    #[instrument(skip(self), err)]
    pub async fn game_reviews(&self, game_id: GameId) -> Result<GameReviewsResponse> {
        let mut conn = self.connection().await?;
        let records = Reviews::new(&mut conn).list_by_game(game_id).await?;

        let media_nota = if records.is_empty() {
            0.0
        } else {
            // Ties are judged on the binary mean, so 87/20 (stored just below 4.35) rounds down
            let total: f64 = records.iter().map(|r| f64::from(r.review.score)).sum();
            Decimal::from_f64_retain(total / records.len() as f64)
                .map(|mean| round_average(mean, GAME_AVERAGE_PLACES))
                .unwrap_or(0.0)
        };

        Ok(GameReviewsResponse {
            items: records.into_iter().map(GameReviewItem::from).collect(),
            media_nota,
        })
    }

    #[instrument(skip(self), err)]
    pub async fn my_reviews(&self, user_id: UserId) -> Result<Vec<ReviewWithGameResponse>> {
        let mut conn = self.connection().await?;
        let reviews = Reviews::new(&mut conn).list_by_user(user_id).await?;

        Ok(reviews.into_iter().map(Into::into).collect())
    }

    /// Delete a review. Only its author may do so.
    #[instrument(skip(self), err)]
    pub async fn delete_review(&self, user_id: UserId, review_id: ReviewId) -> Result<DeleteReviewResponse> {
        let mut conn = self.connection().await?;
        let mut repo = Reviews::new(&mut conn);

        let review = repo.get_by_id(review_id).await?.ok_or_else(Error::review_not_found)?;
        if review.user_id != user_id {
            return Err(Error::not_review_author());
        }

        repo.delete(review_id).await?;
        info!(review_id, user_id, "Review deleted");

        Ok(DeleteReviewResponse {
            message: REVIEW_DELETED.to_string(),
        })
    }

    /// The leaderboard. Despite the name this averages over all reviews ever written.
    #[instrument(skip(self), err)]
    pub async fn weekly_ranking(&self) -> Result<Vec<RankedGameResponse>> {
        let mut conn = self.connection().await?;
        let ranking = Reviews::new(&mut conn).top_rated_games(self.ranking_limit).await?;

        Ok(ranking.into_iter().map(Into::into).collect())
    }
}
