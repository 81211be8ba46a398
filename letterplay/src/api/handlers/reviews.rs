//! HTTP handlers for reviews.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use tracing::instrument;

use crate::{
    AppState,
    api::models::{
        reviews::{DeleteReviewResponse, GameReviewsResponse, ReviewCreate, ReviewResponse, ReviewWithGameResponse},
        users::CurrentUser,
    },
    errors::{Error, ErrorBody, Result},
    types::{GameId, ReviewId},
};

/// Submit a review for a game.
#[utoipa::path(
    post,
    path = "/games/{game_id}/reviews",
    tag = "reviews",
    summary = "Create or update review",
    description = "Store the caller's review of a game. A second submission for the same game overwrites the first.",
    params(
        ("game_id" = i32, Path, description = "Game ID"),
    ),
    request_body = ReviewCreate,
    responses(
        (status = 200, description = "Review stored", body = ReviewResponse),
        (status = 400, description = "Malformed body, score out of range or unknown game", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
    ),
    security(
        ("X-LetterPlay-User" = [])
    )
)]
#[instrument(skip_all)]
pub async fn create_review(
    State(state): State<AppState>,
    Path(game_id): Path<GameId>,
    current_user: CurrentUser,
    payload: std::result::Result<Json<ReviewCreate>, JsonRejection>,
) -> Result<Json<ReviewResponse>> {
    let Json(request) = payload?;
    request.validate().map_err(|message| Error::BadRequest { message })?;

    let review = state.review_service().create_review(current_user.id, game_id, &request).await?;

    Ok(Json(review))
}

/// List every review of a game with its average score.
#[utoipa::path(
    get,
    path = "/games/{game_id}/reviews",
    tag = "reviews",
    summary = "List game reviews",
    description = "All reviews of a game, oldest first, with the mean score rounded to one decimal place.",
    params(
        ("game_id" = i32, Path, description = "Game ID"),
    ),
    responses(
        (status = 200, description = "Reviews and average", body = GameReviewsResponse),
        (status = 500, description = "Internal server error", body = ErrorBody),
    )
)]
#[instrument(skip_all)]
pub async fn list_game_reviews(State(state): State<AppState>, Path(game_id): Path<GameId>) -> Result<Json<GameReviewsResponse>> {
    Ok(Json(state.review_service().game_reviews(game_id).await?))
}

#[utoipa::path(
    get,
    path = "/reviews/me",
    tag = "reviews",
    summary = "List my reviews",
    description = "Reviews written by the caller, each with the reviewed game embedded.",
    responses(
        (status = 200, description = "The caller's reviews", body = [ReviewWithGameResponse]),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
    ),
    security(
        ("X-LetterPlay-User" = [])
    )
)]
#[instrument(skip_all)]
pub async fn list_my_reviews(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Vec<ReviewWithGameResponse>>> {
    Ok(Json(state.review_service().my_reviews(current_user.id).await?))
}

#[utoipa::path(
    delete,
    path = "/reviews/{review_id}",
    tag = "reviews",
    summary = "Delete review",
    description = "Delete one of the caller's reviews.",
    params(
        ("review_id" = i32, Path, description = "Review ID"),
    ),
    responses(
        (status = 200, description = "Review deleted", body = DeleteReviewResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Caller is not the author", body = ErrorBody),
        (status = 404, description = "Review not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
    ),
    security(
        ("X-LetterPlay-User" = [])
    )
)]
#[instrument(skip_all)]
pub async fn delete_review(
    State(state): State<AppState>,
    Path(review_id): Path<ReviewId>,
    current_user: CurrentUser,
) -> Result<Json<DeleteReviewResponse>> {
    Ok(Json(state.review_service().delete_review(current_user.id, review_id).await?))
}
