//! HTTP handlers for the games leaderboard.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::{
    AppState,
    api::models::rankings::RankedGameResponse,
    errors::{ErrorBody, Result},
};

/// The top-rated games.
///
/// The ranking is computed over every review ever written, not only the last seven days.
#[utoipa::path(
    get,
    path = "/rankings/weekly",
    tag = "rankings",
    summary = "Top rated games",
    description = "Games ordered by mean review score, highest first, with genres, developer and publisher. \
                   Averages cover all reviews and are rounded to two decimal places.",
    responses(
        (status = 200, description = "Leaderboard", body = [RankedGameResponse]),
        (status = 500, description = "Internal server error", body = ErrorBody),
    )
)]
#[instrument(skip_all)]
pub async fn weekly_ranking(State(state): State<AppState>) -> Result<Json<Vec<RankedGameResponse>>> {
    Ok(Json(state.review_service().weekly_ranking().await?))
}
