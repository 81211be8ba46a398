//! OpenAPI documentation for the `/api/v1` surface, rendered with Scalar at `/docs`.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

use crate::api;
use crate::errors::ErrorBody;

/// Security scheme for the trusted proxy header.
struct ProxyHeaderSecurityAddon;

impl Modify for ProxyHeaderSecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "X-LetterPlay-User".to_string(),
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "x-letterplay-user",
                    "Username of the caller, set by the authenticating proxy in front of this service.",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LetterPlay Reviews API",
        description = "Game reviews, per-game averages and the top-rated games leaderboard."
    ),
    servers(
        (url = "/api/v1", description = "Reviews API")
    ),
    modifiers(&ProxyHeaderSecurityAddon),
    paths(
        api::handlers::reviews::create_review,
        api::handlers::reviews::list_game_reviews,
        api::handlers::reviews::list_my_reviews,
        api::handlers::reviews::delete_review,
        api::handlers::rankings::weekly_ranking,
    ),
    components(
        schemas(
            api::models::reviews::ReviewCreate,
            api::models::reviews::ReviewResponse,
            api::models::reviews::GameReviewItem,
            api::models::reviews::GameReviewsResponse,
            api::models::reviews::GameResponse,
            api::models::reviews::ReviewWithGameResponse,
            api::models::reviews::DeleteReviewResponse,
            api::models::rankings::RankedGameResponse,
            api::models::rankings::GenreResponse,
            api::models::rankings::CompanyResponse,
            ErrorBody,
        )
    ),
    tags(
        (name = "reviews", description = "Submit, list and delete game reviews"),
        (name = "rankings", description = "Games ordered by average score"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_routes() {
        let json = ApiDoc::openapi().to_json().unwrap();

        assert!(json.contains("/games/{game_id}/reviews"));
        assert!(json.contains("/reviews/me"));
        assert!(json.contains("/reviews/{review_id}"));
        assert!(json.contains("/rankings/weekly"));
        assert!(json.contains("x-letterplay-user"));
    }
}
