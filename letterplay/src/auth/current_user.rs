use crate::{
    AppState,
    api::models::users::CurrentUser,
    db::handlers::Users,
    errors::{Error, Result},
};
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{debug, instrument, trace};

/// Read the username from the configured proxy header, if present
fn proxy_header_username<'a>(parts: &'a Parts, header_name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(header_name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|username| !username.is_empty())
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let proxy_header = &state.config.auth.proxy_header;
        if !proxy_header.enabled {
            return Err(Error::Unauthenticated { message: None });
        }

        let Some(username) = proxy_header_username(parts, &proxy_header.header_name) else {
            trace!("No proxy header present");
            return Err(Error::Unauthenticated { message: None });
        };

        let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
        match Users::new(&mut conn).get_by_username(username).await? {
            Some(user) => {
                debug!("Found proxy header authenticated user: {}", user.id);
                Ok(user.into())
            }
            None => {
                debug!("Proxy header names unknown user");
                Err(Error::Unauthenticated {
                    message: Some("Unknown user".to_string()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        AppState,
        api::models::users::CurrentUser,
        errors::Error,
        test_utils::{create_test_config, create_test_user},
    };
    use axum::{extract::FromRequestParts as _, http::request::Parts};
    use sqlx::PgPool;

    fn parts_with_headers(headers: &[(&str, &str)]) -> Parts {
        let mut request = axum::http::Request::builder().uri("http://localhost/test");
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let (parts, _body) = request.body(()).unwrap().into_parts();
        parts
    }

    fn state(pool: &PgPool) -> AppState {
        AppState::builder().db(pool.clone()).config(create_test_config()).build()
    }

    #[sqlx::test]
    async fn test_existing_user_extraction(pool: PgPool) {
        let user = create_test_user(&pool, "wagner").await;
        let state = state(&pool);

        let mut parts = parts_with_headers(&[("x-letterplay-user", "wagner")]);
        let current_user = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap();

        assert_eq!(current_user.id, user.id);
        assert_eq!(current_user.username, "wagner");
    }

    #[sqlx::test]
    async fn test_missing_header_is_unauthenticated(pool: PgPool) {
        let state = state(&pool);

        let mut parts = parts_with_headers(&[]);
        let result = CurrentUser::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(Error::Unauthenticated { message: None })));

        let mut parts = parts_with_headers(&[("x-letterplay-user", "   ")]);
        let result = CurrentUser::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(Error::Unauthenticated { .. })));
    }

    #[sqlx::test]
    async fn test_unknown_user_is_not_created(pool: PgPool) {
        let state = state(&pool);

        let mut parts = parts_with_headers(&[("x-letterplay-user", "ghost")]);
        let result = CurrentUser::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(Error::Unauthenticated { message: Some(_) })));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users").fetch_one(&pool).await.unwrap();
        assert_eq!(count, 0);
    }

    #[sqlx::test]
    async fn test_custom_header_name(pool: PgPool) {
        create_test_user(&pool, "xuxa").await;
        let mut config = create_test_config();
        config.auth.proxy_header.header_name = "x-forwarded-user".to_string();
        let state = AppState::builder().db(pool.clone()).config(config).build();

        let mut parts = parts_with_headers(&[("x-letterplay-user", "xuxa")]);
        assert!(CurrentUser::from_request_parts(&mut parts, &state).await.is_err());

        let mut parts = parts_with_headers(&[("x-forwarded-user", "xuxa")]);
        let current_user = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(current_user.username, "xuxa");
    }
}
