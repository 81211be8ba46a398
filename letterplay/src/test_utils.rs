//! Test utilities for integration testing (available with `test-utils` feature).
//!
//! The catalog tables are owned by another service, so fixtures are inserted with plain SQL.

use crate::config::{Config, PoolSettings, ProxyHeaderAuthConfig};
use crate::db::models::users::User;
use crate::types::{CompanyId, GameId, GenreId};
use axum_test::TestServer;
use sqlx::PgPool;

pub async fn create_test_app(pool: PgPool) -> TestServer {
    let config = create_test_config();

    let app = crate::Application::new_with_pool(config, Some(pool))
        .await
        .expect("Failed to create application");

    app.into_test_server()
}

pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.host = "127.0.0.1".to_string();
    config.port = 0;
    config.database.pool = PoolSettings {
        max_connections: 2,
        min_connections: 0,
        ..Default::default()
    };
    config
}

pub async fn create_test_user(pool: &PgPool, username: &str) -> User {
    sqlx::query_as::<_, User>("INSERT INTO users (username, email) VALUES ($1, $2) RETURNING id, username")
        .bind(username)
        .bind(format!("{username}@example.com"))
        .fetch_one(pool)
        .await
        .expect("Failed to create test user")
}

pub async fn create_test_company(pool: &PgPool, name: &str) -> CompanyId {
    sqlx::query_scalar("INSERT INTO empresas (nome) VALUES ($1) RETURNING id_empresa")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("Failed to create test company")
}

pub async fn create_test_genre(pool: &PgPool, name: &str) -> GenreId {
    sqlx::query_scalar("INSERT INTO generos (nome_genero) VALUES ($1) RETURNING id_genero")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("Failed to create test genre")
}

pub async fn create_test_game(pool: &PgPool, title: &str, developer: Option<CompanyId>, publisher: Option<CompanyId>) -> GameId {
    sqlx::query_scalar(
        r#"
        INSERT INTO jogos (titulo, descricao, id_desenvolvedora, id_publicadora)
        VALUES ($1, $2, $3, $4)
        RETURNING id_jogo
        "#,
    )
    .bind(title)
    .bind(format!("Descrição de {title}"))
    .bind(developer)
    .bind(publisher)
    .fetch_one(pool)
    .await
    .expect("Failed to create test game")
}

pub async fn add_game_genre(pool: &PgPool, game_id: GameId, genre_id: GenreId) {
    sqlx::query("INSERT INTO jogo_generos (id_jogo, id_genero) VALUES ($1, $2)")
        .bind(game_id)
        .bind(genre_id)
        .execute(pool)
        .await
        .expect("Failed to tag test game");
}

/// The proxy header identifying `user`, as `(name, value)`
pub fn auth_header(user: &User) -> (String, String) {
    (ProxyHeaderAuthConfig::default().header_name, user.username.clone())
}
