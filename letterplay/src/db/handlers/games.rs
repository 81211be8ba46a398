//! Database repository for the read-only games catalog.

use std::collections::HashMap;

use sqlx::PgConnection;
use tracing::instrument;

use crate::db::{
    errors::Result,
    models::games::{GameGenreRow, Genre},
};
use crate::types::GameId;

pub struct Games<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Games<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Genres of several games in one query, keyed by game. Games without genres are absent.
    #[instrument(skip(self), fields(count = game_ids.len()), err)]
    pub async fn genres_for_games(&mut self, game_ids: &[GameId]) -> Result<HashMap<GameId, Vec<Genre>>> {
        if game_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, GameGenreRow>(
            r#"
            SELECT jg.id_jogo, g.id_genero, g.nome_genero
            FROM jogo_generos jg
            JOIN generos g ON g.id_genero = jg.id_genero
            WHERE jg.id_jogo = ANY($1)
            ORDER BY g.nome_genero ASC
            "#,
        )
        .bind(game_ids)
        .fetch_all(&mut *self.db)
        .await?;

        let mut genres: HashMap<GameId, Vec<Genre>> = HashMap::new();
        for row in rows {
            genres.entry(row.game_id).or_default().push(row.genre);
        }

        Ok(genres)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{add_game_genre, create_test_game, create_test_genre};
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_genres_for_games_groups_by_game(pool: PgPool) {
        let rpg = create_test_genre(&pool, "RPG").await;
        let action = create_test_genre(&pool, "Ação").await;
        let first = create_test_game(&pool, "Elden Ring", None, None).await;
        let second = create_test_game(&pool, "Persona 5", None, None).await;
        let untagged = create_test_game(&pool, "Minesweeper", None, None).await;

        add_game_genre(&pool, first, rpg).await;
        add_game_genre(&pool, first, action).await;
        add_game_genre(&pool, second, rpg).await;

        let mut conn = pool.acquire().await.unwrap();
        let genres = Games::new(&mut conn)
            .genres_for_games(&[first, second, untagged])
            .await
            .unwrap();

        assert_eq!(genres[&first].len(), 2);
        assert_eq!(genres[&second].len(), 1);
        assert_eq!(genres[&second][0].name, "RPG");
        assert!(!genres.contains_key(&untagged));
    }

    #[sqlx::test]
    async fn test_no_games_no_query(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        assert!(Games::new(&mut conn).genres_for_games(&[]).await.unwrap().is_empty());
    }
}
