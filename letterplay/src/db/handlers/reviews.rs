//! Database repository for reviews.

use sqlx::PgConnection;
use tracing::instrument;

use crate::db::{
    errors::Result,
    handlers::{Games, repository::Repository},
    models::{
        games::{Company, RankedGame, RankedGameRow},
        reviews::{GameReviewRecord, Review, ReviewCreateDBRequest, ReviewUpdateDBRequest, ReviewWithGame},
    },
};
use crate::types::{GameId, ReviewId, UserId, round_average};

/// Decimal places kept on leaderboard averages
const RANKING_AVERAGE_PLACES: u32 = 2;

pub struct Reviews<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Reviews<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// All reviews of a game joined with their authors' usernames, oldest first
    #[instrument(skip(self), err)]
    pub async fn list_by_game(&mut self, game_id: GameId) -> Result<Vec<GameReviewRecord>> {
        let records = sqlx::query_as::<_, GameReviewRecord>(
            r#"
            SELECT a.id_avaliacao, a.nota, a.comentario, a.id_jogo, a.id_user, u.username
            FROM avaliacoes a
            JOIN users u ON u.id = a.id_user
            WHERE a.id_jogo = $1
            ORDER BY a.id_avaliacao ASC
            "#,
        )
        .bind(game_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(records)
    }

    /// All reviews written by a user, each with the reviewed game loaded in the same query
    #[instrument(skip(self), err)]
    pub async fn list_by_user(&mut self, user_id: UserId) -> Result<Vec<ReviewWithGame>> {
        let reviews = sqlx::query_as::<_, ReviewWithGame>(
            r#"
            SELECT a.id_avaliacao, a.nota, a.comentario, a.id_jogo, a.id_user,
                   j.titulo, j.capa_url, j.descricao
            FROM avaliacoes a
            JOIN jogos j ON j.id_jogo = a.id_jogo
            WHERE a.id_user = $1
            ORDER BY a.id_avaliacao ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(reviews)
    }

    #[instrument(skip(self), err)]
    pub async fn get_by_user_and_game(&mut self, user_id: UserId, game_id: GameId) -> Result<Option<Review>> {
        let review = sqlx::query_as::<_, Review>("SELECT * FROM avaliacoes WHERE id_user = $1 AND id_jogo = $2")
            .bind(user_id)
            .bind(game_id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(review)
    }

    /// Games ranked by mean review score, highest first.
    ///
    /// Only games with at least one review appear. Ties fall back to review count, then game id.
    /// Genres for the returned games are loaded with a single batched query.
    #[instrument(skip(self), err)]
    pub async fn top_rated_games(&mut self, limit: i64) -> Result<Vec<RankedGame>> {
        let rows = sqlx::query_as::<_, RankedGameRow>(
            r#"
            SELECT
                j.id_jogo, j.titulo, j.capa_url, j.descricao,
                d.id_empresa AS developer_id, d.nome AS developer_name,
                p.id_empresa AS publisher_id, p.nome AS publisher_name,
                AVG(a.nota) AS average_score,
                COUNT(a.id_avaliacao) AS review_count
            FROM avaliacoes a
            JOIN jogos j ON j.id_jogo = a.id_jogo
            LEFT JOIN empresas d ON d.id_empresa = j.id_desenvolvedora
            LEFT JOIN empresas p ON p.id_empresa = j.id_publicadora
            GROUP BY j.id_jogo, d.id_empresa, p.id_empresa
            ORDER BY average_score DESC, review_count DESC, j.id_jogo ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&mut *self.db)
        .await?;

        let game_ids: Vec<GameId> = rows.iter().map(|row| row.game.id).collect();
        let mut genres = Games::new(&mut *self.db).genres_for_games(&game_ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| RankedGame {
                genres: genres.remove(&row.game.id).unwrap_or_default(),
                average_score: round_average(row.average_score, RANKING_AVERAGE_PLACES),
                review_count: row.review_count,
                developer: Company::from_columns(row.developer_id, row.developer_name),
                publisher: Company::from_columns(row.publisher_id, row.publisher_name),
                game: row.game,
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Reviews<'c> {
    type CreateRequest = ReviewCreateDBRequest;
    type UpdateRequest = ReviewUpdateDBRequest;
    type Response = Review;
    type Id = ReviewId;

    /// Insert a review. A concurrent first submission for the same (user, game) that got
    /// there first is overwritten rather than duplicated.
    #[instrument(skip(self, request), fields(user_id = request.user_id, game_id = request.game_id), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO avaliacoes (id_user, id_jogo, nota, comentario)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id_user, id_jogo)
            DO UPDATE SET nota = EXCLUDED.nota, comentario = EXCLUDED.comentario
            RETURNING *
            "#,
        )
        .bind(request.user_id)
        .bind(request.game_id)
        .bind(request.score)
        .bind(&request.comment)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(review)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let review = sqlx::query_as::<_, Review>("SELECT * FROM avaliacoes WHERE id_avaliacao = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(review)
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM avaliacoes WHERE id_avaliacao = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Overwrite score and comment. Fails with `NotFound` if the review is gone.
    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            UPDATE avaliacoes
            SET nota = $2, comentario = $3
            WHERE id_avaliacao = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.score)
        .bind(&request.comment)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(review)
    }
}
