//! Repository for the `movies` table.

use cinedex_core::types::DbId;
use sqlx::PgPool;

use crate::models::movie::{CreateMovie, Movie};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, year, director, genres, rating, created_at, updated_at";

/// Provides CRUD operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie, returning the created row with its assigned id.
    pub async fn create(pool: &PgPool, input: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (title, year, director, genres, rating)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(&input.title)
            .bind(input.year)
            .bind(&input.director)
            .bind(input.genres.as_slice())
            .bind(input.rating)
            .fetch_one(pool)
            .await
    }

    /// Find a movie by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every movie in id order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies ORDER BY id ASC");
        sqlx::query_as::<_, Movie>(&query).fetch_all(pool).await
    }

    /// Overwrite every mutable column of `movie` and bump `updated_at`.
    ///
    /// Returns `None` if the row no longer exists.
    pub async fn save(pool: &PgPool, movie: &Movie) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                title = $2,
                year = $3,
                director = $4,
                genres = $5,
                rating = $6,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(movie.id)
            .bind(&movie.title)
            .bind(movie.year)
            .bind(&movie.director)
            .bind(movie.genres.as_slice())
            .bind(movie.rating)
            .fetch_optional(pool)
            .await
    }

    /// Delete a movie in a single statement, returning the removed row.
    pub async fn delete_returning(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("DELETE FROM movies WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
