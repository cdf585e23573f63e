use async_trait::async_trait;
use cinedex_core::types::DbId;

use super::{MovieStore, StoreError};
use crate::models::movie::{CreateMovie, Movie};
use crate::repositories::MovieRepo;
use crate::DbPool;

/// PostgreSQL-backed store. Thin adapter over [`MovieRepo`].
#[derive(Clone)]
pub struct PgMovieStore {
    pool: DbPool,
}

impl PgMovieStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn find_all(&self) -> Result<Vec<Movie>, StoreError> {
        Ok(MovieRepo::list(&self.pool).await?)
    }

    async fn create(&self, input: &CreateMovie) -> Result<Movie, StoreError> {
        Ok(MovieRepo::create(&self.pool, input).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, StoreError> {
        Ok(MovieRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_by_id_and_delete(&self, id: DbId) -> Result<Option<Movie>, StoreError> {
        Ok(MovieRepo::delete_returning(&self.pool, id).await?)
    }

    async fn save(&self, movie: &Movie) -> Result<Option<Movie>, StoreError> {
        Ok(MovieRepo::save(&self.pool, movie).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("PostgreSQL pool closed");
    }
}
