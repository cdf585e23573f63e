use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use cinedex_core::types::DbId;
use tokio::sync::RwLock;

use super::{MovieStore, StoreError};
use crate::models::movie::{CreateMovie, Movie};

/// In-process store keyed by id. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct MemoryMovieStore {
    movies: RwLock<BTreeMap<DbId, Movie>>,
    next_id: AtomicI64,
    closed: AtomicBool,
}

impl Default for MemoryMovieStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryMovieStore {
    pub fn new() -> Self {
        Self {
            movies: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            closed: AtomicBool::new(false),
        }
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Unavailable("memory store is closed".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl MovieStore for MemoryMovieStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn find_all(&self) -> Result<Vec<Movie>, StoreError> {
        self.ensure_open()?;
        Ok(self.movies.read().await.values().cloned().collect())
    }

    async fn create(&self, input: &CreateMovie) -> Result<Movie, StoreError> {
        self.ensure_open()?;
        let now = chrono::Utc::now();
        let movie = Movie {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            title: input.title.clone(),
            year: input.year,
            director: input.director.clone(),
            genres: input.genres.clone(),
            rating: input.rating,
            created_at: now,
            updated_at: now,
        };
        self.movies.write().await.insert(movie.id, movie.clone());
        Ok(movie)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, StoreError> {
        self.ensure_open()?;
        Ok(self.movies.read().await.get(&id).cloned())
    }

    async fn find_by_id_and_delete(&self, id: DbId) -> Result<Option<Movie>, StoreError> {
        self.ensure_open()?;
        Ok(self.movies.write().await.remove(&id))
    }

    async fn save(&self, movie: &Movie) -> Result<Option<Movie>, StoreError> {
        self.ensure_open()?;
        let mut movies = self.movies.write().await;
        let Some(stored) = movies.get_mut(&movie.id) else {
            return Ok(None);
        };
        *stored = Movie {
            created_at: stored.created_at,
            updated_at: chrono::Utc::now(),
            ..movie.clone()
        };
        Ok(Some(stored.clone()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.ensure_open()
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.movies.write().await.clear();
        tracing::info!("Memory store closed");
    }
}
