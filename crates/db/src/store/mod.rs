//! The movie store abstraction.
//!
//! Handlers only ever see an `Arc<dyn MovieStore>`. Two backends exist:
//! [`PgMovieStore`] for production and [`MemoryMovieStore`] for local runs
//! and tests. Both are created explicitly at startup and torn down with
//! [`MovieStore::close`] after the server stops.

pub mod memory;
pub mod pg;

use async_trait::async_trait;
use cinedex_core::types::DbId;

use crate::models::movie::{CreateMovie, Movie};

pub use memory::MemoryMovieStore;
pub use pg::PgMovieStore;

/// Errors surfaced by a [`MovieStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence operations required by the movie handlers.
///
/// `find_by_id` followed by `save` is two round trips; callers get no
/// atomicity across them.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;

    async fn find_all(&self) -> Result<Vec<Movie>, StoreError>;

    /// Persist a new movie. The store assigns the id and timestamps.
    async fn create(&self, input: &CreateMovie) -> Result<Movie, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, StoreError>;

    /// Remove a movie in one step, returning what was removed.
    async fn find_by_id_and_delete(&self, id: DbId) -> Result<Option<Movie>, StoreError>;

    /// Write back a previously fetched (and possibly mutated) movie.
    ///
    /// Returns `None` if the movie was deleted in the meantime.
    async fn save(&self, movie: &Movie) -> Result<Option<Movie>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;

    /// Release the underlying resources. Later calls fail.
    async fn close(&self);
}
