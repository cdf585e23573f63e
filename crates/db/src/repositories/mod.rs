//! SQL repositories. Each repository is a zero-sized type with associated
//! async functions taking a `&PgPool`.

pub mod movie_repo;

pub use movie_repo::MovieRepo;
