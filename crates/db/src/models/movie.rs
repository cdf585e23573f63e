//! Movie entity model and DTOs.

use cinedex_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A movie row from the `movies` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub genres: Vec<String>,
    pub rating: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new movie.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateMovie {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[validate(range(min = 1888, max = 2100))]
    pub year: Option<i32>,
    #[validate(length(min = 1, max = 256))]
    pub director: Option<String>,
    /// Defaults to no genres if omitted.
    #[serde(default)]
    #[validate(length(max = 16))]
    pub genres: Vec<String>,
    #[validate(range(min = 0.0, max = 10.0))]
    pub rating: Option<f64>,
}

/// DTO for a partial update.
///
/// An omitted field keeps its stored value. For the nullable columns an
/// explicit `null` clears the value (`Some(None)`); `title` and `genres`
/// reject `null`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateMovie {
    #[serde(default, deserialize_with = "patch::present", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "patch::nullable", skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1888, max = 2100))]
    pub year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "patch::nullable", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 256))]
    pub director: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::present", skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 16))]
    pub genres: Option<Vec<String>>,
    #[serde(default, deserialize_with = "patch::nullable", skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 10.0))]
    pub rating: Option<Option<f64>>,
}

/// Field deserializers that keep "absent" and "null" apart in a patch body.
///
/// Both are used together with `#[serde(default)]`, so an absent key never
/// reaches them and stays `None`.
mod patch {
    use serde::{Deserialize, Deserializer};

    /// A present key must carry a value; `null` is a type error.
    pub fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        T::deserialize(deserializer).map(Some)
    }

    /// A present key is `Some(Some(v))`, or `Some(None)` for `null`.
    pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

impl Movie {
    /// Merge the fields present in `update` onto this record in place.
    ///
    /// Timestamps are left alone; the store refreshes `updated_at` on save.
    pub fn apply(&mut self, update: &UpdateMovie) {
        if let Some(title) = &update.title {
            self.title.clone_from(title);
        }
        if let Some(year) = update.year {
            self.year = year;
        }
        if let Some(director) = &update.director {
            self.director.clone_from(director);
        }
        if let Some(genres) = &update.genres {
            self.genres.clone_from(genres);
        }
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
    }
}
