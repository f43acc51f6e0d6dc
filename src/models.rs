use serde::{Deserialize, Serialize};

use crate::entities::movie;

/// Missing fields fall back to the zero value; the handler validates.
#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub available_seats: i32,
}

/// Both fields independently optional: omitted means "leave unchanged".
#[derive(Debug, Deserialize)]
pub struct UpdateMovieRequest {
    pub title: Option<String>,
    pub available_seats: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct DecreaseSeatsRequest {
    pub quantity: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: i32,
    pub title: String,
    pub available_seats: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<movie::Model> for MovieResponse {
    fn from(model: movie::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            available_seats: model.available_seats,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DecreaseSeatsResponse {
    pub message: String,
    pub movie_id: i32,
    pub available_seats: i32,
    pub decreased_by: i32,
}
