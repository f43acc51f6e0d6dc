use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::{
    AppState,
    error::{AppError, AppJson, AppResult},
    models::{
        CreateMovieRequest, DecreaseSeatsRequest, DecreaseSeatsResponse, MovieResponse,
        UpdateMovieRequest,
    },
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/{id}", get(get_movie).put(update_movie).delete(delete_movie))
        .route("/movies/{id}/decrease", post(decrease_seats))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn list_movies(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<MovieResponse>>> {
    let movies = state.store.find_all().await?;
    Ok(Json(movies.into_iter().map(MovieResponse::from).collect()))
}

async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<MovieResponse>> {
    let movie = state.store.find(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(movie.into()))
}

async fn create_movie(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<CreateMovieRequest>,
) -> AppResult<(StatusCode, Json<MovieResponse>)> {
    let title = body.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if body.available_seats < 0 {
        return Err(AppError::Validation("Available seats must be non-negative".to_string()));
    }

    let movie = state.store.insert(title, body.available_seats).await?;
    Ok((StatusCode::CREATED, Json(movie.into())))
}

async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    AppJson(body): AppJson<UpdateMovieRequest>,
) -> AppResult<Json<MovieResponse>> {
    let title = match body.title {
        Some(title) => {
            let trimmed = title.trim();
            if trimmed.is_empty() {
                return Err(AppError::Validation("Title is required".to_string()));
            }
            Some(trimmed.to_string())
        }
        None => None,
    };
    if body.available_seats.is_some_and(|seats| seats < 0) {
        return Err(AppError::Validation("Available seats must be non-negative".to_string()));
    }

    let movie =
        state.store.update(id, title, body.available_seats).await?.ok_or(AppError::NotFound)?;
    Ok(Json(movie.into()))
}

async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<Value>> {
    if !state.store.soft_delete(id).await? {
        return Err(AppError::NotFound);
    }
    Ok(Json(json!({ "message": "Movie deleted successfully" })))
}

async fn decrease_seats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    AppJson(body): AppJson<DecreaseSeatsRequest>,
) -> AppResult<Json<DecreaseSeatsResponse>> {
    let quantity = match body.quantity {
        Some(quantity) if quantity > 0 => quantity,
        _ => {
            return Err(AppError::Validation(
                "'quantity' must be a positive integer".to_string(),
            ));
        }
    };

    let movie = state.store.decrease_seats(id, quantity).await?;
    Ok(Json(DecreaseSeatsResponse {
        message: "Seats decreased successfully".to_string(),
        movie_id: movie.id,
        available_seats: movie.available_seats,
        decreased_by: quantity,
    }))
}
