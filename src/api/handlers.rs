use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::RequestId;
use crate::models::{Mod, ModSort, Rating, Recommendation, User, UserPreferences};
use crate::services::{assistant, recommendations};

use super::AppState;

// Request/Response types

#[derive(Debug, Default, Deserialize)]
pub struct ModQuery {
    pub category: Option<String>,
    pub q: Option<String>,
    pub sort: Option<ModSort>,
}

#[derive(Debug, Deserialize)]
pub struct CreateModRequest {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub id: Option<String>,
    pub username: String,
    pub bio: Option<String>,
    #[serde(default)]
    pub preferences: UserPreferences,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: String,
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub user_id: String,
    pub rating: u8,
    pub review: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub user_id: String,
    /// Cohort chosen by the caller; similarity is not computed here
    #[serde(default)]
    pub similar_user_ids: Vec<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct AssistantResponse {
    pub reply: String,
}

fn user_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("User {} not found", id))
}

fn mod_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Mod {} not found", id))
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// List the catalog, optionally filtered by category and search text, then sorted
pub async fn list_mods(
    State(state): State<AppState>,
    Query(query): Query<ModQuery>,
) -> Json<Vec<Mod>> {
    let inner = state.inner.read().await;
    let mut mods: Vec<Mod> = inner
        .catalog
        .iter()
        .filter(|m| query.category.as_deref().map_or(true, |c| m.in_category(c)))
        .filter(|m| query.q.as_deref().map_or(true, |q| m.matches_search(q)))
        .cloned()
        .collect();
    if let Some(sort) = query.sort {
        sort.apply(&mut mods);
    }
    Json(mods)
}

/// Submit a new mod to the catalog
pub async fn create_mod(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<CreateModRequest>,
) -> AppResult<(StatusCode, Json<Mod>)> {
    if request.name.trim().is_empty() {
        return Err(AppError::InvalidInput("Mod name must not be empty".to_string()));
    }

    let id = request.id.unwrap_or_else(|| Uuid::new_v4().to_string());
    let item = Mod {
        id,
        name: request.name,
        description: request.description,
        author: request.author,
        version: request.version,
        categories: request.categories,
        tags: request.tags,
        downloads: 0,
        created_at: Utc::now(),
    };

    let mut inner = state.inner.write().await;
    if inner.find_mod(&item.id).is_some() {
        return Err(AppError::InvalidInput(format!("Mod {} already exists", item.id)));
    }
    inner.catalog.push(item.clone());

    tracing::info!(request_id = %request_id, mod_id = %item.id, "Mod submitted");
    Ok((StatusCode::CREATED, Json(item)))
}

/// Get a single mod
pub async fn get_mod(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Mod>> {
    let inner = state.inner.read().await;
    inner
        .find_mod(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| mod_not_found(&id))
}

/// Record that a user downloaded a mod
pub async fn record_download(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<DownloadRequest>,
) -> AppResult<Json<Mod>> {
    let mut guard = state.inner.write().await;
    let inner = &mut *guard;

    let item = inner
        .catalog
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or_else(|| mod_not_found(&id))?;
    let user = inner
        .users
        .get_mut(&request.user_id)
        .ok_or_else(|| user_not_found(&request.user_id))?;

    if user.record_download(&item.id) {
        item.downloads += 1;
    }

    Ok(Json(item.clone()))
}

/// Rate a mod on behalf of a user
pub async fn rate_mod(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RateRequest>,
) -> AppResult<Json<Rating>> {
    if !(1..=5).contains(&request.rating) {
        return Err(AppError::InvalidInput(format!(
            "Rating must be between 1 and 5, got {}",
            request.rating
        )));
    }

    let mut inner = state.inner.write().await;
    if inner.find_mod(&id).is_none() {
        return Err(mod_not_found(&id));
    }
    let user = inner
        .users
        .get_mut(&request.user_id)
        .ok_or_else(|| user_not_found(&request.user_id))?;

    user.rate(&id, request.rating, request.review);
    let rating = user
        .rating_for(&id)
        .cloned()
        .ok_or_else(|| AppError::Internal("Rating missing after write".to_string()))?;
    Ok(Json(rating))
}

/// Create a user profile
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    if request.username.trim().is_empty() {
        return Err(AppError::InvalidInput("Username must not be empty".to_string()));
    }

    let id = request.id.unwrap_or_else(|| Uuid::new_v4().to_string());
    let mut user = User::new(id, request.username);
    user.bio = request.bio;
    user.preferences = request.preferences;

    let mut inner = state.inner.write().await;
    if inner.users.contains_key(&user.id) {
        return Err(AppError::InvalidInput(format!("User {} already exists", user.id)));
    }
    inner.users.insert(user.id.clone(), user.clone());

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user profile
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let inner = state.inner.read().await;
    inner
        .users
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| user_not_found(&id))
}

/// Edit a user's username and bio
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> AppResult<Json<User>> {
    if request.username.trim().is_empty() {
        return Err(AppError::InvalidInput("Username must not be empty".to_string()));
    }

    let mut inner = state.inner.write().await;
    let user = inner.users.get_mut(&id).ok_or_else(|| user_not_found(&id))?;
    user.username = request.username;
    user.bio = request.bio;
    Ok(Json(user.clone()))
}

/// Replace a user's category and tag preferences
pub async fn update_preferences(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(preferences): Json<UserPreferences>,
) -> AppResult<Json<User>> {
    let mut inner = state.inner.write().await;
    let user = inner.users.get_mut(&id).ok_or_else(|| user_not_found(&id))?;
    user.preferences = preferences;
    Ok(Json(user.clone()))
}

/// Rank the whole catalog for a user against the supplied cohort
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Vec<Recommendation>>> {
    tracing::info!(
        request_id = %request_id,
        user_id = %request.user_id,
        cohort_size = request.similar_user_ids.len(),
        "Processing recommendation request"
    );

    let inner = state.inner.read().await;
    let user = inner
        .users
        .get(&request.user_id)
        .ok_or_else(|| user_not_found(&request.user_id))?;

    let cohort = request
        .similar_user_ids
        .iter()
        .map(|id| inner.users.get(id).cloned().ok_or_else(|| user_not_found(id)))
        .collect::<AppResult<Vec<User>>>()?;

    let mut ranked = recommendations::recommend(user, &inner.catalog, &cohort);
    if let Some(limit) = request.limit {
        ranked.truncate(limit);
    }

    tracing::info!(
        request_id = %request_id,
        returned = ranked.len(),
        "Recommendations completed"
    );

    Ok(Json(ranked))
}

/// Forward a prompt to the chat assistant
pub async fn ask_assistant(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<AssistantRequest>,
) -> AppResult<Json<AssistantResponse>> {
    let backend = state
        .assistant
        .as_ref()
        .ok_or_else(|| AppError::Unavailable("Assistant is not configured".to_string()))?;

    tracing::info!(request_id = %request_id, backend = backend.name(), "Processing assistant prompt");

    let reply = assistant::ask(backend.as_ref(), &request.prompt).await?;
    Ok(Json(AssistantResponse { reply }))
}
