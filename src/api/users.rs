use axum::{
    Extension,
    extract::Path,
    http::{HeaderMap, StatusCode},
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::error;

use crate::{
    error::StoreError,
    types::{FavoriteStatus, User},
    utils,
};

use super::{AppState, Notice, current_user, session_token};

const USERNAME_MAX_LEN: usize = 50;
const PASSWORD_MIN_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// A user without the password hash.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            image_url: user.image_url.clone(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session: String,
    pub message: String,
    pub user: UserView,
}

#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub user: UserView,
    pub favorite_genres: Vec<String>,
    pub saved_genres: Vec<String>,
    pub disliked_genres: Vec<String>,
}

/// Body of a favorite-status update. `genre_id` may arrive as a number or a
/// numeric string; a missing or empty `favorite_status` clears the status.
#[derive(Debug, Deserialize)]
pub struct FavoriteStatusUpdate {
    pub genre_id: Value,
    pub favorite_status: Option<String>,
}

fn validate_signup(form: &SignupForm) -> Result<(), Notice> {
    let username = form.username.trim();
    if username.is_empty() || username.chars().count() > USERNAME_MAX_LEN {
        return Err(Notice::bad_request(format!(
            "Username is required and may have at most {} characters.",
            USERNAME_MAX_LEN
        )));
    }
    if !form.email.contains('@') {
        return Err(Notice::bad_request("Please enter a valid email address."));
    }
    if form.password.chars().count() < PASSWORD_MIN_LEN {
        return Err(Notice::bad_request(format!(
            "Password must have at least {} characters.",
            PASSWORD_MIN_LEN
        )));
    }
    Ok(())
}

async fn open_session(state: &AppState, user_id: u64) -> String {
    let token = utils::generate_session_token();
    state.sessions.lock().await.insert(token.clone(), user_id);
    token
}

pub async fn signup(
    Extension(state): Extension<AppState>,
    Json(form): Json<SignupForm>,
) -> Result<(StatusCode, Json<SessionView>), Notice> {
    validate_signup(&form)?;

    let registered = state
        .users
        .lock()
        .await
        .register(&form.username, &form.email, &form.password)
        .await;

    let user = match registered {
        Ok(user) => user,
        Err(StoreError::AlreadyTaken) => {
            return Err(Notice::new(
                StatusCode::CONFLICT,
                "Username or email already taken",
            ));
        }
        Err(e) => {
            error!(error = %e, "Sign-up failed");
            return Err(Notice::internal());
        }
    };

    let session = open_session(&state, user.id).await;
    Ok((
        StatusCode::CREATED,
        Json(SessionView {
            session,
            message: format!("Welcome, {}!", user.username),
            user: UserView::from(&user),
        }),
    ))
}

pub async fn login(
    Extension(state): Extension<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Json<SessionView>, Notice> {
    let user = state
        .users
        .lock()
        .await
        .authenticate(&form.username, &form.password)
        .map(UserView::from);

    let Some(user) = user else {
        return Err(Notice::new(
            StatusCode::UNAUTHORIZED,
            "Invalid username/password...",
        ));
    };

    let session = open_session(&state, user.id).await;
    Ok(Json(SessionView {
        session,
        message: format!("Hello, {}!", user.username),
        user,
    }))
}

pub async fn logout(headers: HeaderMap, Extension(state): Extension<AppState>) -> Json<Value> {
    if let Some(token) = session_token(&headers) {
        state.sessions.lock().await.remove(token);
    }

    Json(json!({ "message": "You've been logged out. See ya later" }))
}

pub async fn user_profile(
    Path(user_id): Path<u64>,
    headers: HeaderMap,
    Extension(state): Extension<AppState>,
) -> Result<Json<ProfileView>, Notice> {
    let Some(current) = current_user(&state, &headers).await else {
        return Err(Notice::login_required());
    };
    if current != user_id {
        return Err(Notice::new(
            StatusCode::FORBIDDEN,
            "Sorry. You can only view your own profile at this time.",
        ));
    }

    let user = state
        .users
        .lock()
        .await
        .get(user_id)
        .map(UserView::from)
        .ok_or_else(|| Notice::not_found("Sorry, we couldn't find that user."))?;

    let (favorite, saved, disliked) = {
        let preferences = state.preferences.lock().await;
        (
            preferences.genre_ids_with_status(user_id, FavoriteStatus::Favorite),
            preferences.genre_ids_with_status(user_id, FavoriteStatus::Save),
            preferences.genre_ids_with_status(user_id, FavoriteStatus::Dislike),
        )
    };

    let genres = state.genres.lock().await;
    let titles = |ids: Vec<u64>| -> Vec<String> {
        ids.into_iter()
            .filter_map(|id| genres.get(id).map(|g| g.title.clone()))
            .collect()
    };

    Ok(Json(ProfileView {
        user,
        favorite_genres: titles(favorite),
        saved_genres: titles(saved),
        disliked_genres: titles(disliked),
    }))
}

fn parse_genre_id(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

pub async fn update_genre_favorite_status(
    headers: HeaderMap,
    Extension(state): Extension<AppState>,
    Json(update): Json<FavoriteStatusUpdate>,
) -> Result<Json<Value>, Notice> {
    let Some(user_id) = current_user(&state, &headers).await else {
        return Err(Notice::login_required());
    };

    let genre_id = parse_genre_id(&update.genre_id)
        .ok_or_else(|| Notice::bad_request("Missing or invalid genre id."))?;

    let status = match update.favorite_status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(status) => Some(
            status
                .parse::<FavoriteStatus>()
                .map_err(|e| Notice::bad_request(e.to_string()))?,
        ),
    };

    if state.genres.lock().await.get(genre_id).is_none() {
        return Err(Notice::not_found(StoreError::UnknownGenre(genre_id).to_string()));
    }

    let mut preferences = state.preferences.lock().await;
    preferences.set_status(user_id, genre_id, status);
    if let Err(e) = preferences.persist().await {
        error!(user_id, genre_id, error = %e, "Failed to persist favorite status");
        return Err(Notice::internal());
    }

    Ok(Json(json!({ "message": "Update successful" })))
}
