use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::api::errors::ApiError;
use crate::api::extractors::{JsonBody, UserId};
use crate::api::AppState;
use crate::domain::user::{NewUser, Password, User, UserChanges, Username};

const CREDENTIALS_REQUIRED: &str = "Username and password are required";

/// Request body for creating a user
///
/// Fields are optional here so a missing field yields the same 400 as an
/// empty one.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub active: Option<bool>,
}

/// Request body for updating a user; every field is optional
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub active: Option<bool>,
}

impl UpdateUserRequest {
    fn into_changes(self) -> Result<UserChanges, String> {
        Ok(UserChanges {
            username: self.username.map(Username::new).transpose()?,
            password: self.password.map(Password::new).transpose()?,
            active: self.active,
        })
    }
}

/// Public view of a user. Never carries the password.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: Username,
    pub active: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            active: user.active,
        }
    }
}

/// Response for writes that return the affected user
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub message: &'static str,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Create a new user
///
/// POST /users
#[instrument(skip(state, req))]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserEnvelope>), ApiError> {
    let (username, password) = match (req.username, req.password) {
        (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
            (username, password)
        }
        _ => return Err(ApiError::bad_request(CREDENTIALS_REQUIRED)),
    };

    let new_user = NewUser {
        username: Username::new(username).map_err(ApiError::bad_request)?,
        password: Password::new(password).map_err(ApiError::bad_request)?,
        active: req.active.unwrap_or(true),
    };

    let user = state.users.insert(new_user).await?;
    tracing::info!(user_id = user.id, "user created");

    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope {
            message: "User created successfully",
            user: UserResponse::from(&user),
        }),
    ))
}

/// List all users
///
/// GET /users
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.list_all().await?;

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// Get a user by ID
///
/// GET /users/:id
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(ApiError::user_not_found)?;

    Ok(Json(UserResponse::from(&user)))
}

/// Update a user; fields missing from the body keep their value
///
/// PUT /users/:id
#[instrument(skip(state, req))]
pub async fn update_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> Result<Json<UserEnvelope>, ApiError> {
    let changes = req.into_changes().map_err(ApiError::bad_request)?;

    let user = state
        .users
        .update(id, changes)
        .await?
        .ok_or_else(ApiError::user_not_found)?;
    tracing::info!(user_id = user.id, "user updated");

    Ok(Json(UserEnvelope {
        message: "User updated successfully",
        user: UserResponse::from(&user),
    }))
}

/// Delete a user
///
/// DELETE /users/:id
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.users.delete_by_id(id).await? {
        return Err(ApiError::user_not_found());
    }
    tracing::info!(user_id = id, "user deleted");

    Ok(Json(MessageResponse {
        message: "User deleted successfully",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_maps_present_fields_only() {
        let req: UpdateUserRequest = serde_json::from_str(r#"{"active": false}"#).unwrap();
        let changes = req.into_changes().unwrap();

        assert!(changes.username.is_none());
        assert!(changes.password.is_none());
        assert_eq!(changes.active, Some(false));
    }

    #[test]
    fn update_request_treats_null_as_absent() {
        let req: UpdateUserRequest =
            serde_json::from_str(r#"{"username": null, "active": true}"#).unwrap();
        let changes = req.into_changes().unwrap();

        assert!(changes.username.is_none());
        assert_eq!(changes.active, Some(true));
    }

    #[test]
    fn update_request_rejects_empty_username() {
        let req: UpdateUserRequest = serde_json::from_str(r#"{"username": ""}"#).unwrap();
        assert!(req.into_changes().is_err());
    }

    #[test]
    fn user_response_has_no_password() {
        let user = User {
            id: 7,
            username: Username::new("alice").unwrap(),
            password: Password::new("pw1").unwrap(),
            active: true,
        };

        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7, "username": "alice", "active": true}));
    }
}
