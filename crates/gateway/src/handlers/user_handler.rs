//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, MethodRouter},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::{ApiResponse, AppError, AppResult};
use domain::{
    parse_user_id, CreateUser, UpdateUser, User, UserId, ENTITY_USER, MSG_USER_CREATED,
    MSG_USER_DELETED, MSG_USER_UPDATED,
};

use crate::extractors::ValidatedJson;
use crate::handlers::route_not_found;
use crate::state::AppState;

/// User creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Display name
    #[validate(length(min = 1, message = "Name and email are required"))]
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    /// Email address, unique across users
    #[validate(length(min = 1, message = "Name and email are required"))]
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = 36)]
    pub age: Option<i32>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(req: CreateUserRequest) -> Self {
        CreateUser {
            name: req.name,
            email: req.email,
            age: req.age,
        }
    }
}

/// Partial user update; omitted or null fields keep their value.
///
/// Field rules are checked by the service once the user is known to exist.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[schema(example = "Ada King")]
    pub name: Option<String>,
    pub email: Option<String>,
    #[schema(example = 37)]
    pub age: Option<i32>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        UpdateUser {
            name: req.name,
            email: req.email,
            age: req.age,
        }
    }
}

/// Create user routes.
///
/// Paths are also served with a trailing slash.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", collection())
        .route("/users/", collection())
        .route("/users/:id", member())
        .route("/users/:id/", member())
}

fn collection() -> MethodRouter<AppState> {
    get(list_users)
        .post(create_user)
        .fallback(route_not_found)
}

fn member() -> MethodRouter<AppState> {
    get(get_user)
        .put(update_user)
        .delete(delete_user)
        .fallback(route_not_found)
}

/// Ids that are not integers can never match a row
fn user_id(raw: &str) -> AppResult<UserId> {
    parse_user_id(raw).ok_or_else(|| AppError::not_found(ENTITY_USER))
}

/// List all users, newest first
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users with their count", body = Vec<User>),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<User>>>> {
    let users = state.users.list_users().await?;
    Ok(Json(ApiResponse::list(users)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<User>>> {
    let user = state.users.get_user(user_id(&id)?).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = User),
        (status = 400, description = "Missing name or email, or email already exists")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    let user = state.users.create_user(payload.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(user, MSG_USER_CREATED)),
    ))
}

/// Update the supplied fields of a user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = User),
        (status = 400, description = "Empty field or email already exists"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let user = state
        .users
        .update_user(user_id(&id)?, payload.into())
        .await?;
    Ok(Json(ApiResponse::with_message(user, MSG_USER_UPDATED)))
}

/// Permanently delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted successfully"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.users.delete_user(user_id(&id)?).await?;
    Ok(Json(ApiResponse::message(MSG_USER_DELETED)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_rejects_empty_fields() {
        let req: CreateUserRequest =
            serde_json::from_str(r#"{"name": "", "email": "ada@example.com"}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_request_leaves_missing_fields_to_the_service() {
        let req: CreateUserRequest = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
        assert!(req.validate().is_ok());
        assert!(CreateUser::from(req).validate().is_err());
    }

    #[test]
    fn update_request_treats_null_as_absent() {
        let req: UpdateUserRequest =
            serde_json::from_str(r#"{"name": null, "age": 37}"#).unwrap();
        assert!(req.validate().is_ok());

        let changes = UpdateUser::from(req);
        assert_eq!(changes.name, None);
        assert_eq!(changes.age, Some(37));
    }

    #[test]
    fn update_request_leaves_empty_fields_to_the_service() {
        let req: UpdateUserRequest = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert!(req.validate().is_ok());
        assert!(UpdateUser::from(req).validate().is_err());
    }

    #[test]
    fn non_numeric_id_is_not_found() {
        assert!(matches!(user_id("abc"), Err(AppError::NotFound(_))));
        assert!(matches!(user_id("+42"), Err(AppError::NotFound(_))));
        assert_eq!(user_id("42").unwrap(), 42);
    }
}
