use crate::{
    app_state::AppState,
    auth::{AuthenticatedUserId, LoginRequest, RegisterRequest},
    error::AppError,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns its profile.
///
/// ## Responses:
/// - `201 Created`: The new user's profile.
/// - `400 Bad Request`: Validation failure, or the username or email is taken.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let created = state.auth.register(
        &register_data.username,
        &register_data.email,
        &register_data.password,
    )?;

    Ok(HttpResponse::Created().json(created))
}

/// Login user
///
/// Authenticates a user and returns a bearer token, its expiry and the user's profile.
///
/// ## Responses:
/// - `200 OK`: `{ token, expires, user }`.
/// - `400 Bad Request`: Username or password missing.
/// - `401 Unauthorized`: Unknown username or wrong password.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let response = state.auth.login(&login_data.username, &login_data.password)?;
    Ok(HttpResponse::Ok().json(response))
}

/// Profile of the authenticated user.
#[get("/profile")]
pub async fn profile(
    state: web::Data<AppState>,
    user_id: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    match state.auth.get_profile(user_id.0)? {
        Some(found) => Ok(HttpResponse::Ok().json(found)),
        None => Err(AppError::NotFound("User not found.".into())),
    }
}
