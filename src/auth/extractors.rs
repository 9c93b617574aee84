use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// Extracts the authenticated user's id from the claims `AuthMiddleware` stored
/// in the request extensions.
///
/// Fails with `AppError::Unauthorized` if no claims are present or the subject is
/// not a numeric user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUserId(pub i32);

impl FromRequest for AuthenticatedUserId {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user_id = req.extensions().get::<Claims>().and_then(Claims::user_id);
        match user_id {
            Some(user_id) => ready(Ok(AuthenticatedUserId(user_id))),
            None => {
                let err = AppError::Unauthorized("User identity not found in request.".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
