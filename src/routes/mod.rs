pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::{error, web};

use crate::auth::AuthMiddleware;
use crate::error::AppError;

/// Registers the full route tree: `/health` plus the authenticated `/api` scope.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let message = match &err {
            error::JsonPayloadError::ContentType => "Expected an application/json body.".to_string(),
            other => format!("Malformed request body: {}", other),
        };
        AppError::BadRequest(message).into()
    }))
    .app_data(
        web::PathConfig::default()
            .error_handler(|_err, _req| AppError::NotFound("Resource not found".into()).into()),
    )
    .service(health::health)
    .service(
        web::scope("/api")
            .wrap(AuthMiddleware)
            .service(
                web::scope("/auth")
                    .service(auth::register)
                    .service(auth::login)
                    .service(auth::profile),
            )
            .service(
                web::scope("/tasks")
                    .service(tasks::get_tasks)
                    .service(tasks::create_task)
                    .service(tasks::get_task)
                    .service(tasks::update_task)
                    .service(tasks::patch_task)
                    .service(tasks::delete_task),
            ),
    );
}
