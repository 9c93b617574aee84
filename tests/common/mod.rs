#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web};
use serde_json::json;
use taskdesk::auth::LoginResponse;
use taskdesk::{AppState, Config};

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

// Helper struct to hold auth details
pub struct TestUser {
    pub id: i32,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.token))
    }
}

/// Configuration with the cheapest bcrypt cost so tests stay fast.
pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "JWT_SECRET" => Some(TEST_SECRET.to_string()),
        "BCRYPT_COST" => Some("4".to_string()),
        _ => None,
    })
    .expect("test configuration is valid")
}

pub fn test_state() -> web::Data<AppState> {
    web::Data::new(AppState::in_memory(&test_config()).expect("state builds"))
}

pub async fn register_and_login<S, B>(
    app: &S,
    username: &str,
    email: &str,
    password: &str,
) -> Result<TestUser, String>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req_register = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": username,
            "email": email,
            "password": password
        }))
        .to_request();
    let resp_register = test::call_service(app, req_register).await;
    let status = resp_register.status();
    if !status.is_success() {
        let body = test::read_body(resp_register).await;
        return Err(format!(
            "Failed to register user. Status: {}. Body: {}",
            status,
            String::from_utf8_lossy(&body)
        ));
    }

    let req_login = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let resp_login = test::call_service(app, req_login).await;
    let status = resp_login.status();
    let body = test::read_body(resp_login).await;
    if !status.is_success() {
        return Err(format!(
            "Failed to log in. Status: {}. Body: {}",
            status,
            String::from_utf8_lossy(&body)
        ));
    }

    let login: LoginResponse = serde_json::from_slice(&body)
        .map_err(|e| format!("Failed to parse login response: {}", e))?;
    Ok(TestUser {
        id: login.user.id,
        token: login.token,
    })
}
