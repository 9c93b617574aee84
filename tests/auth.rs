mod common;

use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{test, App};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use taskdesk::routes;

use common::{register_and_login, test_state};

#[test_log::test(actix_rt::test)]
async fn test_register_and_login_flow() {
    let app = test::init_service(
        App::new()
            .app_data(test_state())
            .wrap(Logger::default())
            .configure(routes::config),
    )
    .await;

    let register_payload = json!({
        "username": "alice",
        "email": "a@x.com",
        "password": "Passw0rd"
    });
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let profile: Value = test::read_body_json(resp).await;
    assert_eq!(profile["username"], "alice");
    assert_eq!(profile["email"], "a@x.com");
    assert_eq!(profile["id"], 1);
    assert!(profile["createdAt"].is_string());
    assert!(profile.get("passwordHash").is_none());

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "alice", "password": "Passw0rd" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let login: Value = test::read_body_json(resp).await;
    let token = login["token"].as_str().unwrap_or_default();
    assert!(!token.is_empty(), "Token should be a non-empty string");
    assert!(login["expires"].is_string());
    assert_eq!(login["user"], profile);

    let req = test::TestRequest::get()
        .uri("/api/auth/profile")
        .append_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = test::read_body_json(resp).await;
    assert_eq!(fetched, profile);
}

#[actix_rt::test]
async fn test_duplicate_registration_is_rejected() {
    let app = test::init_service(App::new().app_data(test_state()).configure(routes::config)).await;

    register_and_login(&app, "alice", "a@x.com", "Passw0rd")
        .await
        .unwrap();

    let cases = vec![
        (
            json!({ "username": "ALICE", "email": "other@x.com", "password": "Passw0rd" }),
            "Username already exists.",
        ),
        (
            json!({ "username": "carol", "email": "A@X.COM", "password": "Passw0rd" }),
            "Email already exists.",
        ),
        (
            json!({ "username": "Alice", "email": "A@x.com", "password": "Passw0rd" }),
            "Username already exists.",
        ),
    ];

    for (payload, expected) in cases {
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload: {}", payload);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], expected);
        assert!(body["timestamp"].is_string());
    }
}

#[actix_rt::test]
async fn test_registration_ids_increase() {
    let app = test::init_service(App::new().app_data(test_state()).configure(routes::config)).await;

    let mut last_id = 0;
    for name in ["user_one", "user_two", "user_three"] {
        let user = register_and_login(&app, name, &format!("{}@x.com", name), "Passw0rd")
            .await
            .unwrap();
        assert!(user.id > last_id);
        last_id = user.id;
    }
}

#[actix_rt::test]
async fn test_invalid_registration_inputs() {
    let app = test::init_service(App::new().app_data(test_state()).configure(routes::config)).await;

    let test_cases = vec![
        (
            json!({ "username": "testuser", "email": "invalid-email", "password": "Passw0rd" }),
            "email",
        ),
        (
            json!({ "username": "tu", "email": "test@example.com", "password": "Passw0rd" }),
            "username",
        ),
        (
            json!({ "username": "a".repeat(51), "email": "test@example.com", "password": "Passw0rd" }),
            "username",
        ),
        (
            json!({ "username": "user name!", "email": "test@example.com", "password": "Passw0rd" }),
            "username",
        ),
        (
            json!({ "username": "testuser", "email": "test@example.com", "password": "Pw0rd" }),
            "password",
        ),
        (
            json!({ "username": "testuser", "email": "test@example.com", "password": "password1" }),
            "password",
        ),
        (json!({ "email": "test@example.com", "password": "Passw0rd" }), "username"),
    ];

    for (payload, property) in test_cases {
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload: {}", payload);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Validation failed");
        let properties: Vec<&str> = body["errors"]
            .as_array()
            .map(|errors| errors.iter().filter_map(|e| e["property"].as_str()).collect())
            .unwrap_or_default();
        assert!(
            properties.contains(&property),
            "expected an error on {} for {}, got {:?}",
            property,
            payload,
            properties
        );
    }
}

#[actix_rt::test]
async fn test_login_failures_are_indistinguishable() {
    let app = test::init_service(App::new().app_data(test_state()).configure(routes::config)).await;
    register_and_login(&app, "alice", "a@x.com", "Passw0rd")
        .await
        .unwrap();

    let mut messages = Vec::new();
    for payload in [
        json!({ "username": "alice", "password": "WrongPass1" }),
        json!({ "username": "nobody", "password": "Passw0rd" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        messages.push(body["error"].clone());
    }

    assert_eq!(messages[0], messages[1]);
    assert_eq!(messages[0], "Invalid username or password.");
}

#[actix_rt::test]
async fn test_login_requires_both_fields() {
    let app = test::init_service(App::new().app_data(test_state()).configure(routes::config)).await;

    register_and_login(&app, "alice", "a@x.com", "Passw0rd")
        .await
        .unwrap();

    let cases = vec![
        (json!({ "username": "alice", "password": "" }), "password", "Password is required."),
        (json!({ "username": "alice", "password": "   " }), "password", "Password is required."),
        (json!({ "username": "  ", "password": "Passw0rd" }), "username", "Username is required."),
        (json!({ "password": "Passw0rd" }), "username", "Username is required."),
    ];

    for (payload, property, message) in cases {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload: {}", payload);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["errors"][0]["property"], property);
        assert_eq!(body["errors"][0]["message"], message);
    }
}

#[actix_rt::test]
async fn test_malformed_json_is_bad_request() {
    let app = test::init_service(App::new().app_data(test_state()).configure(routes::config)).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_rt::test]
async fn test_profile_requires_valid_token() {
    let app = test::init_service(App::new().app_data(test_state()).configure(routes::config)).await;
    let user = register_and_login(&app, "alice", "a@x.com", "Passw0rd")
        .await
        .unwrap();

    let req = test::TestRequest::get().uri("/api/auth/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Swap one character inside the signature.
    let signature_start = user.token.rfind('.').unwrap() + 1;
    let target = signature_start + 5;
    let current = &user.token[target..target + 1];
    let replacement = if current == "x" { "y" } else { "x" };
    let tampered = format!(
        "{}{}{}",
        &user.token[..target],
        replacement,
        &user.token[target + 1..]
    );

    let req = test::TestRequest::get()
        .uri("/api/auth/profile")
        .append_header(("Authorization", format!("Bearer {}", tampered)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());

    let req = test::TestRequest::get()
        .uri("/api/auth/profile")
        .append_header(user.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_token_from_other_secret_is_rejected() {
    let app = test::init_service(App::new().app_data(test_state()).configure(routes::config)).await;
    register_and_login(&app, "alice", "a@x.com", "Passw0rd")
        .await
        .unwrap();

    let mut foreign = common::test_config();
    foreign.jwt.secret = "a-completely-different-secret-of-32b".to_string();
    let foreign_state = taskdesk::AppState::in_memory(&foreign).unwrap();
    let foreign_user = foreign_state
        .auth
        .register("alice", "a@x.com", "Passw0rd")
        .and_then(|_| foreign_state.auth.login("alice", "Passw0rd"))
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .append_header(("Authorization", format!("Bearer {}", foreign_user.token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_health_is_public() {
    let app = test::init_service(App::new().app_data(test_state()).configure(routes::config)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
