// common/tests/lib.rs
use serde_json::json;
use login_common::{AccountSummary, LoginResponse, RegisterRequest};

#[test]
fn test_register_request_missing_tos_is_unchecked() {
    let body = json!({
        "username": "alice",
        "email": "alice@example.com",
        "password": "Secret123",
        "confirm": "Secret123",
    });

    let request: RegisterRequest = serde_json::from_value(body).unwrap();

    assert_eq!(request.username, "alice");
    assert!(!request.accept_tos);
}

#[test]
fn test_register_request_rejects_missing_field() {
    let body = json!({
        "username": "alice",
        "password": "Secret123",
        "confirm": "Secret123",
        "accept_tos": true,
    });

    assert!(serde_json::from_value::<RegisterRequest>(body).is_err());
}

#[test]
fn test_account_summary_shape() {
    let summary = AccountSummary {
        id: 7,
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
    };

    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(
        value,
        json!({ "id": 7, "username": "alice", "email": "alice@example.com" })
    );
}

#[test]
fn test_login_response_routes() {
    assert_eq!(LoginResponse::success().redirect, "/success");
    assert!(LoginResponse::success().authenticated);
    assert_eq!(LoginResponse::failure().redirect, "/fail");
    assert!(!LoginResponse::failure().authenticated);
}
