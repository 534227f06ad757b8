//! End-to-end tests for the HTTP API

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use chrono::Duration;
use serde_json::{Value, json};
use std::sync::Arc;
use support_desk::api::{AppState, router};
use support_desk::auth::TokenIssuer;
use support_desk::core::Role;
use support_desk::services::{NewUser, UserService};
use support_desk::storage::FileStorage;
use tempfile::TempDir;
use tower::ServiceExt;

const PASSWORD: &str = "secret1";

struct TestApp {
    _temp_dir: TempDir,
    app: Router,
    users: UserService<FileStorage>,
}

impl TestApp {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage = Arc::new(FileStorage::open(temp_dir.path()).expect("Failed to open storage"));
        let state = AppState::new(
            Arc::clone(&storage),
            TokenIssuer::new("integration-secret", Duration::hours(1)),
        );
        Self {
            _temp_dir: temp_dir,
            app: router(state),
            users: UserService::new(storage),
        }
    }

    /// Register an account and log it in, returning `(user id, token)`
    async fn login_as(&self, name: &str, role: Role) -> (String, String) {
        let email = format!("{}@example.com", name.to_lowercase());
        self.users
            .register(NewUser {
                name: name.to_string(),
                email: email.clone(),
                password: PASSWORD.to_string(),
                role,
            })
            .expect("Failed to register user");

        let (status, body) = self
            .send(
                Method::POST,
                "/auth/login",
                None,
                Some(json!({ "email": email, "password": PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        (
            body["user"]["id"].as_str().unwrap().to_string(),
            body["token"].as_str().unwrap().to_string(),
        )
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}

fn ticket_body(title: &str) -> Value {
    json!({ "title": title, "description": "Something has been broken since Monday" })
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_missing_or_bad_token_is_401() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/tickets", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = app.send(Method::GET, "/tickets", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_failures_are_401() {
    let app = TestApp::new();
    app.login_as("una", Role::User).await;

    let (status, wrong) = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "una@example.com", "password": "wrong-one" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unknown) = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong, unknown);
}

#[tokio::test]
async fn test_ticket_lifecycle_scenario() {
    let app = TestApp::new();
    let (_, manager) = app.login_as("mia", Role::Manager).await;
    let (agent_id, agent) = app.login_as("sam", Role::Support).await;
    let (u1_id, u1) = app.login_as("una", Role::User).await;
    let (_, u2) = app.login_as("ugo", Role::User).await;

    let (status, ticket) = app
        .send(Method::POST, "/tickets", Some(&u1), Some(ticket_body("Cannot login")))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ticket["status"], "OPEN");
    assert_eq!(ticket["priority"], "MEDIUM");
    assert_eq!(ticket["createdBy"]["id"], u1_id.as_str());
    assert!(ticket["assignedTo"].is_null());
    let id = ticket["id"].as_str().unwrap().to_string();

    let (status, assigned) = app
        .send(
            Method::PATCH,
            &format!("/tickets/{id}/assign"),
            Some(&manager),
            Some(json!({ "assignedTo": agent_id })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assigned["assignedTo"]["role"], "SUPPORT");

    let (status, started) = app
        .send(
            Method::PATCH,
            &format!("/tickets/{id}/status"),
            Some(&agent),
            Some(json!({ "status": "IN_PROGRESS" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(started["status"], "IN_PROGRESS");

    let (status, body) = app
        .send(
            Method::PATCH,
            &format!("/tickets/{id}/status"),
            Some(&agent),
            Some(json!({ "status": "CLOSED" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid status transition from IN_PROGRESS to CLOSED");

    let (status, history) = app
        .send(Method::GET, &format!("/tickets/{id}/history"), Some(&u1), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["oldStatus"], "OPEN");
    assert_eq!(history[0]["newStatus"], "IN_PROGRESS");
    assert_eq!(history[0]["changedBy"]["id"], agent_id.as_str());

    let (status, _) = app.send(Method::GET, &format!("/tickets/{id}"), Some(&u1), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.send(Method::GET, &format!("/tickets/{id}"), Some(&u2), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_role_gates_and_status_codes() {
    let app = TestApp::new();
    let (_, manager) = app.login_as("mia", Role::Manager).await;
    let (_, agent) = app.login_as("sam", Role::Support).await;
    let (u1_id, u1) = app.login_as("una", Role::User).await;

    let (status, _) = app
        .send(Method::POST, "/tickets", Some(&agent), Some(ticket_body("Agent ticket")))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(Method::POST, "/tickets", Some(&u1), Some(json!({ "title": "Bug" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, ticket) = app
        .send(Method::POST, "/tickets", Some(&u1), Some(ticket_body("Cannot login")))
        .await;
    let id = ticket["id"].as_str().unwrap().to_string();

    // Unassigned support agent may not move the ticket
    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/tickets/{id}/status"),
            Some(&agent),
            Some(json!({ "status": "IN_PROGRESS" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(
            Method::PATCH,
            &format!("/tickets/{id}/assign"),
            Some(&manager),
            Some(json!({ "assignedTo": u1_id })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cannot assign ticket to USER role");

    let (status, _) = app.send(Method::GET, "/tickets/not-a-uuid", Some(&u1), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::DELETE, &format!("/tickets/{id}"), Some(&u1), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, body) = app
        .send(Method::DELETE, &format!("/tickets/{id}"), Some(&manager), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
    let (status, _) = app
        .send(Method::DELETE, &format!("/tickets/{id}"), Some(&manager), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_role_gate_runs_before_body_parsing() {
    let app = TestApp::new();
    let (_, support) = app.login_as("sam", Role::Support).await;
    let (_, user) = app.login_as("una", Role::User).await;
    let (_, manager) = app.login_as("mia", Role::Manager).await;

    let bad_ticket = json!({
        "title": "Printer jammed",
        "description": "Paper stuck in tray two",
        "priority": "URGENT"
    });
    let (status, _) = app
        .send(Method::POST, "/tickets", Some(&support), Some(bad_ticket.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // A role that may create still gets the body error
    let (status, _) = app
        .send(Method::POST, "/tickets", Some(&manager), Some(bad_ticket))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(
            Method::PATCH,
            "/tickets/not-a-ticket/assign",
            Some(&user),
            Some(json!({ "assignedTo": 42 })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            Method::PATCH,
            "/tickets/not-a-ticket/status",
            Some(&user),
            Some(json!({ "status": "SOLVED" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(Method::POST, "/users", Some(&support), Some(json!({ "name": "x" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_comment_flow() {
    let app = TestApp::new();
    let (_, manager) = app.login_as("mia", Role::Manager).await;
    let (_, u1) = app.login_as("una", Role::User).await;
    let (_, u2) = app.login_as("ugo", Role::User).await;

    let (_, ticket) = app
        .send(Method::POST, "/tickets", Some(&u1), Some(ticket_body("Printer on fire")))
        .await;
    let id = ticket["id"].as_str().unwrap().to_string();
    let comments_uri = format!("/tickets/{id}/comments");

    let (status, comment) = app
        .send(Method::POST, &comments_uri, Some(&u1), Some(json!({ "comment": " Help! " })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(comment["comment"], "Help!");
    assert_eq!(comment["user"]["name"], "una");
    let comment_id = comment["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .send(Method::POST, &comments_uri, Some(&u2), Some(json!({ "comment": "Me too" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(Method::POST, &comments_uri, Some(&u1), Some(json!({ "comment": "  " })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    app.send(Method::POST, &comments_uri, Some(&manager), Some(json!({ "comment": "On it" })))
        .await;
    let (status, listed) = app.send(Method::GET, &comments_uri, Some(&u1), None).await;
    assert_eq!(status, StatusCode::OK);
    let bodies: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["comment"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(bodies, vec!["Help!", "On it"]);

    let comment_uri = format!("/comments/{comment_id}");
    let (status, edited) = app
        .send(Method::PATCH, &comment_uri, Some(&u1), Some(json!({ "comment": "Fixed itself" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["comment"], "Fixed itself");

    let (status, _) = app.send(Method::DELETE, &comment_uri, Some(&u2), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.send(Method::DELETE, &comment_uri, Some(&manager), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.send(Method::DELETE, &comment_uri, Some(&manager), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_management() {
    let app = TestApp::new();
    let (_, manager) = app.login_as("mia", Role::Manager).await;
    let (_, agent) = app.login_as("sam", Role::Support).await;

    let new_user = json!({
        "name": "Nia",
        "email": "Nia@Example.com",
        "password": "secret1",
        "role": "SUPPORT",
    });

    let (status, _) = app.send(Method::POST, "/users", Some(&agent), Some(new_user.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = app
        .send(Method::POST, "/users", Some(&manager), Some(new_user.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["email"], "nia@example.com");
    assert!(created.get("passwordHash").is_none());
    assert!(created.get("password_hash").is_none());

    let (status, body) = app.send(Method::POST, "/users", Some(&manager), Some(new_user)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Duplicate field value: email");

    let (status, body) = app
        .send(
            Method::POST,
            "/users",
            Some(&manager),
            Some(json!({ "name": "X", "email": "x@example.com", "password": "secret1", "role": "ADMIN" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, listed) = app.send(Method::GET, "/users", Some(&manager), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 3);
}
