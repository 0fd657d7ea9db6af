//! Shared helpers for driving the router in-process
#![allow(dead_code)]

use api::{
    AppState,
    jwt::{JwtConfig, JwtService},
    models::{CreateUserRequest, NewUser, User},
    routes::create_router,
};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

pub const SAMPLE_SIZE: usize = 5;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let jwt_service = JwtService::new(JwtConfig {
            secret: "integration-test-secret".to_string(),
            token_expiry: 3600,
        });
        let state = AppState::in_memory(jwt_service, SAMPLE_SIZE);

        Self {
            router: create_router(state.clone()),
            state,
        }
    }

    /// Insert a user straight into the store and mint a token for them
    pub async fn user_with_token(&self, email: &str, user_type: &str) -> (User, String) {
        let new_user = NewUser::try_from(CreateUserRequest {
            username: Some(email.split('@').next().unwrap_or("user").to_string()),
            email: Some(email.to_string()),
            password: Some("$argon2id$v=19$m=19456,t=2,p=1$stub".to_string()),
            user_type: Some(user_type.to_string()),
            ..Default::default()
        })
        .expect("valid user");

        let user = self.state.user_store.create(new_user).await.expect("user created");
        let token = self.state.jwt_service.generate_token(&user).expect("token");
        (user, token)
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.send_raw(method, uri, token, body.map(|json| json.to_string()))
            .await
    }

    /// Like `send`, but the body goes out exactly as given
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(raw) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(raw)),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };

        (status, value)
    }
}

pub fn restaurant_payload(code: &str) -> Value {
    serde_json::json!({
        "title": "Mama's Kitchen",
        "time": "25 min",
        "imageUrl": "https://cdn.foodl.io/r/1.png",
        "logoUrl": "https://cdn.foodl.io/r/1-logo.png",
        "code": code,
        "coords": {
            "latitude": 37.7749,
            "longitude": -122.4194,
            "address": "1 Market St",
            "title": "Mama's Kitchen"
        }
    })
}
