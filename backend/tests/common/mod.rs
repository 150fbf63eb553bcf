//! Shared helpers for the integration tests.
//!
//! Each test spins up the full router against an in-memory database and a
//! throwaway upload directory, then drives it with `tower::oneshot`
//! requests instead of binding a socket.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use homeward_backend::config::Config;
use homeward_backend::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "correct horse battery";
pub const TEST_BOUNDARY: &str = "homeward-test-boundary";

/// Enough of a PNG header to pass for binary image data.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _upload_dir: TempDir,
}

pub async fn spawn_app() -> TestApp {
    let upload_dir = tempfile::tempdir().expect("temp upload dir");
    let config = Config {
        database_url: "sqlite::memory:".into(),
        jwt_secret: TEST_SECRET.into(),
        host: "127.0.0.1".into(),
        port: 0,
        upload_dir: upload_dir.path().to_path_buf(),
        max_connections: 1,
        // Minimum cost keeps registration fast in tests.
        bcrypt_cost: 4,
    };
    let state = AppState::new(config).expect("app state");
    let router = app(state.clone());
    TestApp {
        router,
        state,
        _upload_dir: upload_dir,
    }
}

impl TestApp {
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("infallible router")
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn get_authed(&self, uri: &str, token: &str) -> Response {
        self.request(
            Request::builder()
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, token: Option<&str>, body: &Value) -> Response {
        self.send_json("POST", uri, token, body).await
    }

    pub async fn put_json(&self, uri: &str, token: Option<&str>, body: &Value) -> Response {
        self.send_json("PUT", uri, token, body).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Response {
        let mut builder = Request::builder().method("DELETE").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }

    async fn send_json(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: &Value,
    ) -> Response {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.request(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collected body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

/// Asserts the status and the `kind` discriminator of an error envelope,
/// returning the body for further checks.
pub async fn assert_error(response: Response, status: StatusCode, kind: &str) -> Value {
    assert_eq!(response.status(), status);
    let body = body_json(response).await;
    assert_eq!(body["kind"], kind, "unexpected error body: {body}");
    body
}

pub fn parse_id(value: &Value) -> Uuid {
    value
        .as_str()
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .unwrap_or_else(|| panic!("not a uuid: {value}"))
}

pub async fn login(app: &TestApp, email: &str) -> String {
    let response = app
        .post_json(
            "/api/auth/login",
            None,
            &json!({ "email": email, "password": TEST_PASSWORD }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    body["token"].as_str().expect("token").to_owned()
}

pub async fn register_super_admin(app: &TestApp, email: &str) -> String {
    let response = app
        .post_json(
            "/api/auth/register",
            None,
            &json!({
                "email": email,
                "password": TEST_PASSWORD,
                "role": "super-admin",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    login(app, email).await
}

pub async fn register_shelter_admin(app: &TestApp, email: &str, shelter_id: Uuid) -> String {
    let response = app
        .post_json(
            "/api/auth/register",
            None,
            &json!({
                "email": email,
                "password": TEST_PASSWORD,
                "shelterRef": shelter_id,
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    login(app, email).await
}

pub async fn create_shelter(app: &TestApp, token: &str, name: &str) -> Uuid {
    let response = app
        .post_json(
            "/api/shelters",
            Some(token),
            &json!({ "name": name, "location": "Springfield" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    parse_id(&body_json(response).await["id"])
}

/// Encodes a multipart form with the given text fields and file parts
/// under the fixed test boundary. File parts are always named `image`.
pub fn multipart_body(fields: &[(&str, &str)], images: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{TEST_BOUNDARY}\r\nContent-Disposition: form-data; \
                 name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (file_name, content_type, bytes) in images {
        body.extend_from_slice(
            format!(
                "--{TEST_BOUNDARY}\r\nContent-Disposition: form-data; \
                 name=\"image\"; filename=\"{file_name}\"\r\n\
                 Content-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{TEST_BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(app: &TestApp, uri: &str, token: &str, body: Vec<u8>) -> Response {
    app.request(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={TEST_BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

/// Lists a pet through the API and returns its JSON representation.
pub async fn create_pet(app: &TestApp, token: &str, name: &str, species: &str) -> Value {
    let body = multipart_body(
        &[
            ("name", name),
            ("species", species),
            ("description", "a lovely companion"),
        ],
        &[("photo.png", "image/png", PNG_BYTES)],
    );
    let response = post_multipart(app, "/api/pets", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
