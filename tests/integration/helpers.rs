//! Shared test helpers for integration tests.
//!
//! [`MockServer`] serves the file store's REST API over a real socket,
//! backed by a [`MemoryGateway`] so tests can seed entries, inject
//! failures and count calls.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::Value;

use drive_core::config::server::ServerConfig;
use drive_core::error::AppError;
use drive_entity::EntryId;
use drive_entity::file::wire::{ApiResponse, FileDto, LoginData, LoginRequest};
use drive_gateway::{Blob, HttpGateway, MemoryGateway, MutationGateway};

/// Token accepted by the mock server.
pub const TOKEN: &str = "test-token";
/// Credentials accepted by the login endpoint.
pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "secret";

type Failure = (StatusCode, Json<ApiResponse<Value>>);
type Reply<T> = Result<Json<ApiResponse<T>>, Failure>;

#[derive(Clone)]
struct MockState {
    store: MemoryGateway,
    token: Arc<String>,
}

/// A running mock file store.
pub struct MockServer {
    /// Base URL, e.g. `http://127.0.0.1:41234`.
    pub base_url: String,
    /// Backing store.
    pub store: MemoryGateway,
}

impl MockServer {
    /// Start a server on an ephemeral port.
    pub async fn start() -> Self {
        let store = MemoryGateway::new();
        let state = MockState {
            store: store.clone(),
            token: Arc::new(TOKEN.to_string()),
        };

        let router = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/files", get(list))
            .route("/api/files/upload", post(upload))
            .route("/api/files/download/{id}", get(download))
            .route("/api/files/{id}", delete(remove))
            .route("/api/files/folder", post(create_folder))
            .route("/api/files/rename/{id}", put(rename))
            .route("/api/files/move/{id}", put(move_entry))
            .route("/api/files/preview/{id}", get(preview))
            .with_state(state);

        Self {
            base_url: spawn_router(router).await,
            store,
        }
    }

    /// Server settings pointing at this server.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            base_url: self.base_url.clone(),
            request_timeout_seconds: 10,
            connect_timeout_seconds: 5,
        }
    }

    /// Gateway authenticated with the accepted token.
    pub fn gateway(&self) -> HttpGateway {
        HttpGateway::new(&self.server_config(), Some(TOKEN.to_string())).expect("gateway")
    }

    /// Gateway with no token.
    pub fn anonymous_gateway(&self) -> HttpGateway {
        HttpGateway::new(&self.server_config(), None).expect("gateway")
    }
}

/// Serve any router on an ephemeral port and return its base URL.
pub async fn spawn_router(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{addr}")
}

fn failure(status: StatusCode, message: impl Into<String>) -> Failure {
    (status, Json(ApiResponse::error(message)))
}

fn store_failure(err: AppError) -> Failure {
    failure(StatusCode::BAD_REQUEST, err.message)
}

fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Failure> {
    let expected = format!("Bearer {}", state.token);
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(failure(StatusCode::UNAUTHORIZED, "Unauthorized")),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParentQuery {
    parent_id: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FolderForm {
    folder_name: String,
    parent_id: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenameQuery {
    new_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveQuery {
    target_folder_id: Option<i64>,
}

async fn login(Json(request): Json<LoginRequest>) -> Reply<LoginData> {
    if request.username == USERNAME && request.password == PASSWORD {
        Ok(Json(ApiResponse::ok(
            "Login successful",
            LoginData {
                token: TOKEN.to_string(),
                username: request.username,
                email: None,
            },
        )))
    } else {
        Err(failure(StatusCode::UNAUTHORIZED, "Invalid username or password"))
    }
}

async fn list(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(query): Query<ParentQuery>,
) -> Reply<Vec<FileDto>> {
    authorize(&state, &headers)?;
    let entries = state
        .store
        .list(query.parent_id.map(EntryId))
        .await
        .map_err(store_failure)?;
    Ok(Json(ApiResponse::ok(
        "Files retrieved",
        entries.iter().map(FileDto::from).collect(),
    )))
}

async fn upload(
    State(state): State<MockState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Reply<FileDto> {
    authorize(&state, &headers)?;

    let mut file: Option<(String, Bytes)> = None;
    let mut parent_id = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| failure(StatusCode::BAD_REQUEST, e.to_string()))?
    {
        match field.name().map(str::to_string).as_deref() {
            Some("file") => {
                let name = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| failure(StatusCode::BAD_REQUEST, e.to_string()))?;
                file = Some((name, data));
            }
            Some("parentId") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| failure(StatusCode::BAD_REQUEST, e.to_string()))?;
                parent_id = text.trim().parse::<i64>().ok().map(EntryId);
            }
            _ => {}
        }
    }

    let (name, data) = file.ok_or_else(|| failure(StatusCode::BAD_REQUEST, "Missing file"))?;
    let entry = state
        .store
        .upload(Blob::Bytes(data), &name, parent_id)
        .await
        .map_err(store_failure)?;
    Ok(Json(ApiResponse::ok("File uploaded", FileDto::from(&entry))))
}

async fn download(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Response, Failure> {
    authorize(&state, &headers)?;
    let stream = state
        .store
        .download(EntryId(id))
        .await
        .map_err(|e| failure(StatusCode::NOT_FOUND, e.message))?;
    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        Body::from_stream(stream),
    )
        .into_response())
}

async fn remove(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Reply<Value> {
    authorize(&state, &headers)?;
    state.store.delete(EntryId(id)).await.map_err(store_failure)?;
    Ok(Json(ApiResponse {
        success: true,
        message: "Deleted".to_string(),
        data: None,
    }))
}

async fn create_folder(
    State(state): State<MockState>,
    headers: HeaderMap,
    Form(form): Form<FolderForm>,
) -> Reply<FileDto> {
    authorize(&state, &headers)?;
    let folder = state
        .store
        .create_folder(&form.folder_name, form.parent_id.map(EntryId))
        .await
        .map_err(store_failure)?;
    Ok(Json(ApiResponse::ok("Folder created", FileDto::from(&folder))))
}

async fn rename(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(query): Query<RenameQuery>,
) -> Reply<FileDto> {
    authorize(&state, &headers)?;
    let entry = state
        .store
        .rename(EntryId(id), &query.new_name)
        .await
        .map_err(store_failure)?;
    Ok(Json(ApiResponse::ok("Renamed", FileDto::from(&entry))))
}

async fn move_entry(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(query): Query<MoveQuery>,
) -> Reply<FileDto> {
    authorize(&state, &headers)?;
    let entry = state
        .store
        .move_entry(EntryId(id), query.target_folder_id.map(EntryId))
        .await
        .map_err(store_failure)?;
    Ok(Json(ApiResponse::ok("Moved", FileDto::from(&entry))))
}

async fn preview(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Reply<String> {
    authorize(&state, &headers)?;
    let text = state
        .store
        .preview(EntryId(id))
        .await
        .map_err(store_failure)?;
    Ok(Json(ApiResponse::ok("Preview", text)))
}
