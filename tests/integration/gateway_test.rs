//! Integration tests for the HTTP gateway against a mock file store.

mod helpers;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use futures::TryStreamExt;

use drive_core::error::ErrorKind;
use drive_entity::EntryId;
use drive_gateway::{Blob, GatewayOp, HttpGateway, MutationGateway};

#[tokio::test]
async fn test_list_maps_wire_entries() {
    let server = helpers::MockServer::start().await;
    let docs = server.store.seed_folder("docs", None);
    server.store.seed_file("report.pdf", "%PDF", None);
    server.store.seed_file("inner.txt", "inner", Some(docs.id));

    let gateway = server.gateway();
    let root = gateway.list(None).await.unwrap();
    assert_eq!(root.len(), 2);
    assert_eq!(root[0].name, "docs");
    assert!(root[0].is_folder);
    assert_eq!(root[0].mime_type, None);
    assert_eq!(root[1].name, "report.pdf");
    assert_eq!(root[1].mime_type.as_deref(), Some("application/pdf"));
    assert_eq!(root[1].size_bytes, 4);
    assert!(root[1].created_at.is_some());

    let inside = gateway.list(Some(docs.id)).await.unwrap();
    assert_eq!(inside.len(), 1);
    assert_eq!(inside[0].parent_id, Some(docs.id));
}

#[tokio::test]
async fn test_upload_relative_path_creates_folders() {
    let server = helpers::MockServer::start().await;
    let dest = server.store.seed_folder("dest", None);

    let entry = server
        .gateway()
        .upload(Blob::from("y"), "A/B/y.txt", Some(dest.id))
        .await
        .unwrap();
    assert_eq!(entry.name, "y.txt");

    let a = server.store.find("A", Some(dest.id)).expect("A created");
    let b = server.store.find("B", Some(a.id)).expect("B created");
    assert_eq!(entry.parent_id, Some(b.id));
}

#[tokio::test]
async fn test_upload_streams_local_file() {
    let server = helpers::MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.bin");
    let payload = vec![7u8; 256 * 1024];
    std::fs::write(&path, &payload).unwrap();

    let entry = server
        .gateway()
        .upload(Blob::File(path), "big.bin", None)
        .await
        .unwrap();
    assert_eq!(entry.size_bytes, payload.len() as u64);
    assert_eq!(server.store.content(entry.id).unwrap().len(), payload.len());
}

#[tokio::test]
async fn test_download_returns_bytes() {
    let server = helpers::MockServer::start().await;
    let file = server.store.seed_file("hello.txt", "hello world", None);

    let stream = server.gateway().download(file.id).await.unwrap();
    let chunks: Vec<_> = stream.try_collect().await.unwrap();
    assert_eq!(chunks.concat(), b"hello world");
}

#[tokio::test]
async fn test_download_missing_surfaces_message() {
    let server = helpers::MockServer::start().await;
    let err = match server.gateway().download(EntryId(404)).await {
        Ok(_) => panic!("download of a missing file succeeded"),
        Err(e) => e,
    };
    assert_eq!(err.kind, ErrorKind::Gateway);
    assert_eq!(err.message, "File not found");
}

#[tokio::test]
async fn test_mutations_round_trip() {
    let server = helpers::MockServer::start().await;
    let gateway = server.gateway();

    let folder = gateway.create_folder("reports", None).await.unwrap();
    assert!(folder.is_folder);

    let file = server.store.seed_file("q1.txt", "numbers", None);
    let renamed = gateway.rename(file.id, "q1-final.txt").await.unwrap();
    assert_eq!(renamed.name, "q1-final.txt");

    let moved = gateway.move_entry(file.id, Some(folder.id)).await.unwrap();
    assert_eq!(moved.parent_id, Some(folder.id));

    let back = gateway.move_entry(file.id, None).await.unwrap();
    assert_eq!(back.parent_id, None);

    gateway.delete(folder.id).await.unwrap();
    assert!(server.store.entry(folder.id).is_none());
    assert!(server.store.entry(file.id).is_some());
}

#[tokio::test]
async fn test_preview_text() {
    let server = helpers::MockServer::start().await;
    let file = server.store.seed_file("notes.md", "# Notes\n", None);
    let text = server.gateway().preview(file.id).await.unwrap();
    assert_eq!(text, "# Notes\n");
}

#[tokio::test]
async fn test_error_envelope_message_surfaces() {
    let server = helpers::MockServer::start().await;
    let file = server.store.seed_file("a.txt", "a", None);
    server.store.fail(GatewayOp::Move, "Target folder not found");

    let err = server
        .gateway()
        .move_entry(file.id, Some(EntryId(999)))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Gateway);
    assert_eq!(err.message, "Target folder not found");
}

#[tokio::test]
async fn test_missing_token_rejected() {
    let server = helpers::MockServer::start().await;
    let err = server.anonymous_gateway().list(None).await.unwrap_err();
    assert_eq!(err.message, "Unauthorized");
    assert_eq!(server.store.calls(GatewayOp::List), 0);
}

#[tokio::test]
async fn test_login() {
    let server = helpers::MockServer::start().await;
    let config = server.server_config();

    let login = HttpGateway::login(&config, helpers::USERNAME, helpers::PASSWORD)
        .await
        .unwrap();
    assert_eq!(login.token, helpers::TOKEN);
    assert_eq!(login.username, helpers::USERNAME);

    let err = HttpGateway::login(&config, helpers::USERNAME, "wrong")
        .await
        .unwrap_err();
    assert_eq!(err.message, "Invalid username or password");
}

#[tokio::test]
async fn test_non_json_error_falls_back_to_status() {
    let router = Router::new().route(
        "/api/files",
        get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let base_url = helpers::spawn_router(router).await;
    let config = drive_core::config::server::ServerConfig {
        base_url,
        ..Default::default()
    };

    let gateway = HttpGateway::new(&config, None).unwrap();
    let err = gateway.list(None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Gateway);
    assert_eq!(err.message, "list failed: HTTP 502 Bad Gateway");
}
