//! Integration tests for the file manager driving the HTTP gateway.

mod helpers;

use std::sync::Arc;

use drive_core::config::upload::UploadConfig;
use drive_core::error::ErrorKind;
use drive_gateway::GatewayOp;
use drive_manager::upload::local::dropped_from_path;
use drive_manager::{DispatchOutcome, FileManager, MenuAction, NoticeLevel, SelectedFile};

async fn connect(server: &helpers::MockServer, upload: UploadConfig) -> FileManager {
    let mut manager = FileManager::new(Arc::new(server.gateway()), upload);
    manager.refresh().await.unwrap();
    manager
}

#[tokio::test]
async fn test_browse_with_breadcrumbs() {
    let server = helpers::MockServer::start().await;
    let projects = server.store.seed_folder("projects", None);
    let alpha = server.store.seed_folder("alpha", Some(projects.id));
    server.store.seed_file("plan.md", "# plan", Some(alpha.id));

    let mut manager = connect(&server, UploadConfig::default()).await;
    let projects = manager.find("projects").cloned().unwrap();
    manager.open_folder(&projects).await.unwrap();
    let alpha = manager.find("alpha").cloned().unwrap();
    manager.open_folder(&alpha).await.unwrap();

    assert_eq!(manager.navigation().display_path(), "/projects/alpha");
    assert_eq!(manager.entries()[0].name, "plan.md");

    assert!(manager.navigate_to_breadcrumb(0).await.unwrap());
    assert_eq!(manager.current_folder_id(), Some(projects.id));
    assert!(manager.navigate_to_breadcrumb(-1).await.unwrap());
    assert!(manager.breadcrumbs().is_empty());
    assert_eq!(manager.entries().len(), 1);
}

#[tokio::test]
async fn test_drop_local_tree_with_failures() {
    let server = helpers::MockServer::start().await;
    server
        .store
        .fail_named(GatewayOp::Upload, "root/sub/b.txt", "Disk quota exceeded");

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("root");
    std::fs::create_dir_all(root.join("sub")).unwrap();
    std::fs::write(root.join("a.txt"), b"a").unwrap();
    std::fs::write(root.join("sub").join("b.txt"), b"b").unwrap();
    std::fs::write(root.join("sub").join("c.txt"), b"c").unwrap();

    let mut manager = connect(
        &server,
        UploadConfig {
            concurrency: 2,
            directory_page_size: 1,
            ..UploadConfig::default()
        },
    )
    .await;
    let lists_before = server.store.calls(GatewayOp::List);

    let item = dropped_from_path(&root, 1).await.unwrap();
    let result = manager.upload_drop(vec![item]).await.unwrap();

    assert_eq!((result.success_count, result.failure_count), (2, 1));
    assert_eq!(result.failures[0].relative_path, "root/sub/b.txt");
    assert_eq!(result.failures[0].message, "Disk quota exceeded");
    assert_eq!(server.store.calls(GatewayOp::Upload), 3);
    assert_eq!(server.store.calls(GatewayOp::List) - lists_before, 1);

    let uploaded_root = server.store.find("root", None).expect("root folder");
    let sub = server.store.find("sub", Some(uploaded_root.id)).expect("sub folder");
    assert!(server.store.find("a.txt", Some(uploaded_root.id)).is_some());
    assert!(server.store.find("c.txt", Some(sub.id)).is_some());
    assert!(server.store.find("b.txt", Some(sub.id)).is_none());
    assert_eq!(manager.notice().unwrap().level, NoticeLevel::Error);
}

#[tokio::test]
async fn test_selection_upload_all_succeed() {
    let server = helpers::MockServer::start().await;
    let mut manager = connect(&server, UploadConfig::default()).await;

    let result = manager
        .upload_selection(vec![
            SelectedFile::new("one.txt", "1"),
            SelectedFile::new("two.txt", "2"),
        ])
        .await
        .unwrap();

    assert!(result.all_succeeded());
    assert_eq!(manager.entries().len(), 2);
    assert_eq!(manager.notice().unwrap().text, "Uploaded 2 file(s)");
}

#[tokio::test]
async fn test_cut_and_paste_over_http() {
    let server = helpers::MockServer::start().await;
    let archive = server.store.seed_folder("archive", None);
    let old = server.store.seed_file("old.log", "log", None);

    let mut manager = connect(&server, UploadConfig::default()).await;
    let entry = manager.find("old.log").cloned().unwrap();
    manager.cut(&entry);
    manager.open_folder(&archive).await.unwrap();
    let moved = manager.paste().await.unwrap();

    assert_eq!(moved.id, old.id);
    assert_eq!(manager.entries().len(), 1);
    assert!(manager.clipboard().is_empty());
    assert_eq!(server.store.entry(old.id).unwrap().parent_id, Some(archive.id));
}

#[tokio::test]
async fn test_paste_into_own_subtree_stays_local() {
    let server = helpers::MockServer::start().await;
    let parent = server.store.seed_folder("parent", None);
    let child = server.store.seed_folder("child", Some(parent.id));

    let mut manager = connect(&server, UploadConfig::default()).await;
    manager.cut(&parent);
    manager.open_folder(&parent).await.unwrap();
    manager.open_folder(&child).await.unwrap();

    let err = manager.paste().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidDropTarget);
    assert_eq!(server.store.calls(GatewayOp::Move), 0);
    assert!(!manager.clipboard().is_empty());
}

#[tokio::test]
async fn test_failed_paste_keeps_clipboard() {
    let server = helpers::MockServer::start().await;
    server.store.seed_file("a.txt", "a", None);
    server.store.fail(GatewayOp::Move, "Target folder not found");

    let mut manager = connect(&server, UploadConfig::default()).await;
    let entry = manager.find("a.txt").cloned().unwrap();
    manager.cut(&entry);
    let lists_before = server.store.calls(GatewayOp::List);

    let err = manager.paste().await.unwrap_err();
    assert_eq!(err.message, "Target folder not found");
    assert_eq!(server.store.calls(GatewayOp::List), lists_before);
    assert_eq!(manager.clipboard().slot().unwrap().entry.id, entry.id);
    assert_eq!(
        manager.notice().unwrap().text,
        "Paste failed: Target folder not found"
    );
}

#[tokio::test]
async fn test_drag_move_over_http() {
    let server = helpers::MockServer::start().await;
    server.store.seed_folder("inbox", None);
    server.store.seed_file("mail.eml", "x", None);

    let mut manager = connect(&server, UploadConfig::default()).await;
    let file = manager.find("mail.eml").cloned().unwrap();
    let inbox = manager.find("inbox").cloned().unwrap();

    manager.drag_start(&file);
    manager.drag_over(&inbox);
    manager.drop_on(&inbox).await.unwrap();

    assert_eq!(manager.entries().len(), 1);
    assert_eq!(manager.entries()[0].id, inbox.id);
    assert!(manager.drag().session().is_none());
}

#[tokio::test]
async fn test_menu_rename_and_delete() {
    let server = helpers::MockServer::start().await;
    server.store.seed_file("draft.txt", "x", None);

    let mut manager = connect(&server, UploadConfig::default()).await;
    let file = manager.find("draft.txt").cloned().unwrap();

    manager.open_menu(10, 10, Some(&file));
    let outcome = manager.dispatch(MenuAction::Rename).await.unwrap();
    assert!(matches!(outcome, DispatchOutcome::RenameStarted(_)));

    manager.set_rename_draft("   ").unwrap();
    let err = manager.commit_rename().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::EmptyName);
    assert_eq!(server.store.calls(GatewayOp::Rename), 0);

    manager.set_rename_draft("final.txt").unwrap();
    manager.commit_rename().await.unwrap();
    let renamed = manager.find("final.txt").cloned().unwrap();

    manager.open_menu(10, 10, Some(&renamed));
    manager.dispatch(MenuAction::Delete).await.unwrap();
    assert!(manager.entries().is_empty());
    assert!(server.store.is_empty());
}

#[tokio::test]
async fn test_preview_rules() {
    let server = helpers::MockServer::start().await;
    server.store.seed_file("diagram.png", "png", None);
    server.store.seed_file("config.yaml", "key: value\n", None);

    let mut manager = connect(&server, UploadConfig::default()).await;
    let image = manager.find("diagram.png").cloned().unwrap();
    let yaml = manager.find("config.yaml").cloned().unwrap();

    let err = manager.preview(&image).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotPreviewable);
    assert_eq!(server.store.calls(GatewayOp::Preview), 0);

    assert_eq!(manager.preview(&yaml).await.unwrap(), "key: value\n");
}
