use crate::db::DownloadPatch;
use crate::error::{Error, LifecycleError};
use crate::lifecycle::test_helpers::{create_failing_manager, create_test_manager};
use crate::lifecycle::{CreateDownloadRequest, PENDING_TITLE};
use crate::resolver::ResolveRequest;
use crate::types::{DownloadId, Event, Platform, SettingsPatch, Status, UserId};

fn create_request(owner: Option<&str>) -> CreateDownloadRequest {
    CreateDownloadRequest {
        source_url: "https://youtu.be/abc".to_string(),
        platform: Platform::Youtube,
        format: "mp4".to_string(),
        quality: Some("720p".to_string()),
        owner: owner.map(|s| UserId(s.to_string())),
    }
}

fn resolve_request() -> ResolveRequest {
    ResolveRequest {
        source_url: "https://youtu.be/abc".to_string(),
        platform: Platform::Youtube,
        format: "mp4".to_string(),
        quality: Some("720p".to_string()),
    }
}

#[tokio::test]
async fn test_create_then_list_shows_pending_record() {
    let (manager, _temp_dir) = create_test_manager().await;
    let owner = UserId("user-1".to_string());

    let id = manager
        .create_download(create_request(Some("user-1")))
        .await
        .unwrap();

    let downloads = manager.list_downloads(Some(&owner)).await.unwrap();
    assert_eq!(downloads.len(), 1);
    assert_eq!(downloads[0].id, id);
    assert_eq!(downloads[0].status, Status::Pending);
    assert_eq!(downloads[0].title, PENDING_TITLE);
    assert_eq!(downloads[0].platform, Platform::Youtube);
    assert!(downloads[0].thumbnail_url.is_none());
    assert!(downloads[0].file_size_bytes.is_none());
}

#[tokio::test]
async fn test_list_for_anonymous_caller_is_empty() {
    let (manager, _temp_dir) = create_test_manager().await;

    // Anonymous submissions are accepted but never listed
    manager.create_download(create_request(None)).await.unwrap();

    let downloads = manager.list_downloads(None).await.unwrap();
    assert!(downloads.is_empty());
}

#[tokio::test]
async fn test_process_reaches_completed_with_metadata() {
    let (manager, _temp_dir) = create_test_manager().await;
    let owner = UserId("user-1".to_string());

    let id = manager
        .create_download(create_request(Some("user-1")))
        .await
        .unwrap();
    manager.process_download(id, resolve_request()).await.unwrap();

    let downloads = manager.list_downloads(Some(&owner)).await.unwrap();
    let record = &downloads[0];

    assert_eq!(record.status, Status::Completed);
    assert_eq!(record.title, "Amazing YouTube Video");
    assert!(record.thumbnail_url.is_some());
    assert!(record.result_url.is_none());

    let size = record.file_size_bytes.unwrap();
    assert!((1_000_000..51_000_000).contains(&size));

    let duration = record.duration_label.as_deref().unwrap();
    let (minutes, seconds) = duration.split_once(':').unwrap();
    assert!(minutes.parse::<u32>().is_ok());
    assert_eq!(seconds.len(), 2);
    assert!(seconds.parse::<u32>().unwrap() < 60);
}

#[tokio::test]
async fn test_process_failure_reaches_failed() {
    let (manager, _temp_dir) = create_failing_manager().await;
    let owner = UserId("user-1".to_string());

    let id = manager
        .create_download(create_request(Some("user-1")))
        .await
        .unwrap();

    // The resolver failure is absorbed into the record state
    manager.process_download(id, resolve_request()).await.unwrap();

    let downloads = manager.list_downloads(Some(&owner)).await.unwrap();
    assert_eq!(downloads[0].status, Status::Failed);
    // Other fields are left untouched by the failure path
    assert_eq!(downloads[0].title, PENDING_TITLE);
    assert!(downloads[0].file_size_bytes.is_none());
}

#[tokio::test]
async fn test_process_missing_record_propagates_not_found() {
    let (manager, _temp_dir) = create_test_manager().await;

    let err = manager
        .process_download(DownloadId(999), resolve_request())
        .await
        .unwrap_err();

    match err {
        Error::Lifecycle(LifecycleError::NotFound { id }) => assert_eq!(id, DownloadId(999)),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_update_rejects_backward_transition() {
    let (manager, _temp_dir) = create_test_manager().await;

    let id = manager
        .create_download(create_request(Some("user-1")))
        .await
        .unwrap();
    manager.process_download(id, resolve_request()).await.unwrap();

    // Completed records never go back to pending or processing
    for code in [Status::Pending, Status::Processing] {
        let err = manager
            .update_download(id, DownloadPatch::status_only(code.to_i32()))
            .await
            .unwrap_err();
        match err {
            Error::Lifecycle(LifecycleError::InvalidTransition { from, to, .. }) => {
                assert_eq!(from, Status::Completed);
                assert_eq!(to, code);
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_update_rejects_skipping_processing() {
    let (manager, _temp_dir) = create_test_manager().await;

    let id = manager
        .create_download(create_request(Some("user-1")))
        .await
        .unwrap();

    let err = manager
        .update_download(id, DownloadPatch::status_only(Status::Completed.to_i32()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Lifecycle(LifecycleError::InvalidTransition { .. })
    ));
}

#[tokio::test]
async fn test_update_without_status_merges_fields() {
    let (manager, _temp_dir) = create_test_manager().await;
    let owner = UserId("user-1".to_string());

    let id = manager
        .create_download(create_request(Some("user-1")))
        .await
        .unwrap();

    let patch = DownloadPatch {
        title: Some("Renamed".to_string()),
        ..DownloadPatch::default()
    };
    manager.update_download(id, patch).await.unwrap();

    let downloads = manager.list_downloads(Some(&owner)).await.unwrap();
    assert_eq!(downloads[0].title, "Renamed");
    assert_eq!(downloads[0].status, Status::Pending);
}

#[tokio::test]
async fn test_process_emits_lifecycle_events() {
    let (manager, _temp_dir) = create_test_manager().await;
    let mut events = manager.subscribe();

    let id = manager
        .create_download(create_request(Some("user-1")))
        .await
        .unwrap();
    manager.process_download(id, resolve_request()).await.unwrap();

    match events.recv().await.unwrap() {
        Event::Created { id: event_id, platform } => {
            assert_eq!(event_id, id);
            assert_eq!(platform, Platform::Youtube);
        }
        other => panic!("expected Created, got {other:?}"),
    }
    assert!(matches!(events.recv().await.unwrap(), Event::Processing { .. }));
    match events.recv().await.unwrap() {
        Event::Completed { title, .. } => assert_eq!(title, "Amazing YouTube Video"),
        other => panic!("expected Completed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_history_is_capped_and_newest_first() {
    let (manager, _temp_dir) = create_test_manager().await;
    let owner = UserId("user-1".to_string());

    for i in 0..55 {
        let mut request = create_request(Some("user-1"));
        request.source_url = format!("https://youtu.be/vid{}", i);
        manager.create_download(request).await.unwrap();
    }

    let downloads = manager.list_downloads(Some(&owner)).await.unwrap();
    assert_eq!(downloads.len(), 50);
    assert_eq!(downloads[0].source_url, "https://youtu.be/vid54");
}

#[tokio::test]
async fn test_settings_defaults_and_update() {
    let (manager, _temp_dir) = create_test_manager().await;
    let owner = UserId("user-1".to_string());

    let settings = manager.get_settings(Some(&owner)).await.unwrap();
    assert_eq!(settings.theme, "system");
    assert!(settings.auto_quality);

    let patch = SettingsPatch {
        theme: Some("dark".to_string()),
        notifications: Some(false),
        ..SettingsPatch::default()
    };
    let updated = manager.update_settings(Some(&owner), patch).await.unwrap();
    assert_eq!(updated.theme, "dark");
    assert!(!updated.notifications);
    // Unpatched fields keep their defaults
    assert_eq!(updated.language, "en");
    assert!(updated.auto_quality);

    let stored = manager.get_settings(Some(&owner)).await.unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn test_settings_update_requires_identity() {
    let (manager, _temp_dir) = create_test_manager().await;

    let err = manager
        .update_settings(None, SettingsPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized));

    // Reads fall back to defaults instead of erroring
    let settings = manager.get_settings(None).await.unwrap();
    assert_eq!(settings, crate::types::UserSettings::default());
}
