use crate::db::*;
use crate::types::DownloadId;
use tempfile::NamedTempFile;

fn sample_download(user_id: Option<&str>, url: &str) -> NewDownload {
    NewDownload {
        user_id: user_id.map(|s| s.to_string()),
        source_url: url.to_string(),
        platform: "youtube".to_string(),
        title: "Processing...".to_string(),
        format: "mp4".to_string(),
        quality: Some("720p".to_string()),
        status: 0, // Pending
    }
}

#[tokio::test]
async fn test_insert_and_get_download() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    let new_download = sample_download(Some("user-1"), "https://youtu.be/abc");
    let id = db.insert_download(&new_download).await.unwrap();
    assert!(id.0 > 0);

    let row = db.get_download(id).await.unwrap().unwrap();
    assert_eq!(row.user_id.as_deref(), Some("user-1"));
    assert_eq!(row.source_url, "https://youtu.be/abc");
    assert_eq!(row.platform, "youtube");
    assert_eq!(row.title, "Processing...");
    assert_eq!(row.status, 0);
    assert!(row.thumbnail_url.is_none());
    assert!(row.result_url.is_none());
    assert!(row.file_size_bytes.is_none());
    assert!(row.duration_label.is_none());
    assert!(row.created_at > 0);

    db.close().await;
}

#[tokio::test]
async fn test_get_missing_download() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    let row = db.get_download(DownloadId(9999)).await.unwrap();
    assert!(row.is_none());

    db.close().await;
}

#[tokio::test]
async fn test_patch_download_partial_merge() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    let id = db
        .insert_download(&sample_download(Some("user-1"), "https://youtu.be/abc"))
        .await
        .unwrap();

    // Patch only the status; everything else must survive
    db.patch_download(id, &DownloadPatch::status_only(1))
        .await
        .unwrap();

    let row = db.get_download(id).await.unwrap().unwrap();
    assert_eq!(row.status, 1);
    assert_eq!(row.title, "Processing...");
    assert!(row.thumbnail_url.is_none());

    // Patch completion fields in one go
    let patch = DownloadPatch {
        title: Some("Amazing YouTube Video".to_string()),
        thumbnail_url: Some("https://picsum.photos/320/180?random=5".to_string()),
        status: Some(2),
        result_url: None,
        file_size_bytes: Some(12_345_678),
        duration_label: Some("3:07".to_string()),
    };
    db.patch_download(id, &patch).await.unwrap();

    let row = db.get_download(id).await.unwrap().unwrap();
    assert_eq!(row.status, 2);
    assert_eq!(row.title, "Amazing YouTube Video");
    assert_eq!(row.file_size_bytes, Some(12_345_678));
    assert_eq!(row.duration_label.as_deref(), Some("3:07"));
    // Never produced by the simulated resolver
    assert!(row.result_url.is_none());
    // Untouched fields retain prior values
    assert_eq!(row.format, "mp4");
    assert_eq!(row.quality.as_deref(), Some("720p"));

    db.close().await;
}

#[tokio::test]
async fn test_patch_missing_download_is_not_found() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    let err = db
        .patch_download(DownloadId(424242), &DownloadPatch::status_only(1))
        .await
        .unwrap_err();

    match err {
        crate::Error::Database(crate::error::DatabaseError::NotFound(_)) => {}
        other => panic!("expected NotFound, got {other:?}"),
    }

    db.close().await;
}

#[tokio::test]
async fn test_list_downloads_newest_first_and_scoped_to_user() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    for i in 0..3 {
        db.insert_download(&sample_download(
            Some("user-1"),
            &format!("https://youtu.be/vid{}", i),
        ))
        .await
        .unwrap();
    }
    db.insert_download(&sample_download(Some("user-2"), "https://youtu.be/other"))
        .await
        .unwrap();
    db.insert_download(&sample_download(None, "https://youtu.be/anon"))
        .await
        .unwrap();

    let rows = db.list_downloads_for_user("user-1", 50).await.unwrap();
    assert_eq!(rows.len(), 3);

    // Newest first: same created_at second resolves by id DESC
    assert_eq!(rows[0].source_url, "https://youtu.be/vid2");
    assert_eq!(rows[1].source_url, "https://youtu.be/vid1");
    assert_eq!(rows[2].source_url, "https://youtu.be/vid0");

    let rows = db.list_downloads_for_user("user-3", 50).await.unwrap();
    assert!(rows.is_empty());

    db.close().await;
}

#[tokio::test]
async fn test_list_downloads_respects_limit() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    for i in 0..60 {
        db.insert_download(&sample_download(
            Some("user-1"),
            &format!("https://youtu.be/vid{}", i),
        ))
        .await
        .unwrap();
    }

    let rows = db.list_downloads_for_user("user-1", 50).await.unwrap();
    assert_eq!(rows.len(), 50);
    // The newest insert is the head of the list
    assert_eq!(rows[0].source_url, "https://youtu.be/vid59");

    db.close().await;
}
