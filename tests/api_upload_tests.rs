//! Validation and output of POST /api/upload.

use axum::http::StatusCode;

use drinkdb::blobs::MAX_IMAGE_BYTES;

mod common;
use common::{body_json, create_test_app, send, MultipartBody};

#[tokio::test]
async fn upload_returns_public_paths_with_original_extensions() {
    let (app, _state) = create_test_app();

    let req = MultipartBody::new()
        .file("images", "latte.jpg", b"jpegbytes")
        .file("images", "mocha.png", b"pngbytes")
        .request("POST", "/api/upload");
    let res = send(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res).await;
    let urls = body["urls"].as_array().unwrap();
    assert_eq!(urls.len(), 2);
    assert!(urls[0].as_str().unwrap().starts_with("/images/"));
    assert!(urls[0].as_str().unwrap().ends_with(".jpg"));
    assert!(urls[1].as_str().unwrap().starts_with("/images/"));
    assert!(urls[1].as_str().unwrap().ends_with(".png"));
}

#[tokio::test]
async fn upload_rejects_non_image_filenames() {
    let (app, _state) = create_test_app();

    let req = MultipartBody::new()
        .file("images", "notes.pdf", b"pdfbytes")
        .request("POST", "/api/upload");
    let res = send(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_rejects_uppercase_extensions() {
    let (app, _state) = create_test_app();

    let req = MultipartBody::new()
        .file("images", "PHOTO.JPG", b"jpegbytes")
        .request("POST", "/api/upload");
    let res = send(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn one_bad_file_fails_the_whole_batch() {
    let (app, _state) = create_test_app();

    let req = MultipartBody::new()
        .file("images", "fine.jpg", b"jpegbytes")
        .file("images", "evil.exe", b"mzbytes")
        .request("POST", "/api/upload");
    let res = send(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_rejects_more_than_five_files() {
    let (app, _state) = create_test_app();

    let mut mp = MultipartBody::new();
    for i in 0..6 {
        mp = mp.file("images", &format!("photo-{i}.jpg"), b"jpegbytes");
    }
    let res = send(&app, mp.request("POST", "/api/upload")).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_rejects_a_file_over_five_megabytes() {
    let (app, _state) = create_test_app();

    let oversize = vec![0u8; MAX_IMAGE_BYTES + 1];
    let req = MultipartBody::new()
        .file("images", "huge.jpg", &oversize)
        .request("POST", "/api/upload");
    let res = send(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_with_no_files_returns_an_empty_list() {
    let (app, _state) = create_test_app();

    let req = MultipartBody::new()
        .text("unrelated", "field")
        .request("POST", "/api/upload");
    let res = send(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["urls"], serde_json::json!([]));
}
