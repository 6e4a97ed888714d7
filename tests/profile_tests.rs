/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use common::*;
use connector::User;
use tadmust::session::{SESSION_FILE, Session};
use tadmust::views::Fetch;
use tadmust::views::profile::{
    LOGIN_FIRST, ProfileUpload, ProfileView, UPLOAD_FAILED, UPLOAD_SUCCEEDED,
};

fn logged_in(dir: &std::path::Path) -> Session {
    let mut session = Session::load(dir.join(SESSION_FILE));
    session
        .set_user(User {
            id: Some(12),
            username: "amina".to_string(),
            ..Default::default()
        })
        .unwrap();
    session
}

#[tokio::test]
async fn test_upload_replaces_session_user() {
    let (config, backend) = spawn_backend().await;
    let dir = temp_dir("profile");
    let mut session = logged_in(&dir);

    let image = dir.join("avatar.png");
    std::fs::write(&image, b"\x89PNG fake").unwrap();

    let mut upload = ProfileUpload::new();
    upload.select_file(&image);
    assert!(upload.submit(&config, &mut session).await);

    assert_eq!(upload.notice().unwrap().text, UPLOAD_SUCCEEDED);
    assert_eq!(backend.hits("POST /users/12/upload-profile"), 1);
    assert_eq!(
        backend.uploads(),
        vec![("avatar.png".to_string(), b"\x89PNG fake".to_vec())]
    );

    let stored = Session::load(session.path());
    assert_eq!(
        stored.user().unwrap().profile_image.as_deref(),
        Some("/uploads/avatar.png")
    );

    let view = ProfileView::from_session(&stored);
    let avatar = view.avatar_url(&config).unwrap();
    assert!(avatar.starts_with("http://127.0.0.1:"));
    assert!(avatar.ends_with("/uploads/avatar.png"));
    assert!(!avatar.contains("/api/"));

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn test_upload_needs_user() {
    let (config, backend) = spawn_backend().await;
    let dir = temp_dir("profile");
    let mut session = Session::load(dir.join(SESSION_FILE));

    let mut upload = ProfileUpload::new();
    upload.select_file(dir.join("avatar.png"));
    assert!(!upload.submit(&config, &mut session).await);

    assert_eq!(upload.notice().unwrap().text, LOGIN_FIRST);
    assert_eq!(backend.total_hits(), 0);
}

#[tokio::test]
async fn test_failed_upload() {
    let (config, backend) = spawn_backend().await;
    backend.fail("POST /users/12/upload-profile");
    let dir = temp_dir("profile");
    let mut session = logged_in(&dir);

    let image = dir.join("avatar.png");
    std::fs::write(&image, b"image").unwrap();

    let mut upload = ProfileUpload::new();
    upload.select_file(&image);
    assert!(!upload.submit(&config, &mut session).await);

    assert_eq!(upload.notice().unwrap().text, UPLOAD_FAILED);
    assert_eq!(session.user().unwrap().profile_image, None);

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn test_fetch_current_user() {
    let (config, backend) = spawn_backend().await;

    let view = ProfileView::fetch(&config).await;
    assert_eq!(backend.hits("GET /user"), 1);

    match view.user() {
        Fetch::Loaded(user) => {
            assert_eq!(user.display_name(), "Amina Said");
            assert_eq!(user.role, "ADMIN");
        }
        other => panic!("unexpected profile state: {:?}", other),
    }
    assert_eq!(view.avatar_url(&config), None);
}
