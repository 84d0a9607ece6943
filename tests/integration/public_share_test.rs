//! Integration tests for content access through share links.

mod helpers;

use helpers::{ADMIN, ALICE, BOB, TestApp};
use http::StatusCode;

async fn docs_link(app: &TestApp) -> String {
    let link = app.create_link(ALICE, "/docs", None).await;
    link["hash"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_full_edit_cycle_through_link() {
    let app = TestApp::new().await;
    let hash = docs_link(&app).await;
    let bob = app.token(BOB).await;
    let base = format!("/api/public/share/{hash}");

    let listing = app.request("GET", &base, None, Some(&bob)).await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.body["data"]["isDir"], true);
    assert_eq!(listing.body["data"]["name"], "docs");
    assert_eq!(listing.body["data"]["shareInfo"]["canEdit"], false);

    let denied = app
        .content("POST", &format!("{base}/docs/new.txt"), "x", Some(&bob), None)
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    app.publish(ALICE, &hash, "change", &[]).await;

    let listing = app.request("GET", &base, None, Some(&bob)).await;
    assert_eq!(listing.body["data"]["shareInfo"]["canEdit"], true);
    let anonymous = app.request("GET", &base, None, None).await;
    assert_eq!(anonymous.body["data"]["shareInfo"]["canEdit"], false);

    let created = app
        .content("POST", &format!("{base}/docs/new.txt"), "hello", Some(&bob), None)
        .await;
    assert_eq!(created.status, StatusCode::OK);
    assert!(created.headers.contains_key("etag"));
    assert!(app.exists_owned(ALICE, "/docs/new.txt").await);

    let again = app
        .content("POST", &format!("{base}/docs/new.txt"), "hello", Some(&bob), None)
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);

    let patch = format!("{base}/docs/new.txt?destination=/docs/new2.txt&action=rename&rename=true");
    let first = app.request("PATCH", &patch, None, Some(&bob)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"]["destination"], "/docs/new2.txt");

    let recreated = app
        .content(
            "POST",
            &format!("{base}/docs/new.txt?override=true"),
            "again",
            Some(&bob),
            None,
        )
        .await;
    assert_eq!(recreated.status, StatusCode::OK);

    let second = app.request("PATCH", &patch, None, Some(&bob)).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["data"]["destination"], "/docs/new2(1).txt");
    assert!(app.exists_owned(ALICE, "/docs/new2.txt").await);
    assert!(app.exists_owned(ALICE, "/docs/new2(1).txt").await);

    let deleted = app
        .request("DELETE", &format!("{base}/docs/new2.txt"), None, Some(&bob))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(!app.exists_owned(ALICE, "/docs/new2.txt").await);

    let root = app
        .request("DELETE", &format!("{base}/"), None, Some(&bob))
        .await;
    assert_eq!(root.status, StatusCode::FORBIDDEN);
    assert!(app.exists_owned(ALICE, "/docs").await);
}

#[tokio::test]
async fn test_writes_require_authentication() {
    let app = TestApp::new().await;
    let hash = docs_link(&app).await;
    app.publish(ALICE, &hash, "change", &[]).await;

    let anonymous = app
        .content(
            "POST",
            &format!("/api/public/share/{hash}/docs/anon.txt"),
            "x",
            None,
            None,
        )
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_allow_list_and_admin_bypass() {
    let app = TestApp::new().await;
    let hash = docs_link(&app).await;
    app.publish(ALICE, &hash, "change", &[ALICE]).await;
    let path = format!("/api/public/share/{hash}/docs/made/");

    let bob = app.token(BOB).await;
    let outsider = app.content("POST", &path, "", Some(&bob), None).await;
    assert_eq!(outsider.status, StatusCode::FORBIDDEN);

    let admin = app.token(ADMIN).await;
    let bypass = app.content("POST", &path, "", Some(&admin), None).await;
    assert_eq!(bypass.status, StatusCode::OK);
    assert!(app.exists_owned(ALICE, "/docs/made").await);
}

#[tokio::test]
async fn test_siblings_are_unreachable() {
    let app = TestApp::new().await;
    let hash = docs_link(&app).await;
    app.publish(ALICE, &hash, "change", &[]).await;
    let bob = app.token(BOB).await;

    for sub in ["/secret.txt", "/docs/../secret.txt", "/../../users/alice/secret.txt"] {
        let read = app
            .request("GET", &format!("/api/public/share/{hash}{sub}"), None, None)
            .await;
        assert_eq!(read.status, StatusCode::NOT_FOUND, "read {sub}");
    }

    let escape = app
        .request(
            "PATCH",
            &format!("/api/public/share/{hash}/docs/a.txt?destination=/stolen.txt&action=copy"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(escape.status, StatusCode::FORBIDDEN);

    let nested = app
        .request(
            "PATCH",
            &format!("/api/public/share/{hash}/docs/sub?destination=/docs/sub/inner&action=copy"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(nested.status, StatusCode::BAD_REQUEST);
    assert!(!app.exists_owned(ALICE, "/stolen.txt").await);
}

#[tokio::test]
async fn test_password_protected_link() {
    let app = TestApp::new().await;
    let link = app
        .create_link(ALICE, "/docs", Some(serde_json::json!({ "password": "open sesame" })))
        .await;
    let hash = link["hash"].as_str().unwrap();
    let token = link["token"].as_str().unwrap();
    let base = format!("/api/public/share/{hash}/docs/a.txt");

    let missing = app.content("GET", &base, "", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let wrong = app.content("GET", &base, "", None, Some("nope")).await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let encoded = app
        .content("GET", &base, "", None, Some("open%20sesame"))
        .await;
    assert_eq!(encoded.status, StatusCode::OK);
    assert_eq!(encoded.body["data"]["name"], "a.txt");
    assert_eq!(encoded.body["data"]["type"], "text/plain");

    let with_token = app
        .content("GET", &format!("{base}?token={token}"), "", None, None)
        .await;
    assert_eq!(with_token.status, StatusCode::OK);

    let bad_token = app
        .content("GET", &format!("{base}?token=forged"), "", None, None)
        .await;
    assert_eq!(bad_token.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_download_file_and_directory_archive() {
    let app = TestApp::new().await;
    let hash = docs_link(&app).await;

    let file = app
        .content("GET", &format!("/api/public/dl/{hash}/docs/a.txt"), "", None, None)
        .await;
    assert_eq!(file.status, StatusCode::OK);
    assert_eq!(&file.bytes[..], b"alpha");
    assert_eq!(file.headers["content-type"], "text/plain");
    assert!(
        file.headers["content-disposition"]
            .to_str()
            .unwrap()
            .starts_with("attachment")
    );

    let inline = app
        .content(
            "GET",
            &format!("/api/public/dl/{hash}/docs/a.txt?inline=true"),
            "",
            None,
            None,
        )
        .await;
    assert!(
        inline.headers["content-disposition"]
            .to_str()
            .unwrap()
            .starts_with("inline")
    );

    let dir = app
        .content("GET", &format!("/api/public/dl/{hash}/docs/sub"), "", None, None)
        .await;
    assert_eq!(dir.status, StatusCode::OK);
    assert_eq!(dir.headers["content-type"], "application/zip");
    assert!(
        dir.headers["content-disposition"]
            .to_str()
            .unwrap()
            .ends_with("filename*=utf-8''sub%2Ezip")
    );
    assert!(dir.bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn test_single_file_link() {
    let app = TestApp::new().await;
    let link = app.create_link(ALICE, "/docs/a.txt", None).await;
    let hash = link["hash"].as_str().unwrap();
    app.publish(ALICE, hash, "change", &[]).await;

    let read = app
        .request("GET", &format!("/api/public/share/{hash}/anything"), None, None)
        .await;
    assert_eq!(read.status, StatusCode::OK);
    assert_eq!(read.body["data"]["name"], "a.txt");
    assert_eq!(read.body["data"]["shareInfo"]["canEdit"], false);

    let bob = app.token(BOB).await;
    let write = app
        .content("PUT", &format!("/api/public/share/{hash}"), "x", Some(&bob), None)
        .await;
    assert_eq!(write.status, StatusCode::FORBIDDEN);
}
