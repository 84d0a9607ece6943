//! Integration tests for share link management.

mod helpers;

use helpers::{ADMIN, ALICE, BOB, CAROL, TestApp};
use http::StatusCode;

#[tokio::test]
async fn test_create_share() {
    let app = TestApp::new().await;
    let link = app.create_link(ALICE, "/docs/", None).await;

    assert_eq!(link["path"], "/docs");
    assert_eq!(link["userID"], ALICE);
    assert_eq!(link["expire"], 0);
    assert_eq!(link["isPublic"], false);
    assert_eq!(link["hash"].as_str().unwrap().len(), 8);
    assert!(link.get("token").is_none());
    assert!(link.get("password_hash").is_none());
}

#[tokio::test]
async fn test_create_protected_share_returns_token() {
    let app = TestApp::new().await;
    let link = app
        .create_link(
            ALICE,
            "/docs/a.txt",
            Some(serde_json::json!({ "password": "pw", "expires": "2", "unit": "days" })),
        )
        .await;

    assert_eq!(link["token"].as_str().unwrap().len(), 128);
    assert!(link["expire"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_create_share_rejections() {
    let app = TestApp::new().await;
    let alice = app.token(ALICE).await;

    let missing = app
        .request("POST", "/api/share/nothing-here", None, Some(&alice))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let bad_expiry = app
        .request(
            "POST",
            "/api/share/docs",
            Some(serde_json::json!({ "expires": "soon" })),
            Some(&alice),
        )
        .await;
    assert_eq!(bad_expiry.status, StatusCode::BAD_REQUEST);

    let anonymous = app.request("POST", "/api/share/docs", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let carol = app.token(CAROL).await;
    let no_capability = app
        .request("GET", "/api/shares", None, Some(&carol))
        .await;
    assert_eq!(no_capability.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_shares() {
    let app = TestApp::new().await;
    app.create_link(ALICE, "/docs", None).await;
    app.create_link(ALICE, "/docs/a.txt", None).await;

    let alice = app.token(ALICE).await;
    let mine = app.request("GET", "/api/shares", None, Some(&alice)).await;
    assert_eq!(mine.status, StatusCode::OK);
    assert_eq!(mine.body["data"].as_array().unwrap().len(), 2);

    let bob = app.token(BOB).await;
    let theirs = app.request("GET", "/api/shares", None, Some(&bob)).await;
    assert_eq!(theirs.status, StatusCode::OK);
    assert!(theirs.body["data"].as_array().unwrap().is_empty());

    let admin = app.token(ADMIN).await;
    let all = app.request("GET", "/api/shares", None, Some(&admin)).await;
    assert_eq!(all.body["data"].as_array().unwrap().len(), 2);

    let for_path = app
        .request("GET", "/api/share/docs/a.txt", None, Some(&alice))
        .await;
    assert_eq!(for_path.body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_publish_and_public_listing() {
    let app = TestApp::new().await;
    let link = app
        .create_link(ALICE, "/docs", Some(serde_json::json!({ "password": "pw" })))
        .await;
    let hash = link["hash"].as_str().unwrap();
    let bob = app.token(BOB).await;

    let invalid = app
        .request(
            "PUT",
            &format!("/api/shares/{hash}/public"),
            Some(serde_json::json!({ "permission": "admin" })),
            Some(&app.token(ALICE).await),
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

    let not_owner = app
        .request(
            "PUT",
            &format!("/api/shares/{hash}/public"),
            Some(serde_json::json!({ "permission": "view" })),
            Some(&bob),
        )
        .await;
    assert_eq!(not_owner.status, StatusCode::FORBIDDEN);

    app.publish(ALICE, hash, "change", &[BOB]).await;

    let listed = app
        .request("GET", "/api/publicshares", None, Some(&bob))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    let entries = listed.body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["username"], "Alice");
    assert_eq!(entries[0]["permission"], "change");
    assert_eq!(entries[0]["allowed_users"][0], BOB);
    assert!(entries[0].get("token").is_none());

    let private = app
        .request(
            "PUT",
            &format!("/api/shares/{hash}/private"),
            None,
            Some(&app.token(ADMIN).await),
        )
        .await;
    assert_eq!(private.status, StatusCode::OK);
    assert_eq!(private.body["data"]["isPublic"], false);
    assert!(private.body["data"]["permission"].is_null());

    let listed = app
        .request("GET", "/api/publicshares", None, Some(&bob))
        .await;
    assert!(listed.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_share() {
    let app = TestApp::new().await;
    let link = app.create_link(ALICE, "/docs", None).await;
    let hash = link["hash"].as_str().unwrap();

    let bob = app.token(BOB).await;
    let denied = app
        .request("DELETE", &format!("/api/share/{hash}"), None, Some(&bob))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let alice = app.token(ALICE).await;
    let deleted = app
        .request("DELETE", &format!("/api/share/{hash}"), None, Some(&alice))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app
        .request("GET", &format!("/api/public/share/{hash}"), None, None)
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}
