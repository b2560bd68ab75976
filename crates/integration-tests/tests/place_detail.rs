//! Place details page.

use hbnb_integration_tests::{TestContext, token_cookie};
use reqwest::StatusCode;

#[tokio::test]
async fn test_place_shows_details_and_stars() {
    let ctx = TestContext::new().await;

    let resp = ctx.get("/place?id=1", None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.unwrap();
    assert!(body.contains("Alpine Cabin"));
    assert!(body.contains("Grace Hopper"));
    assert!(body.contains("Quiet cabin above the valley"));
    assert!(body.contains("<li>Wi-Fi</li>"));
    assert!(body.contains("<li>Fireplace</li>"));
    assert!(body.contains("Bob"));
    assert!(body.contains("Rating: ★★★☆☆"));
    assert!(body.contains("Cosy and warm"));
    assert!(!body.contains("No reviews yet."));
}

#[tokio::test]
async fn test_place_without_reviews_shows_placeholder() {
    let ctx = TestContext::new().await;

    let body = ctx.get("/place?id=2", None).await.text().await.unwrap();
    assert!(body.contains("Beach House"));
    assert!(body.contains("No reviews yet."));
    assert!(!body.contains("class=\"review-card\""));
}

#[tokio::test]
async fn test_add_review_link_requires_token() {
    let ctx = TestContext::new().await;

    let anonymous = ctx.get("/place?id=1", None).await.text().await.unwrap();
    assert!(!anonymous.contains("/add_review?id=1"));

    let logged_in = ctx
        .get("/place?id=1", Some(&token_cookie()))
        .await
        .text()
        .await
        .unwrap();
    assert!(logged_in.contains("href=\"/add_review?id=1\""));
}

#[tokio::test]
async fn test_place_error_statuses() {
    let ctx = TestContext::new().await;

    assert_eq!(ctx.get("/place", None).await.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        ctx.get("/place?id=", None).await.status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        ctx.get("/place?id=404", None).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        ctx.get("/place?id=3", None).await.status(),
        StatusCode::NOT_FOUND
    );
}
