mod common;

use axum::http::StatusCode;
use axum_test::TestServer;

use sniplink::domain::entities::ShortUrl;
use sniplink::utils::password::hash_password;

fn make_server() -> (TestServer, common::TestContext) {
    let ctx = common::create_test_state();
    let server = TestServer::new(common::test_router(ctx.state.clone())).unwrap();
    (server, ctx)
}

#[tokio::test]
async fn test_redirect_permanent_to_target() {
    let (server, ctx) = make_server();
    ctx.repo
        .insert_raw(common::make_row("docs1", "https://example.com/docs", 3600));

    let response = server.get("/docs1").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "https://example.com/docs"
    );
}

#[tokio::test]
async fn test_redirect_unknown_slug_to_frontend_404() {
    let (server, _ctx) = make_server();

    let response = server.get("/nosuch").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        format!("{}/404", common::FRONTEND_URL)
    );
}

#[tokio::test]
async fn test_redirect_protected_slug_to_gate() {
    let (server, ctx) = make_server();

    let mut row = common::make_row("guarded", "https://example.com/secret", 3600);
    row.password_hash = Some(hash_password("pw").unwrap());
    ctx.repo.insert_raw(row);

    let response = server.get("/guarded").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        format!("{}/gate/guarded", common::FRONTEND_URL)
    );
}

#[tokio::test]
async fn test_redirect_expired_slug_acts_as_missing() {
    let (server, ctx) = make_server();
    ctx.repo
        .insert_raw(common::make_row("stale", "https://example.com", -60));

    let response = server.get("/stale").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        format!("{}/404", common::FRONTEND_URL)
    );
}

#[tokio::test]
async fn test_redirect_populates_cache() {
    let (server, ctx) = make_server();
    ctx.repo
        .insert_raw(common::make_row("docs1", "https://example.com/docs", 3600));
    assert!(!ctx.cache.contains("docs1"));

    server.get("/docs1").await.assert_status(StatusCode::MOVED_PERMANENTLY);

    assert!(ctx.cache.contains("docs1"));
}

#[tokio::test]
async fn test_root_redirects_to_frontend() {
    let (server, _ctx) = make_server();

    let response = server.get("/").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        common::FRONTEND_URL
    );
}

#[tokio::test]
async fn test_redirect_does_not_leak_password_hash() {
    let (server, ctx) = make_server();

    let mut row: ShortUrl = common::make_row("guarded", "https://example.com", 3600);
    row.password_hash = Some(hash_password("pw").unwrap());
    ctx.repo.insert_raw(row);

    let response = server.get("/guarded").await;

    assert!(!response.text().contains("argon2"));
}
