//! End-to-end flows driving the client controller against the real system.

use quills_client::{App, GatewayClient, MemoryTokenStore, Route, ToggleOutcome};
use quills_core::{FALLBACK_AUTHOR, FALLBACK_TITLE};
use quills_integration_tests::{TestContext, books_stub, unique_email};

type RealApp = App<GatewayClient, GatewayClient, MemoryTokenStore>;

fn app_for(ctx: &TestContext, store: MemoryTokenStore) -> RealApp {
    let gateway = GatewayClient::new(ctx.gateway_url.parse().expect("gateway URL"));
    App::new(gateway.clone(), gateway, store)
}

#[tokio::test]
async fn test_search_applies_normalization_fallbacks() {
    let ctx = TestContext::new().await;
    let mut app = app_for(&ctx, MemoryTokenStore::new());

    let results = app.search("dune").await.expect("search failed");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Dune");
    assert_eq!(results[0].tags, vec!["fiction", "classics"]);

    let sparse = &results[1];
    assert_eq!(sparse.title, FALLBACK_TITLE);
    assert_eq!(sparse.author, FALLBACK_AUTHOR);
    assert!(sparse.cover.contains("placeholder"));
}

#[tokio::test]
async fn test_register_search_favorite_and_resync() {
    let ctx = TestContext::new().await;
    let mut app = app_for(&ctx, MemoryTokenStore::new());

    let destination = app
        .register("Ada", &unique_email("e2e"), "password123")
        .await
        .expect("register failed");
    assert_eq!(destination, Route::Favorites);
    assert!(app.is_logged_in());

    app.search("dune").await.expect("search failed");
    let outcome = app
        .toggle_favorite(books_stub::DUNE_ID)
        .await
        .expect("toggle failed");
    assert_eq!(outcome, ToggleOutcome::Added);

    // A fresh controller holding the same token rebuilds the favorites map
    let token = ctx
        .client
        .post(ctx.gateway("/api/users/auth/login"))
        .json(&serde_json::json!({
            "email": app.state().current_user.as_ref().expect("user").email,
            "password": "password123"
        }))
        .send()
        .await
        .expect("login failed")
        .json::<serde_json::Value>()
        .await
        .expect("body")["token"]
        .as_str()
        .expect("token")
        .to_string();

    let mut fresh = app_for(&ctx, MemoryTokenStore::with_token(token));
    fresh.sync_session_and_favorites().await;

    assert!(fresh.state().is_favorite(books_stub::DUNE_ID));
    assert_eq!(
        fresh.state().current_user.as_ref().expect("user").name,
        "Ada"
    );
    assert!(fresh.state().cache_by_id.contains_key(books_stub::DUNE_ID));
}

#[tokio::test]
async fn test_view_book_merges_detail_and_refreshes_snapshot() {
    let ctx = TestContext::new().await;
    let mut app = app_for(&ctx, MemoryTokenStore::new());

    app.register("Ada", &unique_email("merge"), "password123")
        .await
        .expect("register failed");
    app.search("dune").await.expect("search failed");
    app.toggle_favorite(books_stub::DUNE_ID)
        .await
        .expect("toggle failed");

    let merged = app.view_book(books_stub::DUNE_ID).await;

    // Search-derived author wins over the detail record's
    assert_eq!(merged.author, "Frank Herbert");
    assert_eq!(merged.desc, "Spice, sand, and a very large worm.");
    assert_eq!(merged.cover, "https://covers.example.com/dune.jpg");

    // The refreshed snapshot is what the server now returns
    let mut fresh = app_for(
        &ctx,
        MemoryTokenStore::with_token(ctx.register_token().await),
    );
    fresh.sync_session_and_favorites().await;
    // Different user: not favorited for them
    assert!(!fresh.state().is_favorite(books_stub::DUNE_ID));

    app.sync_session_and_favorites().await;
    assert_eq!(
        app.state().favorites_map[books_stub::DUNE_ID].desc,
        "Spice, sand, and a very large worm."
    );
}

#[tokio::test]
async fn test_stale_token_resets_session_through_real_services() {
    let ctx = TestContext::new().await;
    let mut app = app_for(&ctx, MemoryTokenStore::with_token("stale.garbage.token"));

    app.sync_session_and_favorites().await;

    assert!(!app.is_logged_in());
    assert!(app.state().current_user.is_none());
    assert!(app.state().favorites_map.is_empty());

    // With the session gone, favorites navigation falls back to login
    assert_eq!(
        Route::parse("#/favorites").protect(app.is_logged_in()),
        Route::Login
    );
}

#[tokio::test]
async fn test_book_ids_with_slashes_survive_the_full_path() {
    let ctx = TestContext::new().await;
    let mut app = app_for(&ctx, MemoryTokenStore::new());

    app.register("Ada", &unique_email("slash"), "password123")
        .await
        .expect("register failed");
    app.search("dune").await.expect("search failed");

    // "/works/OL1W" round-trips through add, list, and remove
    app.toggle_favorite(books_stub::DUNE_ID)
        .await
        .expect("add failed");
    app.sync_session_and_favorites().await;
    assert!(app.state().is_favorite(books_stub::DUNE_ID));

    let outcome = app
        .toggle_favorite(books_stub::DUNE_ID)
        .await
        .expect("remove failed");
    assert_eq!(outcome, ToggleOutcome::Removed);

    app.sync_session_and_favorites().await;
    assert!(!app.state().is_favorite(books_stub::DUNE_ID));
}
