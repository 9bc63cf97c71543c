//! Integration tests for the HTTP layer's Link-header pagination.
//!
//! Each test spins up an in-process axum server on an ephemeral port and
//! points the client at it, so no network access or external fixtures are
//! involved.

use axum::extract::Query;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use miler::http::{Auth, RestClient};
use miler::provider::ProviderError;

/// Bind an ephemeral port, serve `app` in the background and return the base
/// URL to reach it.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

#[derive(Deserialize)]
struct PageQuery {
    page: Option<u32>,
}

/// Three pages linked with `rel="next"`, the last without a Link header.
fn paged_app(base: String) -> Router {
    Router::new().route(
        "/items",
        get(move |Query(query): Query<PageQuery>| {
            let base = base.clone();
            async move {
                let page = query.page.unwrap_or(1);
                let body = format!("page-{page}");
                if page < 3 {
                    let link = format!("<{base}/items?page={}>; rel=\"next\"", page + 1);
                    ([(header::LINK, link)], body).into_response()
                } else {
                    body.into_response()
                }
            }
        }),
    )
}

#[tokio::test]
async fn test_paginate_follows_next_links_in_order() {
    // The handler needs its own base URL to mint absolute next links, so
    // bind first and build the router around the address.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let base = format!("http://{}", listener.local_addr().expect("local addr"));
    let app = paged_app(base.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    let client = RestClient::new(Auth::PrivateToken("t".into())).expect("client");
    let pages = client
        .paginate(&format!("{base}/items"))
        .await
        .expect("paginate");

    assert_eq!(pages, vec!["page-1", "page-2", "page-3"]);
}

#[tokio::test]
async fn test_paginate_single_page_without_link_header() {
    let app = Router::new().route("/items", get(|| async { "only-page" }));
    let base = serve(app).await;

    let client = RestClient::new(Auth::Token("t".into())).expect("client");
    let pages = client
        .paginate(&format!("{base}/items"))
        .await
        .expect("paginate");

    assert_eq!(pages, vec!["only-page"]);
}

#[tokio::test]
async fn test_paginate_unreachable_host_is_a_network_error() {
    let client = RestClient::new(Auth::PrivateToken("t".into())).expect("client");
    let err = client
        .paginate("http://127.0.0.1:1/items")
        .await
        .expect_err("nothing listens on port 1");

    assert!(matches!(err, ProviderError::Network { .. }));
}

#[tokio::test]
async fn test_private_token_header_reaches_the_server() {
    let app = Router::new().route(
        "/check",
        get(|headers: axum::http::HeaderMap| async move {
            match headers.get("PRIVATE-TOKEN").and_then(|v| v.to_str().ok()) {
                Some("sekrit") => "ok".into_response(),
                _ => (axum::http::StatusCode::UNAUTHORIZED, "no").into_response(),
            }
        }),
    );
    let base = serve(app).await;

    let client = RestClient::new(Auth::PrivateToken("sekrit".into())).expect("client");
    let response = client.get(&format!("{base}/check")).await.expect("get");
    assert_eq!(response.status(), reqwest::StatusCode::OK);
}

#[tokio::test]
async fn test_token_auth_sends_authorization_and_accept() {
    let app = Router::new().route(
        "/check",
        get(|headers: axum::http::HeaderMap| async move {
            let auth = headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok());
            let accept = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok());
            if auth == Some("token sekrit")
                && accept == Some("application/vnd.github.inertia-preview+json")
            {
                "ok".into_response()
            } else {
                (axum::http::StatusCode::UNAUTHORIZED, "no").into_response()
            }
        }),
    );
    let base = serve(app).await;

    let client = RestClient::new(Auth::Token("sekrit".into())).expect("client");
    let response = client.get(&format!("{base}/check")).await.expect("get");
    assert_eq!(response.status(), reqwest::StatusCode::OK);
}
