//! HTTP surface: every registered page is served over `GET` (and `HEAD`).
//!
//! Composition happens per request against the fragments loaded at startup.
//! A missing fragment turns into a 500 with no partial page.

use crate::core::composer::PageComposer;
use crate::domain::ports::FragmentLookup;
use crate::utils::error::{Result, SiteError};
use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;

pub fn router<L>(composer: Arc<PageComposer<L>>) -> Router
where
    L: FragmentLookup + 'static,
{
    Router::new()
        .route("/", get(serve_page::<L>))
        .route("/{*path}", get(serve_page::<L>))
        .with_state(composer)
}

pub async fn serve<L>(addr: SocketAddr, composer: Arc<PageComposer<L>>) -> Result<()>
where
    L: FragmentLookup + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Serving pages on http://{}", listener.local_addr()?);

    axum::serve(listener, router(composer))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("❌ Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn serve_page<L>(
    State(composer): State<Arc<PageComposer<L>>>,
    method: Method,
    uri: Uri,
) -> Response
where
    L: FragmentLookup + 'static,
{
    // 設定中的路由是解碼後的路徑，例如 `/über.php` 對應 `/%C3%BCber.php`
    let decoded = match urlencoding::decode(uri.path()) {
        Ok(decoded) => decoded,
        Err(_) => {
            let err = SiteError::UnknownPage {
                route: uri.path().to_string(),
            };
            return error_response(&method, uri.path(), &err);
        }
    };
    let route: &str = &decoded;

    let rendered = composer
        .page(route)
        .map(|page| page.content_type.clone())
        .and_then(|content_type| Ok((content_type, composer.render(route)?)));

    match rendered {
        Ok((content_type, body)) => {
            tracing::info!("{} {} -> 200 ({} bytes)", method, route, body.len());
            (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body).into_response()
        }
        Err(e) => error_response(&method, route, &e),
    }
}

fn error_response(method: &Method, route: &str, err: &SiteError) -> Response {
    let (status, message) = match err {
        SiteError::UnknownPage { .. } => (StatusCode::NOT_FOUND, "page not found"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "page could not be rendered"),
    };

    if status.is_server_error() {
        tracing::error!("❌ {} {} -> {}: {}", method, route, status.as_u16(), err);
    } else {
        tracing::info!("{} {} -> {}", method, route, status.as_u16());
    }

    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("{} {}\n", status.as_u16(), message),
    )
        .into_response()
}
