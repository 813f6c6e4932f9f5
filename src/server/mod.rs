//! Preview server rendering articles on demand

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::content::{ArticleStore, LoadError};
use crate::helpers::articles_url;
use crate::render::PageRenderer;
use crate::Folio;

/// Server state
struct ServerState {
    store: ArticleStore,
    renderer: PageRenderer,
    articles_url: String,
}

/// HTTP status for a failed store operation
pub fn status_for(err: &LoadError) -> StatusCode {
    match err {
        err if err.is_not_found() => StatusCode::NOT_FOUND,
        LoadError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the application router for a site
pub fn router(folio: &Folio) -> Result<Router> {
    let state = Arc::new(ServerState {
        store: folio.store(),
        renderer: PageRenderer::new(&folio.config)?,
        articles_url: articles_url(&folio.config),
    });

    let prefix = folio.config.articles_path.trim_matches('/');
    let prefix = if prefix.is_empty() {
        String::new()
    } else {
        format!("/{}", prefix)
    };

    let mut app = Router::new()
        .route(&format!("{}/", prefix), get(listing_page))
        .route(&format!("{}/:slug", prefix), get(article_page))
        .route(&format!("{}/:slug/", prefix), get(article_page))
        .route("/api/articles", get(api_slugs))
        .route("/api/articles/:slug", get(api_article));

    if !prefix.is_empty() {
        app = app
            .route("/", get(index_redirect))
            .route(&prefix, get(index_redirect));
    }

    let app = app.fallback_service(ServeDir::new(&folio.static_dir));

    // A nested "/" only matches the root without its trailing slash
    let root = folio.config.root.trim_matches('/');
    let app = if root.is_empty() {
        app
    } else {
        let home = if prefix.is_empty() {
            get(listing_page)
        } else {
            get(index_redirect)
        };
        Router::new()
            .route(&format!("/{}/", root), home)
            .nest(&format!("/{}", root), app)
    };

    Ok(app.with_state(state).layer(TraceLayer::new_for_http()))
}

/// Start the preview server
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    let app = router(folio)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}{}", ip, port, articles_url(&folio.config));
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run store work on the blocking pool and map failures to responses
async fn blocking<T, F>(f: F) -> Result<T, Response>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(error_response(err)),
        Err(err) => {
            tracing::error!("Render task failed: {}", err);
            Err(StatusCode::INTERNAL_SERVER_ERROR.into_response())
        }
    }
}

fn error_response(err: anyhow::Error) -> Response {
    let status = err
        .downcast_ref::<LoadError>()
        .map(status_for)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        tracing::error!("{:#}", err);
    } else {
        tracing::debug!("{:#}", err);
    }

    let reason = status.canonical_reason().unwrap_or("Error");
    (status, reason).into_response()
}

async fn index_redirect(State(state): State<Arc<ServerState>>) -> Redirect {
    Redirect::temporary(&state.articles_url)
}

async fn listing_page(State(state): State<Arc<ServerState>>) -> Response {
    let result = blocking(move || {
        let articles = state.store.load_all()?;
        state.renderer.render_listing(&articles)
    })
    .await;

    match result {
        Ok(html) => Html(html).into_response(),
        Err(response) => response,
    }
}

async fn article_page(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let result = blocking(move || {
        let article = state.store.load(&slug)?;
        state.renderer.render_article(&article)
    })
    .await;

    match result {
        Ok(html) => Html(html).into_response(),
        Err(response) => response,
    }
}

async fn api_slugs(State(state): State<Arc<ServerState>>) -> Response {
    match blocking(move || Ok(state.store.slugs()?)).await {
        Ok(slugs) => Json(slugs).into_response(),
        Err(response) => response,
    }
}

async fn api_article(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    match blocking(move || Ok(state.store.load(&slug)?)).await {
        Ok(article) => Json(article).into_response(),
        Err(response) => response,
    }
}
