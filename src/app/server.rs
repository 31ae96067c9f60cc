use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::pages::{list_blogs, list_pages, render_blog, render_page};
use crate::render::{self, Renderer};
use crate::wiki::{LocalFsTopicStore, PageComposer, WikiError};

const NOT_FOUND_HTML: &str = "<h1>404 Not Found</h1>";

/// Immutable per-process state; every request reads content files fresh.
#[derive(Clone)]
pub struct AppState {
    config: Arc<SiteConfig>,
    composer: PageComposer,
    renderer: Arc<Renderer>,
}

impl AppState {
    pub fn new(config: SiteConfig) -> anyhow::Result<Self> {
        let renderer = Renderer::new(list_pages(&config))?;
        let store = LocalFsTopicStore::new(config.wiki_paths());
        let composer = PageComposer::new(Arc::new(store), config.wiki.image_base.clone())
            .with_result_limit(config.wiki.result_limit);
        Ok(Self {
            config: Arc::new(config),
            composer,
            renderer: Arc::new(renderer),
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }
}

pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/", get(landing))
        .route("/healthz", get(|| async { "ok\n" }))
        .route("/blog/:page", get(blog_page))
        .route("/api/v1/pages", get(api_pages))
        .route("/api/v1/blogs", get(api_blogs))
        .route("/wiki/", get(wiki_home))
        .route("/wiki/search", post(wiki_search))
        .route("/wiki/:topic", get(wiki_topic));

    for page in &state.config.pages {
        let route = page.route.clone();
        app = app.route(
            &format!("/{}", page.route),
            get(move |State(state): State<AppState>| {
                let route = route.clone();
                async move { markdown_page(&state, &route).await }
            }),
        );
    }

    app.nest_service("/static", ServeDir::new(&state.config.content_root))
        .fallback(|| async { AppError::NotFound })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| anyhow::anyhow!("bind {addr}: {err}"))?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "install ctrl-c handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[derive(Debug)]
enum AppError {
    NotFound,
    BadRequest(String),
    Internal(anyhow::Error),
}

impl From<WikiError> for AppError {
    fn from(err: WikiError) -> Self {
        if err.is_not_found() {
            return Self::NotFound;
        }
        match err {
            WikiError::EmptyQuery => Self::BadRequest(err.to_string()),
            other => Self::Internal(other.into()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (StatusCode::NOT_FOUND, Html(NOT_FOUND_HTML)).into_response(),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            Self::Internal(err) => {
                tracing::error!(error = %format!("{err:#}"), "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

async fn landing(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let html = state
        .renderer
        .render(render::LANDING, &serde_json::json!({}))?;
    Ok(Html(html))
}

async fn markdown_page(state: &AppState, route: &str) -> Result<Html<String>, AppError> {
    let content = render_page(&state.config, route)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Html(
        state
            .renderer
            .render_content(render::GENERIC_MD_PAGE, &content)?,
    ))
}

async fn blog_page(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> Result<Html<String>, AppError> {
    let content = render_blog(&state.config, &page)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Html(state.renderer.render_content(render::BLOG, &content)?))
}

async fn api_pages(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "pages": list_pages(&state.config) }))
}

async fn api_blogs(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let blogs = list_blogs(&state.config).await?;
    Ok(Json(serde_json::json!({ "blogs": blogs })))
}

async fn wiki_home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let html = state
        .renderer
        .render(render::WIKI_SEARCH, &serde_json::json!({}))?;
    Ok(Html(html))
}

async fn wiki_topic(
    State(state): State<AppState>,
    Path(topic): Path<String>,
) -> Result<Html<String>, AppError> {
    let page = state.composer.render_topic_page(&topic).await?;
    Ok(Html(state.renderer.render(render::WIKI, &page)?))
}

#[derive(Debug, Deserialize)]
struct SearchForm {
    search_text: String,
}

async fn wiki_search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, AppError> {
    let results = state
        .composer
        .render_search_results(&form.search_text)
        .await?;
    Ok(Html(state.renderer.render(render::THUMBNAILS, &results)?))
}
