use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, Query, Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use blame_core::Pipeline;
use rand::seq::IndexedRandom;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::cache::HeadlineCache;
use crate::model::{
    ErrorResponse, HeadlineRecord, HeadlinesQuery, HeadlinesResponse, RandomResponse,
    RefreshResponse, TransformRequest, TransformResponse,
};
use crate::rate_limit::RateLimiter;

const DEFAULT_LIMIT: usize = 20;
const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<HeadlineCache>,
    pub limiter: RateLimiter,
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(cache: Arc<HeadlineCache>, limiter: RateLimiter, pipeline: Arc<Pipeline>) -> Self {
        Self {
            cache,
            limiter,
            pipeline,
        }
    }
}

/// Build the full router: JSON API under `/api`, health check, and the
/// static client with an `index.html` fallback for client-side routes.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    let api = Router::new()
        .route("/headlines", get(headlines_handler))
        .route("/random", get(random_handler))
        .route("/transform", post(transform_handler))
        .route("/refresh", get(refresh_handler))
        .fallback(api_not_found)
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit));

    let client = ServeDir::new(static_dir)
        .fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .fallback_service(client)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "Healthy"
}

async fn headlines_handler(
    State(state): State<AppState>,
    Query(query): Query<HeadlinesQuery>,
) -> Json<HeadlinesResponse> {
    let records = state.cache.get_or_refresh(Instant::now()).await;
    let suitable_only = query.suitable.as_deref() == Some("true");
    let limit = parse_limit(query.limit.as_deref());

    let filtered: Vec<&HeadlineRecord> = records
        .iter()
        .filter(|r| !suitable_only || r.suitable)
        .collect();
    let count = filtered.len();
    let headlines = filtered.into_iter().take(limit).cloned().collect();

    Json(HeadlinesResponse {
        success: true,
        count,
        headlines,
    })
}

async fn random_handler(State(state): State<AppState>) -> Response {
    let records = state.cache.get_or_refresh(Instant::now()).await;
    let suitable: Vec<&HeadlineRecord> = records.iter().filter(|r| r.suitable).collect();
    let pool: Vec<&HeadlineRecord> = if suitable.is_empty() {
        records.iter().collect()
    } else {
        suitable
    };

    let picked = pool.choose(&mut rand::rng()).map(|record| (*record).clone());
    match picked {
        Some(headline) => Json(RandomResponse {
            success: true,
            headline,
        })
        .into_response(),
        None => Json(ErrorResponse::new("No headlines available at the moment")).into_response(),
    }
}

async fn transform_handler(
    State(state): State<AppState>,
    payload: Result<Json<TransformRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(e) => {
            debug!(error = %e, "unreadable transform request");
            return headline_required();
        }
    };
    let headline = match request.headline {
        Some(h) if !h.trim().is_empty() => h,
        _ => return headline_required(),
    };

    let result = state
        .pipeline
        .blame(&headline, request.summary.as_deref().unwrap_or_default());
    Json(TransformResponse {
        success: true,
        original: headline,
        transformed: result.transformed,
        funny_summary: result.funny_summary,
        suitable: result.suitable,
    })
    .into_response()
}

async fn refresh_handler(State(state): State<AppState>) -> Json<RefreshResponse> {
    let count = state.cache.refresh(Instant::now()).await;
    info!(count, "manual refresh");
    Json(RefreshResponse {
        success: true,
        message: "Headlines refreshed",
        count,
    })
}

async fn api_not_found() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found")))
}

async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let key = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    match state.limiter.check(&key, Instant::now()).await {
        Ok(()) => next.run(request).await,
        Err(retry_after) => {
            warn!(client = %key, "rate limit exceeded");
            let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(ErrorResponse::new(RATE_LIMIT_MESSAGE)),
            )
                .into_response();
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
            response
        }
    }
}

fn headline_required() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new("Headline is required")),
    )
        .into_response()
}

/// Missing, zero or unparsable limits fall back to the default.
fn parse_limit(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_LIMIT)
}
