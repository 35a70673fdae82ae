//! Axum server exposing the news feed and trending data over HTTP.
//!
//! All routes are read-only views over the snapshot store except `/refresh`,
//! which re-reads the snapshot file maintained by the ingestion pipeline.

use anyhow::Result;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::types::{NewsApiResponse, TrendingApiResponse};
use crate::environment;
use crate::model::{
    CategoryInfo, NewsCategory, NewsNode, SearchSuggestion, StoryStats, TimeframeFilter,
    ValidationError, CATEGORIES,
};
use crate::store::{NewsStore, StoreError};
use crate::TARGET_API_REQUEST;

#[derive(Deserialize)]
struct NewsQuery {
    timeframe: Option<String>,
}

#[derive(Deserialize)]
struct SuggestQuery {
    q: String,
}

/// Main server loop: build the router and serve until shutdown.
pub async fn news_api_loop() -> Result<()> {
    let app = Router::new()
        .route("/status", get(status_check))
        .route("/news", get(news_index))
        .route("/news/{slug}", get(news_by_slug))
        .route("/news/{slug}/stats", get(story_stats))
        .route("/trending", get(trending))
        .route("/categories", get(categories))
        .route("/categories/{slug}", get(category_feed))
        .route("/search/suggest", get(search_suggest))
        .route("/refresh", post(refresh));

    let port = environment::api_port();
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;

    info!("News API listening on http://{}", addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Liveness check with build information.
async fn status_check() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "build": env!("BUILD_TIMESTAMP"),
        "commit": option_env!("GIT_HASH"),
    }))
}

/// The full news feed, optionally narrowed by a timeframe filter.
async fn news_index(Query(query): Query<NewsQuery>) -> Result<Json<NewsApiResponse>, StatusCode> {
    let timeframe = match &query.timeframe {
        Some(raw) => match TimeframeFilter::parse(raw) {
            Some(timeframe) => Some(timeframe),
            None => {
                let error = ValidationError::Enum {
                    field: "timeframe".to_string(),
                    value: raw.clone(),
                    expected: "timeframe filter",
                };
                warn!(target: TARGET_API_REQUEST, "rejected request: {}", error);
                return Err(StatusCode::BAD_REQUEST);
            }
        },
        None => None,
    };

    let store = NewsStore::instance().await;
    Ok(Json(store.news_response(timeframe)))
}

/// One story by its slug.
async fn news_by_slug(Path(slug): Path<String>) -> Result<Json<NewsNode>, StatusCode> {
    let store = NewsStore::instance().await;
    match store.node_by_slug(&slug) {
        Some(node) => Ok(Json(node)),
        None => {
            info!(target: TARGET_API_REQUEST, "no story for slug '{}'", slug);
            Err(StatusCode::NOT_FOUND)
        }
    }
}

/// Metrics-panel projection for one story.
async fn story_stats(Path(slug): Path<String>) -> Result<Json<StoryStats>, StatusCode> {
    let store = NewsStore::instance().await;
    match store.stats_for(&slug) {
        Some(stats) => Ok(Json(stats)),
        None => {
            info!(target: TARGET_API_REQUEST, "no story for slug '{}'", slug);
            Err(StatusCode::NOT_FOUND)
        }
    }
}

/// The trending sidebar, rank ascending.
async fn trending() -> Json<TrendingApiResponse> {
    let store = NewsStore::instance().await;
    Json(store.trending_response())
}

/// The static category table.
async fn categories() -> Json<Vec<CategoryInfo>> {
    Json(CATEGORIES.clone())
}

/// The news feed narrowed to one category, addressed by its page slug.
async fn category_feed(Path(slug): Path<String>) -> Result<Json<NewsApiResponse>, StatusCode> {
    let Some(category) = NewsCategory::from_slug(&slug) else {
        let error = ValidationError::Enum {
            field: "category".to_string(),
            value: slug,
            expected: "category slug",
        };
        warn!(target: TARGET_API_REQUEST, "rejected request: {}", error);
        return Err(StatusCode::NOT_FOUND);
    };

    let store = NewsStore::instance().await;
    Ok(Json(store.category_response(category)))
}

/// Search suggestions for a partial query.
async fn search_suggest(Query(query): Query<SuggestQuery>) -> Json<Vec<SearchSuggestion>> {
    let store = NewsStore::instance().await;
    Json(store.suggestions(&query.q))
}

/// Re-read the snapshot file and swap it in if it validates.
async fn refresh() -> Result<Json<Value>, StatusCode> {
    let store = NewsStore::instance().await;
    match store.reload() {
        Ok(count) => Ok(Json(json!({ "status": "OK", "stories": count }))),
        Err(StoreError::Invalid(e)) => {
            warn!(target: TARGET_API_REQUEST, "refresh rejected: {}", e);
            Err(StatusCode::UNPROCESSABLE_ENTITY)
        }
        Err(e) => {
            warn!(target: TARGET_API_REQUEST, "refresh failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
