//! HTTP front end: search form, nutrient table, and the try-again flow.

pub mod views;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use html_escape::encode_text;
use log::{info, warn};
use serde::Deserialize;

use crate::render::to_html_table;
use crate::state::AppState;

type SharedState = Arc<AppState>;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/index", get(index))
        .route("/food_content", get(food_content).post(food_content))
        .route("/food_not_found", get(food_not_found))
        .route("/health", get(health))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: SharedState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("listening on http://{addr}");
    axum::serve(listener, router(state))
        .await
        .context("serving HTTP")
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn index(State(state): State<SharedState>) -> Html<String> {
    Html(views::index_page(&state))
}

/// `food` once, `nutrients` any number of times.
async fn food_content(
    State(state): State<SharedState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Html<String> {
    let food = params
        .iter()
        .find(|(k, _)| k == "food")
        .map(|(_, v)| v.as_str())
        .unwrap_or_default();
    let requested: Vec<&str> = params
        .iter()
        .filter(|(k, _)| k == "nutrients")
        .map(|(_, v)| v.as_str())
        .collect();

    if !state.is_known_food(food) {
        info!("food not found: '{food}'");
        return Html(views::food_not_found_page(food));
    }

    let projection = state.nutrient_projection(&requested);
    let table = match state.dataset.select(food, &projection) {
        Ok(result) => {
            info!(
                "food '{food}': {} row(s) x {} column(s)",
                result.len(),
                result.columns().len()
            );
            to_html_table(&result)
        }
        Err(err) => {
            warn!("food '{food}': {err}");
            format!("<p>{}</p>", encode_text(&err.to_string()))
        }
    };
    Html(views::food_content_page(&state, food, &table))
}

#[derive(Debug, Deserialize)]
struct TryAgain {
    yes_no: Option<String>,
}

async fn food_not_found(
    State(state): State<SharedState>,
    Query(answer): Query<TryAgain>,
) -> Html<String> {
    let answer = answer.yes_no.unwrap_or_default();
    let answer = answer.trim();
    if answer.eq_ignore_ascii_case("no") {
        Html(views::good_bye_page())
    } else if answer.eq_ignore_ascii_case("yes") {
        Html(views::index_page(&state))
    } else {
        Html(views::invalid_answer_page())
    }
}

async fn health(State(state): State<SharedState>) -> String {
    format!(
        "ok: {} rows, {} columns\n",
        state.dataset.len(),
        state.dataset.columns().len()
    )
}
