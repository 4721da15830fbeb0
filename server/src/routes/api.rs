use axum::Json;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use popmap_shared::DatasetInfo;

use crate::config::DATASET_CACHE_CONTROL;
use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let datasets: Vec<serde_json::Value> = state
        .datasets
        .iter()
        .map(|dataset| {
            serde_json::json!({
                "id": dataset.info.id,
                "features": dataset.feature_count,
                "attributes": dataset.attribute_count,
            })
        })
        .collect();
    Json(serde_json::json!({
        "status": "ok",
        "dataset_count": state.datasets.len(),
        "datasets": datasets,
    }))
}

pub async fn list_datasets(State(state): State<AppState>) -> Json<Vec<DatasetInfo>> {
    Json(state.infos())
}

/// Serve pre-serialized dataset bytes — no re-parse, no re-serialization.
pub async fn get_dataset(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    let Some(dataset) = state.dataset(&id) else {
        return Err(StatusCode::NOT_FOUND);
    };

    if if_none_match_matches(&headers, &dataset.etag) {
        return Ok(not_modified_response(
            DATASET_CACHE_CONTROL,
            Some(dataset.etag.as_str()),
        ));
    }

    Ok(json_bytes_response(
        (*dataset.json).clone(),
        DATASET_CACHE_CONTROL,
        Some(dataset.etag.as_str()),
    ))
}

fn json_bytes_response(body: Bytes, cache_control: &'static str, etag: Option<&str>) -> Response {
    let mut response = Response::new(Body::from(body));
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_control),
    );
    if let Some(etag) = etag
        && let Ok(etag_header) = HeaderValue::from_str(etag)
    {
        headers.insert(header::ETAG, etag_header);
    }
    response
}

fn not_modified_response(cache_control: &'static str, etag: Option<&str>) -> Response {
    let mut response = StatusCode::NOT_MODIFIED.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_control),
    );
    if let Some(etag) = etag
        && let Ok(etag_header) = HeaderValue::from_str(etag)
    {
        headers.insert(header::ETAG, etag_header);
    }
    response
}

fn normalize_etag(candidate: &str) -> &str {
    candidate.strip_prefix("W/").unwrap_or(candidate).trim()
}

fn if_none_match_matches(headers: &HeaderMap, etag: &str) -> bool {
    let Some(value) = headers.get(header::IF_NONE_MATCH) else {
        return false;
    };
    let Ok(raw) = value.to_str() else {
        return false;
    };

    raw.split(',').any(|candidate| {
        let candidate = candidate.trim();
        candidate == "*" || normalize_etag(candidate) == normalize_etag(etag)
    })
}
