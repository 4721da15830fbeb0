use popmap_shared::{DatasetInfo, FeatureCollection};

/// Fetch the dataset catalog for the switcher.
pub async fn dataset_list() -> Result<Vec<DatasetInfo>, String> {
    let resp = gloo_net::http::Request::get("/api/datasets")
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    resp.json::<Vec<DatasetInfo>>()
        .await
        .map_err(|e| format!("parse error: {e}"))
}

/// Fetch and validate one dataset's feature collection.
pub async fn feature_collection(url: &str) -> Result<FeatureCollection, String> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    let raw = resp
        .text()
        .await
        .map_err(|e| format!("read error: {e}"))?;

    FeatureCollection::from_json(&raw).map_err(|e| format!("invalid dataset: {e}"))
}
