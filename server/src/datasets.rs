use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};

use popmap_shared::{DatasetInfo, FeatureCollection, LoadError, POPULATION_MARKER, extract_attributes};

use crate::config::{BuiltinDataset, DATASETS};
use crate::state::LoadedDataset;

#[derive(Debug, Error)]
pub enum DatasetLoadError {
    #[error("failed to read dataset file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("dataset {id} is invalid: {source}")]
    Data { id: String, source: LoadError },
}

/// Load, validate, and pre-serialize every built-in dataset. Any failure
/// aborts startup — serving a partial catalog would hide a broken deploy.
pub fn load_all(data_dir: &Path) -> Result<Vec<LoadedDataset>, DatasetLoadError> {
    let mut datasets = Vec::with_capacity(DATASETS.len());
    for builtin in DATASETS {
        let path = data_dir.join(builtin.file);
        let raw = std::fs::read_to_string(&path).map_err(|source| DatasetLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let dataset = from_json(describe(builtin), &raw).map_err(|source| {
            DatasetLoadError::Data {
                id: builtin.id.to_owned(),
                source,
            }
        })?;
        info!(
            id = %dataset.info.id,
            features = dataset.feature_count,
            attributes = dataset.attribute_count,
            "dataset loaded"
        );
        datasets.push(dataset);
    }
    Ok(datasets)
}

/// Parse and validate one dataset from raw GeoJSON text.
pub fn from_json(info: DatasetInfo, raw: &str) -> Result<LoadedDataset, LoadError> {
    let collection = FeatureCollection::from_json(raw)?;
    let attributes = extract_attributes(&collection, POPULATION_MARKER);

    if collection.is_empty() {
        warn!(id = %info.id, "dataset has no features; client controls will be disabled");
    } else if attributes.is_empty() {
        warn!(id = %info.id, "dataset has no population-series attributes");
    }

    let bytes = Bytes::from(raw.to_owned());
    let etag = format!("\"{}-{:08x}\"", info.id, crc32fast::hash(&bytes));

    Ok(LoadedDataset {
        feature_count: collection.len(),
        attribute_count: attributes.len(),
        info,
        json: Arc::new(bytes),
        etag,
    })
}

fn describe(builtin: &BuiltinDataset) -> DatasetInfo {
    DatasetInfo {
        id: builtin.id.to_owned(),
        title: builtin.title.to_owned(),
        attribution: builtin.attribution.to_owned(),
        data_url: format!("/api/datasets/{}", builtin.id),
        name_key: builtin.name_key.to_owned(),
        scale_factor: builtin.scale_factor,
        fill: builtin.fill.to_owned(),
        stroke: builtin.stroke.to_owned(),
        highlight: builtin.highlight.to_owned(),
    }
}
