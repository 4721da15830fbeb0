use std::sync::Arc;

use bytes::Bytes;
use popmap_shared::DatasetInfo;

/// One dataset loaded, validated, and pre-serialized at startup — request
/// handlers serve the shared bytes without re-serialization.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub info: DatasetInfo,
    pub feature_count: usize,
    pub attribute_count: usize,
    pub json: Arc<Bytes>,
    pub etag: String,
}

#[derive(Clone)]
pub struct AppState {
    pub datasets: Arc<Vec<LoadedDataset>>,
}

impl AppState {
    pub fn new(datasets: Vec<LoadedDataset>) -> Self {
        Self {
            datasets: Arc::new(datasets),
        }
    }

    pub fn dataset(&self, id: &str) -> Option<&LoadedDataset> {
        self.datasets.iter().find(|dataset| dataset.info.id == id)
    }

    pub fn infos(&self) -> Vec<DatasetInfo> {
        self.datasets
            .iter()
            .map(|dataset| dataset.info.clone())
            .collect()
    }
}
