use serde::{Deserialize, Serialize};

/// Descriptor for one shipped dataset, served by the API for the client's
/// dataset switcher. Symbology travels with the data because the scale
/// factor is a hand-tuned per-dataset constant (it is not derived from the
/// data range, so datasets of very different magnitudes need their own).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub id: String,
    pub title: String,
    pub attribution: String,
    /// Relative URL the client fetches the feature collection from.
    pub data_url: String,
    /// Property holding each feature's display name.
    pub name_key: String,
    pub scale_factor: f64,
    /// CSS colors for the circle markers.
    pub fill: String,
    pub stroke: String,
    /// Stroke while hovered.
    pub highlight: String,
}
