use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Point geometry in GeoJSON order: `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

impl PointGeometry {
    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}

/// One geographic point with a flat attribute record. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointFeature {
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: Map<String, Value>,
    pub geometry: PointGeometry,
}

impl PointFeature {
    /// Display name read from the dataset's configured name property.
    /// Missing or non-string values fall back to the empty string.
    pub fn display_name(&self, name_key: &str) -> &str {
        self.properties
            .get(name_key)
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Numeric coercion of a property value. Numbers pass through, numeric
    /// strings parse; anything else (including a missing key) is NaN.
    pub fn numeric_value(&self, key: &str) -> f64 {
        match self.properties.get(key) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to parse feature collection: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A feature's property-key set diverges from the first feature's.
    #[error("feature {index} ({name:?}) does not share the first feature's property keys")]
    Divergent { index: usize, name: Option<String> },
}

/// Ordered sequence of point features sharing one property schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<PointFeature>,
}

impl FeatureCollection {
    /// Parse a GeoJSON feature collection and check schema uniformity.
    ///
    /// The first feature defines the schema; every other feature must expose
    /// exactly the same property keys. An empty collection parses fine and is
    /// left for callers to treat as a configuration problem.
    pub fn from_json(input: &str) -> Result<Self, LoadError> {
        let collection: Self = serde_json::from_str(input)?;
        collection.validate_schema()?;
        Ok(collection)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    fn validate_schema(&self) -> Result<(), SchemaError> {
        let Some(first) = self.features.first() else {
            return Ok(());
        };

        for (index, feature) in self.features.iter().enumerate().skip(1) {
            let same = feature.properties.len() == first.properties.len()
                && first
                    .properties
                    .keys()
                    .all(|key| feature.properties.contains_key(key));
            if !same {
                return Err(SchemaError::Divergent {
                    index,
                    name: feature
                        .properties
                        .values()
                        .find_map(Value::as_str)
                        .map(str::to_owned),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{FeatureCollection, LoadError, SchemaError};

    const TWO_CITIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"City": "Tokyo", "Pop_1985": 30304000, "Pop_1990": 32530000},
                "geometry": {"type": "Point", "coordinates": [139.8089, 35.6850]}
            },
            {
                "type": "Feature",
                "properties": {"City": "Mumbai", "Pop_1985": 9920000, "Pop_1990": 12408000},
                "geometry": {"type": "Point", "coordinates": [72.8479, 19.0170]}
            }
        ]
    }"#;

    #[test]
    fn parses_a_uniform_collection() {
        let collection = FeatureCollection::from_json(TWO_CITIES).expect("collection parses");
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.features[0].display_name("City"), "Tokyo");
        assert_eq!(collection.features[1].geometry.longitude(), 72.8479);
    }

    #[test]
    fn property_key_order_is_preserved() {
        let collection = FeatureCollection::from_json(TWO_CITIES).expect("collection parses");
        let keys: Vec<&str> = collection.features[0]
            .properties
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["City", "Pop_1985", "Pop_1990"]);
    }

    #[test]
    fn numeric_value_coerces_numbers_strings_and_garbage() {
        let collection = FeatureCollection::from_json(
            r#"{
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "properties": {"City": "X", "Pop_2000": "1500", "Pop_2010": null},
                    "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}
                }]
            }"#,
        )
        .expect("collection parses");
        let feature = &collection.features[0];
        assert_eq!(feature.numeric_value("Pop_2000"), 1500.0);
        assert!(feature.numeric_value("Pop_2010").is_nan());
        assert!(feature.numeric_value("Pop_1990").is_nan());
        assert!(feature.numeric_value("City").is_nan());
    }

    #[test]
    fn empty_collection_is_valid() {
        let collection =
            FeatureCollection::from_json(r#"{"type": "FeatureCollection", "features": []}"#)
                .expect("empty collection parses");
        assert!(collection.is_empty());
    }

    #[test]
    fn divergent_schema_is_rejected() {
        let err = FeatureCollection::from_json(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "properties": {"City": "A", "Pop_1990": 1},
                        "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}
                    },
                    {
                        "type": "Feature",
                        "properties": {"City": "B", "Area": 7},
                        "geometry": {"type": "Point", "coordinates": [1.0, 1.0]}
                    }
                ]
            }"#,
        )
        .expect_err("divergent schema must fail");
        match err {
            LoadError::Schema(SchemaError::Divergent { index, name }) => {
                assert_eq!(index, 1);
                assert_eq!(name.as_deref(), Some("B"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = FeatureCollection::from_json("{not json").expect_err("must fail");
        assert!(matches!(err, LoadError::Parse(_)));
    }
}
