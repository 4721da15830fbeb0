use popmap_shared::{
    DatasetInfo, FeatureCollection, HoverState, PointFeature, symbol_radius, year_label,
};

use crate::viewport::Viewport;

/// One rendered symbol bound 1:1 to a point feature. Radius and popup text
/// are derived state, recomputed wholesale on every attribute change.
#[derive(Debug, Clone)]
pub struct ClientMarker {
    pub feature: PointFeature,
    pub name: String,
    /// Projected world position.
    pub world: (f64, f64),
    /// Value of the currently selected attribute (NaN when missing/invalid).
    pub value: f64,
    /// Screen-pixel radius; 0 when the value does not produce a finite radius.
    pub radius: f64,
    pub popup: String,
    pub hover: HoverState,
}

/// Equirectangular projection: x = longitude, y = -latitude (canvas y grows
/// downward).
pub fn project(lon: f64, lat: f64) -> (f64, f64) {
    (lon, -lat)
}

/// Build one marker per feature for the selected attribute. `attribute` is
/// `None` when the dataset exposes no population series; markers then carry
/// a zero radius and an empty popup.
pub fn build(
    collection: &FeatureCollection,
    info: &DatasetInfo,
    attribute: Option<&str>,
) -> Vec<ClientMarker> {
    collection
        .features
        .iter()
        .map(|feature| {
            let name = feature.display_name(&info.name_key).to_owned();
            let world = project(feature.geometry.longitude(), feature.geometry.latitude());
            let mut marker = ClientMarker {
                feature: feature.clone(),
                name,
                world,
                value: f64::NAN,
                radius: 0.0,
                popup: String::new(),
                hover: HoverState::default(),
            };
            if let Some(attribute) = attribute {
                derive(&mut marker, info, attribute);
            }
            marker
        })
        .collect()
}

/// Re-derive every marker's radius and popup for a newly selected attribute.
pub fn apply_attribute(markers: &mut [ClientMarker], info: &DatasetInfo, attribute: &str) {
    for marker in markers {
        derive(marker, info, attribute);
    }
}

fn derive(marker: &mut ClientMarker, info: &DatasetInfo, attribute: &str) {
    let value = marker.feature.numeric_value(attribute);
    let radius = symbol_radius(value, info.scale_factor);
    marker.value = value;
    // A NaN value degrades this marker to an invisible symbol instead of
    // failing the whole render.
    marker.radius = if radius.is_finite() { radius } else { 0.0 };
    marker.popup = popup_text(attribute, value);
}

fn popup_text(attribute: &str, value: f64) -> String {
    format!(
        "Population in {}: {}",
        year_label(attribute),
        format_count(value)
    )
}

/// Thousands-separated display of a population count. NaN shows as a dash.
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_owned();
    }
    let negative = value < 0.0;
    let digits = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if negative {
        out.insert(0, '-');
    }
    out
}

/// Topmost marker under a screen coordinate, i.e. the last-drawn hit.
/// Markers with a zero radius never hit.
pub fn hit_test(markers: &[ClientMarker], vp: &Viewport, sx: f64, sy: f64) -> Option<usize> {
    markers
        .iter()
        .enumerate()
        .rev()
        .find(|(_, marker)| {
            let (mx, my) = vp.world_to_screen(marker.world.0, marker.world.1);
            let dx = sx - mx;
            let dy = sy - my;
            marker.radius > 0.0 && dx * dx + dy * dy <= marker.radius * marker.radius
        })
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::{apply_attribute, build, format_count, hit_test};
    use crate::viewport::Viewport;
    use popmap_shared::{DatasetInfo, FeatureCollection, symbol_radius};

    fn info() -> DatasetInfo {
        DatasetInfo {
            id: "rustbelt".into(),
            title: "Rust Belt city population".into(),
            attribution: "US Census Data".into(),
            data_url: "/api/datasets/rustbelt".into(),
            name_key: "City".into(),
            scale_factor: 0.015,
            fill: "#6b3c34".into(),
            stroke: "salmon".into(),
            highlight: "lightpink".into(),
        }
    }

    fn collection() -> FeatureCollection {
        FeatureCollection::from_json(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "properties": {"City": "Cleveland", "Pop_1950": 914808, "Pop_2010": "bad"},
                        "geometry": {"type": "Point", "coordinates": [-81.6944, 41.4993]}
                    },
                    {
                        "type": "Feature",
                        "properties": {"City": "Detroit", "Pop_1950": 1849568, "Pop_2010": 713777},
                        "geometry": {"type": "Point", "coordinates": [-83.0458, 42.3314]}
                    }
                ]
            }"#,
        )
        .expect("fixture parses")
    }

    #[test]
    fn build_derives_radius_popup_and_projection() {
        let markers = build(&collection(), &info(), Some("Pop_1950"));
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].name, "Cleveland");
        assert_eq!(markers[0].world, (-81.6944, -41.4993));
        let expected = symbol_radius(914_808.0, 0.015);
        assert!((markers[0].radius - expected).abs() < 1e-9);
        assert_eq!(markers[0].popup, "Population in 1950: 914,808");
    }

    #[test]
    fn invalid_value_degrades_to_zero_radius() {
        let mut markers = build(&collection(), &info(), Some("Pop_1950"));
        apply_attribute(&mut markers, &info(), "Pop_2010");
        assert!(markers[0].value.is_nan());
        assert_eq!(markers[0].radius, 0.0);
        assert_eq!(markers[0].popup, "Population in 2010: —");
        assert!(markers[1].radius > 0.0);
    }

    #[test]
    fn hit_test_prefers_the_topmost_marker_and_skips_degenerate_ones() {
        let mut markers = build(&collection(), &info(), Some("Pop_1950"));
        // Stack both markers on the same world point.
        markers[1].world = markers[0].world;
        let vp = Viewport::default();
        let (sx, sy) = vp.world_to_screen(markers[0].world.0, markers[0].world.1);
        assert_eq!(hit_test(&markers, &vp, sx, sy), Some(1));

        markers[1].radius = 0.0;
        assert_eq!(hit_test(&markers, &vp, sx, sy), Some(0));

        assert_eq!(hit_test(&markers, &vp, sx + 10_000.0, sy), None);
    }

    #[test]
    fn format_count_inserts_separators() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(950.0), "950");
        assert_eq!(format_count(914_808.0), "914,808");
        assert_eq!(format_count(1_849_568.0), "1,849,568");
        assert_eq!(format_count(f64::NAN), "—");
    }
}
