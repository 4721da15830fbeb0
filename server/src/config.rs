use std::path::PathBuf;

pub const SERVER_PORT: u16 = 3000;
pub const DEFAULT_DATA_DIR: &str = "data";

/// Cache lifetime for dataset payloads; they only change on redeploy.
pub const DATASET_CACHE_CONTROL: &str = "public, max-age=3600";

/// Built-in dataset table. Symbol scale factors are hand-tuned per dataset
/// so circle sizes stay visually distinguishable at each data magnitude.
pub struct BuiltinDataset {
    pub id: &'static str,
    pub title: &'static str,
    pub attribution: &'static str,
    pub file: &'static str,
    pub name_key: &'static str,
    pub scale_factor: f64,
    pub fill: &'static str,
    pub stroke: &'static str,
    pub highlight: &'static str,
}

pub const DATASETS: &[BuiltinDataset] = &[
    BuiltinDataset {
        id: "megacities",
        title: "World megacity population",
        attribution: "UN World Urbanization Prospects",
        file: "megacities.geojson",
        name_key: "City",
        scale_factor: 0.000_05,
        fill: "#ff7800",
        stroke: "#000000",
        highlight: "#ffd24d",
    },
    BuiltinDataset {
        id: "rustbelt",
        title: "Rust Belt city population",
        attribution: "US Census Data",
        file: "rustbelt.geojson",
        name_key: "City",
        scale_factor: 0.015,
        fill: "#6b3c34",
        stroke: "salmon",
        highlight: "lightpink",
    },
];

pub fn server_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(SERVER_PORT)
}

pub fn data_dir() -> PathBuf {
    std::env::var("DATA_DIR")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

#[cfg(test)]
mod tests {
    use super::{DATASETS, DEFAULT_DATA_DIR, SERVER_PORT, data_dir, server_port};

    #[test]
    fn port_falls_back_on_missing_or_garbage_env() {
        temp_env::with_var("PORT", None::<&str>, || {
            assert_eq!(server_port(), SERVER_PORT);
        });
        temp_env::with_var("PORT", Some("not-a-port"), || {
            assert_eq!(server_port(), SERVER_PORT);
        });
        temp_env::with_var("PORT", Some("8088"), || {
            assert_eq!(server_port(), 8088);
        });
    }

    #[test]
    fn data_dir_env_override() {
        temp_env::with_var("DATA_DIR", None::<&str>, || {
            assert_eq!(data_dir(), std::path::PathBuf::from(DEFAULT_DATA_DIR));
        });
        temp_env::with_var("DATA_DIR", Some("/srv/popmap"), || {
            assert_eq!(data_dir(), std::path::PathBuf::from("/srv/popmap"));
        });
    }

    #[test]
    fn builtin_dataset_ids_are_unique() {
        for (i, a) in DATASETS.iter().enumerate() {
            for b in &DATASETS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
