pub mod attributes;
pub mod dataset;
pub mod feature;
pub mod hover;
pub mod legend;
pub mod sequence;
pub mod symbol;

pub use attributes::{AttributeSequence, POPULATION_MARKER, extract_attributes, year_label};
pub use dataset::DatasetInfo;
pub use feature::{FeatureCollection, LoadError, PointFeature, SchemaError};
pub use hover::HoverState;
pub use legend::LegendStats;
pub use sequence::SequenceCursor;
pub use symbol::{legend_label, symbol_radius};
