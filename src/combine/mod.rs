pub mod combiner;
pub mod currency;
pub mod fields;
pub mod options;
pub mod version;

pub use combiner::combine;
pub use currency::{reconcile, reconcile_all, BASELINE_CURRENCY};
pub use fields::{resolve_fields, Field, FieldSelection};
pub use options::CombineOptions;
pub use version::{VersionGate, MAX_OUTPUT_VERSION, MIN_OUTPUT_VERSION};
