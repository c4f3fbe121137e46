pub mod types;
pub mod classification;

pub use types::CostmergeError;
pub use classification::ErrorClassification;
