pub mod formatting;
pub mod paths;
