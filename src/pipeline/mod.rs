pub mod orchestrator;
pub mod telemetry;

pub use orchestrator::{OutputOutcome, OutputPipeline, OutputRequest};
