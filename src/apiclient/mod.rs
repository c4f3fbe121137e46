pub mod client;
pub mod http;
pub mod types;

pub use client::TelemetryClient;
pub use http::HttpTelemetryClient;
pub use types::AddRunResponse;
