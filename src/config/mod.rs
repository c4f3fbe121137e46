pub mod context;
pub mod credentials;
pub mod parser;
pub mod schema;
pub mod types;

pub use context::RunContext;
pub use types::*;
pub use parser::{load_config, parse_config};
