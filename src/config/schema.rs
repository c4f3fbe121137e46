use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "no_color": { "type": "boolean" },
            "enable_dashboard": { "type": "boolean" },
            "api_key": { "type": "string" },
            "pricing_api_endpoint": { "type": "string", "format": "uri" },
            "dashboard_api_endpoint": { "type": "string", "format": "uri" },
            "log_level": { "type": "string", "enum": ["error", "warn", "info", "debug", "trace"] }
        }
    })
});
