use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::types::CostmergeConfig;

/// Configuration plus values collected while a command runs, reported with
/// the usage event.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    pub config: CostmergeConfig,
    values: BTreeMap<String, Value>,
}

impl RunContext {
    pub fn new(config: CostmergeConfig) -> Self {
        Self {
            config,
            values: BTreeMap::new(),
        }
    }

    pub fn set_context_value(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn context_value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn full_version() -> String {
        format!(
            "{} ({})",
            env!("CARGO_PKG_VERSION"),
            option_env!("GIT_HASH").unwrap_or("dev")
        )
    }

    /// Environment attached to usage events.
    pub fn event_env(&self) -> Map<String, Value> {
        let mut env = Map::new();
        env.insert("version".into(), Value::from(env!("CARGO_PKG_VERSION")));
        env.insert("fullVersion".into(), Value::from(Self::full_version()));
        if let Some(built) = option_env!("BUILD_TIMESTAMP") {
            env.insert("buildTimestamp".into(), Value::from(built));
        }
        env.insert("os".into(), Value::from(std::env::consts::OS));
        env.insert("isSelfHosted".into(), Value::from(self.config.is_self_hosted()));
        env.insert("dashboardEnabled".into(), Value::from(self.config.enable_dashboard));
        for (key, value) in &self.values {
            env.insert(key.clone(), value.clone());
        }
        env
    }
}
