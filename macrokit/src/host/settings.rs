use super::SettingsProvider;
use std::collections::HashMap;
use std::env;

/// Reads options from the process environment.
///
/// `<prefix><KEY>` is consulted first, then the bare key.
#[derive(Debug, Clone)]
pub struct EnvSettings {
    prefix: String,
}

impl EnvSettings {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for EnvSettings {
    fn default() -> Self {
        Self::new("MACROKIT_")
    }
}

impl SettingsProvider for EnvSettings {
    fn advanced_option(&self, key: &str) -> Option<String> {
        env::var(format!("{}{key}", self.prefix))
            .or_else(|_| env::var(key))
            .ok()
            .filter(|value| !value.trim().is_empty())
    }
}

/// Fixed in-memory option table
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    options: HashMap<String, String>,
}

impl StaticSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

impl SettingsProvider for StaticSettings {
    fn advanced_option(&self, key: &str) -> Option<String> {
        self.options.get(key).cloned()
    }
}
