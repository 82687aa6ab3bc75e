use crate::errors::MacroError;
use crate::host::{
    CommandHost, EnvSettings, SettingsProvider, StaticSettings, MACRO_DIRECTORY_OPTION,
};
use crate::runner::{MacroRunner, WaitPolicy, DEFAULT_POLL_INTERVAL};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const ENV_MACRO_DIRECTORY: &str = "MACROKIT_MACRO_DIRECTORY";
pub const ENV_POLL_INTERVAL_MS: &str = "MACROKIT_POLL_INTERVAL_MS";
pub const ENV_WAIT_TIMEOUT_MS: &str = "MACROKIT_WAIT_TIMEOUT_MS";

/// How to reach the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Launcher invoked as `<program> <args...> <macro path>`
    pub program: Option<PathBuf>,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub connected: bool,
    pub drawing_active: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            program: None,
            args: Vec::new(),
            working_dir: None,
            connected: true,
            drawing_active: false,
        }
    }
}

/// Runner configuration, loaded from a YAML or JSON file and the environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroConfig {
    /// Overrides the host's `XS_MACRO_DIRECTORY` option
    pub macro_directory: Option<PathBuf>,
    pub poll_interval_ms: u64,
    /// No value means wait for as long as the host is busy
    pub wait_timeout_ms: Option<u64>,
    pub host: HostConfig,
}

impl Default for MacroConfig {
    fn default() -> Self {
        Self {
            macro_directory: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            wait_timeout_ms: None,
            host: HostConfig::default(),
        }
    }
}

impl MacroConfig {
    pub fn parse(content: &str) -> Result<Self, MacroError> {
        if let Ok(config) = serde_json::from_str::<MacroConfig>(content) {
            return Ok(config);
        }
        serde_yaml::from_str::<MacroConfig>(content)
            .map_err(|e| MacroError::Config(format!("invalid configuration: {e}")))
    }

    pub async fn load(path: &Path) -> Result<Self, MacroError> {
        debug!("Loading configuration from {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| MacroError::io(path, e))?;
        Self::parse(&content)
    }

    /// Apply `MACROKIT_*` environment overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = env::var(ENV_MACRO_DIRECTORY) {
            if !dir.trim().is_empty() {
                self.macro_directory = Some(PathBuf::from(dir));
            }
        }
        if let Some(ms) = env_millis(ENV_POLL_INTERVAL_MS) {
            self.poll_interval_ms = ms;
        }
        if let Some(ms) = env_millis(ENV_WAIT_TIMEOUT_MS) {
            self.wait_timeout_ms = Some(ms);
        }
        self
    }

    pub fn wait_policy(&self) -> WaitPolicy {
        let interval = Duration::from_millis(self.poll_interval_ms.max(1));
        let mut policy = WaitPolicy::default().with_poll_interval(interval);
        if let Some(ms) = self.wait_timeout_ms {
            policy = policy.with_deadline(Duration::from_millis(ms));
        }
        policy
    }

    /// Settings with the configured macro directory, falling back to the
    /// environment when none is configured.
    pub fn settings(&self) -> Arc<dyn SettingsProvider> {
        match &self.macro_directory {
            Some(dir) => Arc::new(
                StaticSettings::new()
                    .with_option(MACRO_DIRECTORY_OPTION, dir.to_string_lossy()),
            ),
            None => Arc::new(EnvSettings::default()),
        }
    }

    pub fn command_host(&self) -> Result<CommandHost, MacroError> {
        let program = self
            .host
            .program
            .clone()
            .ok_or_else(|| MacroError::Config("host.program is not set".to_string()))?;

        let mut host = CommandHost::new(program)
            .with_args(self.host.args.iter().cloned())
            .with_connected(self.host.connected)
            .with_drawing_active(self.host.drawing_active);
        if let Some(dir) = &self.host.working_dir {
            host = host.with_working_dir(dir);
        }
        Ok(host)
    }

    /// A runner wired to the configured launcher.
    pub fn runner(&self) -> Result<MacroRunner, MacroError> {
        let host = self.command_host()?;
        Ok(MacroRunner::new(Arc::new(host), self.settings())
            .with_wait_policy(self.wait_policy()))
    }
}

fn env_millis(key: &str) -> Option<u64> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(ms),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}
