//! Writing, dispatching and cleaning up generated macros
//!
//! The host executes one macro at a time and only offers a synchronous
//! "is a macro running" probe, so dispatch polls that probe until it clears
//! before submitting.

use crate::artifact::ScriptArtifact;
use crate::errors::MacroError;
use crate::host::{MacroHost, SettingsProvider, MACRO_DIRECTORY_OPTION};
use crate::script::wrap_in_envelope;
use crate::slots::SlotAllocator;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Default interval between "is a macro running" probes
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

const PARENT_PREFIX: &str = "..\\";
const DRAWINGS_PREFIX: &str = "..\\drawings\\";
const SCRIPT_EXTENSION: &str = ".cs";

/// How long and how often to wait for the host's execution slot
#[derive(Debug, Clone)]
pub struct WaitPolicy {
    pub poll_interval: Duration,
    /// `None` waits for as long as the host stays busy
    pub deadline: Option<Duration>,
    pub cancellation: Option<CancellationToken>,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            deadline: None,
            cancellation: None,
        }
    }
}

impl WaitPolicy {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// What happened to a dispatched macro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    Executed,
    /// The host had no open session, nothing was submitted
    SkippedNotConnected,
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub file_name: String,
    pub status: DispatchStatus,
}

/// Runs generated macros against a host.
#[derive(Clone)]
pub struct MacroRunner {
    host: Arc<dyn MacroHost>,
    settings: Arc<dyn SettingsProvider>,
    slots: Arc<SlotAllocator>,
    wait: WaitPolicy,
}

impl MacroRunner {
    /// A runner sharing the process-wide slot allocator.
    pub fn new(host: Arc<dyn MacroHost>, settings: Arc<dyn SettingsProvider>) -> Self {
        Self {
            host,
            settings,
            slots: SlotAllocator::global(),
            wait: WaitPolicy::default(),
        }
    }

    pub fn with_slots(mut self, slots: Arc<SlotAllocator>) -> Self {
        self.slots = slots;
        self
    }

    pub fn with_wait_policy(mut self, wait: WaitPolicy) -> Self {
        self.wait = wait;
        self
    }

    pub fn macro_directory(&self) -> Result<PathBuf, MacroError> {
        self.settings
            .advanced_option(MACRO_DIRECTORY_OPTION)
            .map(PathBuf::from)
            .ok_or_else(|| {
                MacroError::Settings(format!("{MACRO_DIRECTORY_OPTION} is not set"))
            })
    }

    /// Write `script` wrapped in the envelope, execute it, then delete the
    /// file and its compile byproducts.
    ///
    /// Cleanup runs whether or not dispatch succeeded. When both fail, the
    /// dispatch error wins and the cleanup error is only logged.
    #[instrument(skip(self, script), fields(script_bytes = script.len()))]
    pub async fn run_script(&self, script: &str) -> Result<RunOutcome, MacroError> {
        let file_name = self.slots.next_name();
        let dir = self.macro_directory()?;
        let artifact = ScriptArtifact::new(&dir, &file_name);

        let dispatched = match artifact.write(&wrap_in_envelope(script)) {
            Ok(()) => self.run_macro(&format!("{PARENT_PREFIX}{file_name}")).await,
            Err(e) => Err(e),
        };
        let cleaned = artifact.cleanup().await;

        match (dispatched, cleaned) {
            (Ok(status), Ok(())) => {
                info!(%file_name, ?status, "Macro run finished");
                Ok(RunOutcome { file_name, status })
            }
            (Ok(_), Err(cleanup_err)) => Err(cleanup_err),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(cleanup_err)) => {
                warn!("Cleanup after failed run also failed: {}", cleanup_err);
                Err(e)
            }
        }
    }

    /// Submit an existing macro to the host.
    ///
    /// In the drawing editor the name is rebased under `..\drawings\`. A name
    /// without an extension gets `.cs`. When the host has no open session the
    /// call does nothing.
    #[instrument(skip(self))]
    pub async fn run_macro(&self, name: &str) -> Result<DispatchStatus, MacroError> {
        let mut macro_name = name.to_string();
        if self.host.is_drawing_active() {
            macro_name = format!("{DRAWINGS_PREFIX}{macro_name}");
        }

        if !self.host.is_connected() {
            debug!("Host is not connected, skipping {}", macro_name);
            return Ok(DispatchStatus::SkippedNotConnected);
        }

        if !has_extension(&macro_name) {
            macro_name.push_str(SCRIPT_EXTENSION);
        }

        self.wait_until_idle().await?;

        info!("Submitting macro {}", macro_name);
        self.host.run_macro(&macro_name).await?;
        Ok(DispatchStatus::Executed)
    }

    /// Poll the host until no macro is running.
    pub async fn wait_until_idle(&self) -> Result<(), MacroError> {
        let started = Instant::now();
        let mut polls: u64 = 0;

        while self.host.is_macro_running() {
            if let Some(deadline) = self.wait.deadline {
                if started.elapsed() >= deadline {
                    return Err(MacroError::Timeout(format!(
                        "host still running a macro after {deadline:?}"
                    )));
                }
            }

            polls += 1;
            if polls % 50 == 0 {
                debug!("Still waiting for running macro... {:?}", started.elapsed());
            }

            match &self.wait.cancellation {
                Some(token) => {
                    tokio::select! {
                        _ = tokio::time::sleep(self.wait.poll_interval) => {}
                        _ = token.cancelled() => {
                            return Err(MacroError::Cancelled(
                                "wait for running macro was cancelled".to_string(),
                            ));
                        }
                    }
                }
                None => tokio::time::sleep(self.wait.poll_interval).await,
            }
        }

        if polls > 0 {
            debug!(polls, "Host became idle after {:?}", started.elapsed());
        }
        Ok(())
    }
}

/// Extension check on the host's backslash-separated names
fn has_extension(name: &str) -> bool {
    let file = name.rsplit(['\\', '/']).next().unwrap_or(name);
    Path::new(file)
        .extension()
        .is_some_and(|ext| !ext.is_empty())
}
