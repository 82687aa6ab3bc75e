use super::MacroHost;
use crate::errors::MacroError;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info};

/// Host adapter that hands each macro to an external launcher program.
///
/// The launcher is invoked as `<program> <args...> <macro path>` and is
/// expected to return once the host has finished executing the macro. While
/// it runs, [`MacroHost::is_macro_running`] reports `true` and further
/// submissions are rejected with [`MacroError::Host`].
#[derive(Debug)]
pub struct CommandHost {
    program: PathBuf,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    connected: bool,
    drawing_active: bool,
    running: AtomicBool,
}

impl CommandHost {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            connected: true,
            drawing_active: false,
            running: AtomicBool::new(false),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_connected(mut self, connected: bool) -> Self {
        self.connected = connected;
        self
    }

    pub fn with_drawing_active(mut self, drawing_active: bool) -> Self {
        self.drawing_active = drawing_active;
        self
    }
}

struct RunningFlag<'a>(&'a AtomicBool);

impl Drop for RunningFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl MacroHost for CommandHost {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn is_drawing_active(&self) -> bool {
        self.drawing_active
    }

    fn is_macro_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    async fn run_macro(&self, path: &str) -> Result<(), MacroError> {
        // One macro at a time, even between a caller's idle check and here
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(MacroError::Host(format!(
                "a macro is already running, cannot submit {path}"
            )));
        }
        let _running = RunningFlag(&self.running);

        let mut command = tokio::process::Command::new(&self.program);
        command
            .args(&self.args)
            .arg(path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        info!("Launching {} for macro {}", self.program.display(), path);
        let output = command.output().await.map_err(|e| {
            error!("Failed to spawn macro launcher: {}", e);
            MacroError::Host(format!("failed to spawn {}: {e}", self.program.display()))
        })?;

        debug!(
            stdout = %String::from_utf8_lossy(&output.stdout).trim(),
            "Macro launcher finished with {}",
            output.status
        );

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("Macro launcher failed: {}", stderr.trim());
            return Err(MacroError::Host(format!(
                "launcher exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}
