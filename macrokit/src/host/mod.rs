//! Narrow interface to the host application
//!
//! The host compiles and executes macro files on its own; all this crate needs
//! is a handful of probes and a way to submit a file.

use crate::errors::MacroError;

pub mod command;
pub mod settings;

pub use command::CommandHost;
pub use settings::{EnvSettings, StaticSettings};

/// Advanced option that names the host's macro directory
pub const MACRO_DIRECTORY_OPTION: &str = "XS_MACRO_DIRECTORY";

/// Looks up host configuration values by option name
pub trait SettingsProvider: Send + Sync {
    fn advanced_option(&self, key: &str) -> Option<String>;
}

/// The common trait every host adapter must implement
#[async_trait::async_trait]
pub trait MacroHost: Send + Sync {
    /// Whether a model session is open
    fn is_connected(&self) -> bool;

    /// Whether the drawing editor is the active context
    fn is_drawing_active(&self) -> bool;

    /// Whether the host is busy executing a macro
    fn is_macro_running(&self) -> bool;

    /// Submit a macro by the path the host resolves relative to its
    /// modeling or drawing macro folder
    async fn run_macro(&self, path: &str) -> Result<(), MacroError>;
}
