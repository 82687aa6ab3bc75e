//! Host application macro generation and execution
//!
//! [`MacroBuilder`] records UI-simulation commands (push a button, change a
//! field value, select list items) as host script text. A [`MacroRunner`]
//! writes that text into the host's macro directory under a rotating file
//! name, waits for the host's single execution slot, submits the macro and
//! deletes the generated files afterwards.
//!
//! ```no_run
//! use macrokit::{CommandHost, MacroBuilder, MacroRunner, StaticSettings};
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), macrokit::MacroError> {
//! let runner = MacroRunner::new(
//!     Arc::new(CommandHost::new("akit-launcher")),
//!     Arc::new(StaticSettings::new().with_option("XS_MACRO_DIRECTORY", "C:/macros")),
//! );
//!
//! MacroBuilder::new()
//!     .callback("acmd_partnumbers_all")?
//!     .run(&runner)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod builder;
pub mod commands;
pub mod config;
pub mod errors;
pub mod host;
pub mod runner;
pub mod script;
pub mod slots;
pub mod tasks;
#[cfg(test)]
mod tests;

pub use artifact::ScriptArtifact;
pub use builder::{MacroBuilder, DEFAULT_FRAME};
pub use commands::{MacroCommand, MacroWorkflow};
pub use config::MacroConfig;
pub use errors::MacroError;
pub use host::{CommandHost, EnvSettings, MacroHost, SettingsProvider, StaticSettings};
pub use runner::{DispatchStatus, MacroRunner, RunOutcome, WaitPolicy};
pub use script::{wrap_in_envelope, Arg, ScriptBuffer};
pub use slots::SlotAllocator;
pub use tasks::{DrawingKind, TaskRunner};
