//! Ready-made macros for common modeling tasks
//!
//! Dialog, field and button names below are the host's own identifiers and
//! are passed through untouched.

use crate::builder::{MacroBuilder, DEFAULT_FRAME};
use crate::errors::MacroError;
use crate::runner::{MacroRunner, RunOutcome};
use std::fmt;
use std::str::FromStr;
use tracing::{error, info};

/// Drawing types that share the same properties dialog layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingKind {
    SinglePart,
    Assembly,
    CastUnit,
    GeneralArrangement,
}

impl DrawingKind {
    /// Dialog prefix the host uses for this drawing type
    fn dialog_prefix(self) -> &'static str {
        match self {
            DrawingKind::SinglePart => "wdraw",
            DrawingKind::Assembly => "adraw",
            DrawingKind::CastUnit => "cudraw",
            DrawingKind::GeneralArrangement => "gdraw",
        }
    }
}

impl fmt::Display for DrawingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DrawingKind::SinglePart => "single-part",
            DrawingKind::Assembly => "assembly",
            DrawingKind::CastUnit => "cast-unit",
            DrawingKind::GeneralArrangement => "general-arrangement",
        };
        f.write_str(name)
    }
}

impl FromStr for DrawingKind {
    type Err = MacroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "single-part" | "single" | "w" => Ok(DrawingKind::SinglePart),
            "assembly" | "a" => Ok(DrawingKind::Assembly),
            "cast-unit" | "cu" => Ok(DrawingKind::CastUnit),
            "general-arrangement" | "ga" | "g" => Ok(DrawingKind::GeneralArrangement),
            other => Err(MacroError::InvalidArgument(format!(
                "unknown drawing kind: {other}"
            ))),
        }
    }
}

/// Numbering for all modified parts, or only the selected ones.
pub fn perform_numbering(all_modified: bool) -> MacroBuilder {
    let callback = if all_modified {
        "acmd_partnumbers_all"
    } else {
        "acmd_partnumbers_selected"
    };
    MacroBuilder::new().callback_in(callback, "", DEFAULT_FRAME)
}

pub fn open_numbering_settings() -> MacroBuilder {
    MacroBuilder::new().callback_in("acmd_display_partnumbers_set_options", "", DEFAULT_FRAME)
}

pub fn open_drawing_list() -> MacroBuilder {
    MacroBuilder::new().callback_in("gdr_menu_select_active_draw", "", DEFAULT_FRAME)
}

/// Opens the drawing properties dialog and loads the named settings.
pub fn open_drawing_properties(kind: DrawingKind, name: &str) -> MacroBuilder {
    let prefix = kind.dialog_prefix();
    let dialog = format!("{prefix}_dial");
    MacroBuilder::new()
        .callback_in("acmd_display_attr_dialog", &dialog, DEFAULT_FRAME)
        .value_change(&dialog, &format!("gr_{prefix}_get_menu"), name)
        .push_button(&format!("gr_{prefix}_get"), &dialog)
}

pub fn open_auto_drawing_script(name: &str) -> MacroBuilder {
    MacroBuilder::new()
        .callback_in("acmd_create_drawings_auto", "", DEFAULT_FRAME)
        .list_select("dia_auto_drawings", "auto_drawings_list", [name])
        .push_button("Pushbutton_133", "dia_auto_drawings")
}

pub fn create_ga_drawing_from_template(name: &str) -> MacroBuilder {
    MacroBuilder::new()
        .callback_in("acmd_create_dim_general_assembly_drawing", "", DEFAULT_FRAME)
        .push_button("Pushbutton", "Create GA-drawing")
        .value_change("gdraw_dial", "gr_gdraw_get_menu", name)
        .push_button("gr_gdraw_get", "gdraw_dial")
        .push_button("gr_gdraw_ok", "gdraw_dial")
}

/// Runs common tasks and logs failures instead of returning them.
#[derive(Clone)]
pub struct TaskRunner {
    runner: MacroRunner,
}

impl TaskRunner {
    pub fn new(runner: MacroRunner) -> Self {
        Self { runner }
    }

    /// Run `builder`, logging the outcome. Returns `None` on failure.
    pub async fn run(&self, task: &str, builder: MacroBuilder) -> Option<RunOutcome> {
        match builder.run(&self.runner).await {
            Ok(outcome) => {
                info!(
                    task,
                    file_name = %outcome.file_name,
                    status = ?outcome.status,
                    "Task finished"
                );
                Some(outcome)
            }
            Err(e) => {
                error!(task, "Task failed: {}", e);
                None
            }
        }
    }

    pub async fn perform_numbering(&self, all_modified: bool) -> Option<RunOutcome> {
        self.run("perform_numbering", perform_numbering(all_modified)).await
    }

    pub async fn open_numbering_settings(&self) -> Option<RunOutcome> {
        self.run("open_numbering_settings", open_numbering_settings()).await
    }

    pub async fn open_drawing_list(&self) -> Option<RunOutcome> {
        self.run("open_drawing_list", open_drawing_list()).await
    }

    pub async fn open_drawing_properties(
        &self,
        kind: DrawingKind,
        name: &str,
    ) -> Option<RunOutcome> {
        self.run("open_drawing_properties", open_drawing_properties(kind, name)).await
    }

    pub async fn open_auto_drawing_script(&self, name: &str) -> Option<RunOutcome> {
        self.run("open_auto_drawing_script", open_auto_drawing_script(name)).await
    }

    pub async fn create_ga_drawing_from_template(&self, name: &str) -> Option<RunOutcome> {
        self.run(
            "create_ga_drawing_from_template",
            create_ga_drawing_from_template(name),
        )
        .await
    }
}
