//! Declarative macro steps
//!
//! A workflow file lists builder commands as data so a macro can be rendered
//! or run without writing code:
//!
//! ```yaml
//! name: open assembly drawing properties
//! steps:
//!   - action: callback
//!     callback: acmd_display_attr_dialog
//!     parameter: adraw_dial
//!   - action: value_change
//!     dialog: adraw_dial
//!     field: gr_adraw_get_menu
//!     data: standard
//!   - action: push_button
//!     button: gr_adraw_get
//!     frame: adraw_dial
//! ```

use crate::builder::{MacroBuilder, DEFAULT_FRAME};
use crate::errors::MacroError;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_frame() -> String {
    DEFAULT_FRAME.to_string()
}

/// One builder call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MacroCommand {
    Activate {
        dialog: String,
        field: String,
    },
    Callback {
        callback: String,
        #[serde(default)]
        parameter: String,
        #[serde(default = "default_frame")]
        frame: String,
    },
    CheckValue {
        name: String,
        value: i64,
    },
    CommandStart {
        command: String,
        #[serde(default)]
        parameter: String,
        #[serde(default = "default_frame")]
        frame: String,
    },
    CommandEnd,
    FileSelection {
        #[serde(default)]
        items: Vec<String>,
    },
    ListSelect {
        dialog: String,
        field: String,
        #[serde(default)]
        items: Vec<String>,
    },
    ModalDialog {
        value: i64,
    },
    MouseDown {
        frame: String,
        subframe: String,
        x: i64,
        y: i64,
        #[serde(default)]
        modifier: i64,
    },
    MouseUp {
        frame: String,
        subframe: String,
        x: i64,
        y: i64,
        #[serde(default)]
        modifier: i64,
    },
    PushButton {
        button: String,
        frame: String,
    },
    TabChange {
        dialog: String,
        field: String,
        item: String,
    },
    TableSelect {
        dialog: String,
        field: String,
        #[serde(default)]
        items: Vec<i64>,
    },
    TreeSelect {
        dialog: String,
        field: String,
        row: String,
    },
    ValueChange {
        dialog: String,
        field: String,
        data: String,
    },
}

impl MacroCommand {
    /// Append this command to `builder`.
    ///
    /// A callback step without a name is rejected the same way
    /// [`MacroBuilder::callback`] rejects it.
    pub fn apply(&self, builder: MacroBuilder) -> Result<MacroBuilder, MacroError> {
        let builder = match self {
            MacroCommand::Activate { dialog, field } => builder.activate(dialog, field),
            MacroCommand::Callback {
                callback,
                parameter,
                frame,
            } => {
                if callback.is_empty() {
                    return builder.callback(callback);
                }
                builder.callback_in(callback, parameter, frame)
            }
            MacroCommand::CheckValue { name, value } => builder.check_value(name, *value),
            MacroCommand::CommandStart {
                command,
                parameter,
                frame,
            } => builder.command_start(command, parameter, frame),
            MacroCommand::CommandEnd => builder.command_end(),
            MacroCommand::FileSelection { items } => builder.file_selection(items),
            MacroCommand::ListSelect {
                dialog,
                field,
                items,
            } => builder.list_select(dialog, field, items),
            MacroCommand::ModalDialog { value } => builder.modal_dialog(*value),
            MacroCommand::MouseDown {
                frame,
                subframe,
                x,
                y,
                modifier,
            } => builder.mouse_down(frame, subframe, *x, *y, *modifier),
            MacroCommand::MouseUp {
                frame,
                subframe,
                x,
                y,
                modifier,
            } => builder.mouse_up(frame, subframe, *x, *y, *modifier),
            MacroCommand::PushButton { button, frame } => builder.push_button(button, frame),
            MacroCommand::TabChange {
                dialog,
                field,
                item,
            } => builder.tab_change(dialog, field, item),
            MacroCommand::TableSelect {
                dialog,
                field,
                items,
            } => builder.table_select(dialog, field, items.iter().copied()),
            MacroCommand::TreeSelect { dialog, field, row } => {
                builder.tree_select(dialog, field, row)
            }
            MacroCommand::ValueChange {
                dialog,
                field,
                data,
            } => builder.value_change(dialog, field, data),
        };
        Ok(builder)
    }
}

/// A named list of steps loaded from JSON or YAML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroWorkflow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub steps: Vec<MacroCommand>,
}

impl MacroWorkflow {
    /// Parse workflow text, trying JSON first and then YAML.
    pub fn parse(content: &str) -> Result<Self, MacroError> {
        if let Ok(workflow) = serde_json::from_str::<MacroWorkflow>(content) {
            return Ok(workflow);
        }
        serde_yaml::from_str::<MacroWorkflow>(content)
            .map_err(|e| MacroError::Config(format!("invalid workflow: {e}")))
    }

    pub async fn load(path: &Path) -> Result<Self, MacroError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| MacroError::io(path, e))?;
        Self::parse(&content)
    }

    /// Replay every step onto a fresh builder.
    pub fn to_builder(&self) -> Result<MacroBuilder, MacroError> {
        self.steps
            .iter()
            .try_fold(MacroBuilder::new(), |builder, step| step.apply(builder))
    }
}
