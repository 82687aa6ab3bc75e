use crate::errors::MacroError;
use crate::runner::{MacroRunner, RunOutcome};
use crate::script::{Arg, ScriptBuffer};
use std::fmt;
use tracing::instrument;

/// Frame used by the callback shorthands when none is given
pub const DEFAULT_FRAME: &str = "main_frame";

/// Fluent builder for host macro scripts.
///
/// Each append method consumes the builder and hands it back, so a whole
/// macro reads as one chain:
///
/// ```
/// use macrokit::MacroBuilder;
///
/// let script = MacroBuilder::new()
///     .value_change("d", "f", "v")
///     .push_button("b", "fr")
///     .to_string();
/// assert_eq!(script, "akit.ValueChange(\"d\", \"f\", \"v\");\nakit.PushButton(\"b\", \"fr\");\n");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MacroBuilder {
    script: ScriptBuffer,
}

impl MacroBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from previously generated script text.
    pub fn from_script(script: impl Into<String>) -> Self {
        Self {
            script: ScriptBuffer::from_text(script),
        }
    }

    /// Activates a field on a dialog.
    pub fn activate(self, dialog: &str, field: &str) -> Self {
        self.call("Activate", &[dialog.into(), field.into()])
    }

    /// Invokes a callback with no parameter on the main frame.
    ///
    /// This is the only append that validates its input: an empty callback
    /// name is rejected before anything is written.
    pub fn callback(self, callback: &str) -> Result<Self, MacroError> {
        if callback.is_empty() {
            return Err(MacroError::InvalidArgument(
                "callback name must not be empty".to_string(),
            ));
        }
        Ok(self.callback_with(callback, ""))
    }

    /// Invokes a callback with a parameter on the main frame.
    pub fn callback_with(self, callback: &str, parameter: &str) -> Self {
        self.callback_in(callback, parameter, DEFAULT_FRAME)
    }

    /// Invokes a callback on the given frame.
    pub fn callback_in(self, callback: &str, parameter: &str, frame: &str) -> Self {
        self.call("Callback", &[callback.into(), parameter.into(), frame.into()])
    }

    /// Checks (`1`) or unchecks (`0`) a field.
    pub fn check_value(self, name: &str, value: i64) -> Self {
        self.call("CheckValue", &[name.into(), value.into()])
    }

    pub fn command_start(self, command: &str, parameter: &str, frame: &str) -> Self {
        self.call(
            "CommandStart",
            &[command.into(), parameter.into(), frame.into()],
        )
    }

    pub fn command_end(self) -> Self {
        self.call("CommandEnd", &[])
    }

    /// Selects files in the host file dialog.
    pub fn file_selection<I, S>(self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<Arg> = items.into_iter().map(|s| s.as_ref().into()).collect();
        self.call("FileSelection", &args)
    }

    /// Selects items from a list field.
    pub fn list_select<I, S>(mut self, dialog: &str, field: &str, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.script.push_selection(
            "ListSelect",
            dialog,
            field,
            items.into_iter().map(|s| Arg::from(s.as_ref())),
        );
        self
    }

    /// Invokes a modal dialog by its numeric code.
    pub fn modal_dialog(self, value: i64) -> Self {
        self.call("ModalDialog", &[value.into()])
    }

    /// Simulates a mouse button down event.
    pub fn mouse_down(self, frame: &str, subframe: &str, x: i64, y: i64, modifier: i64) -> Self {
        self.mouse_event("MouseDown", frame, subframe, x, y, modifier)
    }

    /// Simulates a mouse button up event.
    pub fn mouse_up(self, frame: &str, subframe: &str, x: i64, y: i64, modifier: i64) -> Self {
        self.mouse_event("MouseUp", frame, subframe, x, y, modifier)
    }

    pub fn push_button(self, button: &str, frame: &str) -> Self {
        self.call("PushButton", &[button.into(), frame.into()])
    }

    /// Changes the active tab page.
    pub fn tab_change(self, dialog: &str, field: &str, item: &str) -> Self {
        self.call("TabChange", &[dialog.into(), field.into(), item.into()])
    }

    /// Selects rows of a table field by index.
    pub fn table_select<I>(mut self, dialog: &str, field: &str, items: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        self.script.push_selection("TableSelect", dialog, field, items);
        self
    }

    pub fn tree_select(self, dialog: &str, field: &str, row: &str) -> Self {
        self.call("TreeSelect", &[dialog.into(), field.into(), row.into()])
    }

    /// Changes a field value.
    pub fn value_change(self, dialog: &str, field: &str, data: &str) -> Self {
        self.call("ValueChange", &[dialog.into(), field.into(), data.into()])
    }

    /// The accumulated command lines, without the envelope.
    pub fn as_str(&self) -> &str {
        self.script.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }

    /// Write, execute and clean up the accumulated script.
    ///
    /// The builder is left untouched, so running it again executes the same
    /// text under a new slot name.
    #[instrument(level = "debug", skip(self, runner), fields(script_bytes = self.script.len()))]
    pub async fn run(&self, runner: &MacroRunner) -> Result<RunOutcome, MacroError> {
        runner.run_script(self.script.as_str()).await
    }

    fn mouse_event(
        self,
        operation: &str,
        frame: &str,
        subframe: &str,
        x: i64,
        y: i64,
        modifier: i64,
    ) -> Self {
        self.call(
            operation,
            &[
                frame.into(),
                subframe.into(),
                x.into(),
                y.into(),
                modifier.into(),
            ],
        )
    }

    fn call(mut self, operation: &str, args: &[Arg]) -> Self {
        self.script.push_call(operation, args);
        self
    }
}

impl fmt::Display for MacroBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.script, f)
    }
}

impl fmt::Debug for MacroBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MacroBuilder")
            .field("lines", &self.script.as_str().lines().count())
            .field("bytes", &self.script.len())
            .finish()
    }
}
