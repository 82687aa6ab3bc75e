//! Script text accumulation and the host script grammar
//!
//! Every command is rendered as a single line in the form
//! `akit.<Operation>(<args>);` terminated by `\n`. Text arguments are wrapped in
//! double quotes and inserted verbatim, integers are written as bare numerals.

use std::fmt::{self, Write};

/// Receiver token every command line is prefixed with
pub const SCRIPT_NAMESPACE: &str = "akit";

const ENVELOPE_OPEN: &str = "namespace Tekla.Technology.Akit.UserScript {\
public class Script {\
public static void Run(Tekla.Technology.Akit.IScript akit) {";

const ENVELOPE_CLOSE: &str = "}}}";

/// A single command argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Str(String),
    Int(i64),
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(value)
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Int(value)
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Arg::Int(value.into())
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Str(s) => write!(f, "\"{s}\""),
            Arg::Int(n) => write!(f, "{n}"),
        }
    }
}

/// Append-only buffer of serialized command lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptBuffer {
    text: String,
}

impl ScriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the buffer with previously generated script text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Append `akit.<operation>(<args>);\n`
    pub fn push_call(&mut self, operation: &str, args: &[Arg]) {
        self.open_call(operation);
        for (index, arg) in args.iter().enumerate() {
            if index > 0 {
                self.text.push_str(", ");
            }
            // Writing into a String cannot fail.
            let _ = write!(self.text, "{arg}");
        }
        self.close_call();
    }

    /// Append `akit.<operation>("<dialog>", "<field>", <item>, ...);\n`
    ///
    /// Used by the list and table selections, where the dialog/field pair is
    /// always present and followed by any number of items.
    pub fn push_selection<I>(&mut self, operation: &str, dialog: &str, field: &str, items: I)
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        self.open_call(operation);
        let _ = write!(self.text, "\"{dialog}\", \"{field}\"");
        for item in items {
            let _ = write!(self.text, ", {}", item.into());
        }
        self.close_call();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    fn open_call(&mut self, operation: &str) {
        self.text.push_str(SCRIPT_NAMESPACE);
        self.text.push('.');
        self.text.push_str(operation);
        self.text.push('(');
    }

    fn close_call(&mut self) {
        self.text.push_str(");\n");
    }
}

impl fmt::Display for ScriptBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Wrap command lines in the class/method envelope the host compiles.
pub fn wrap_in_envelope(body: &str) -> String {
    let mut script = String::with_capacity(ENVELOPE_OPEN.len() + body.len() + ENVELOPE_CLOSE.len());
    script.push_str(ENVELOPE_OPEN);
    script.push_str(body);
    script.push_str(ENVELOPE_CLOSE);
    script
}
