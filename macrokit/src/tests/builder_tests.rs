use crate::errors::MacroError;
use crate::script::{wrap_in_envelope, Arg, ScriptBuffer};
use crate::{MacroBuilder, DEFAULT_FRAME};

#[test]
fn test_value_change_then_push_button() {
    let script = MacroBuilder::new()
        .value_change("d", "f", "v")
        .push_button("b", "fr")
        .to_string();

    assert_eq!(
        script,
        "akit.ValueChange(\"d\", \"f\", \"v\");\nakit.PushButton(\"b\", \"fr\");\n"
    );
}

#[test]
fn test_table_select_items_are_unquoted() {
    let script = MacroBuilder::new().table_select("d", "f", [1, 2, 3]).to_string();
    assert_eq!(script, "akit.TableSelect(\"d\", \"f\", 1, 2, 3);\n");
}

#[test]
fn test_list_select_items_are_quoted() {
    let script = MacroBuilder::new()
        .list_select("dia_auto_drawings", "auto_drawings_list", ["a", "b"])
        .to_string();
    assert_eq!(
        script,
        "akit.ListSelect(\"dia_auto_drawings\", \"auto_drawings_list\", \"a\", \"b\");\n"
    );
}

#[test]
fn test_selections_without_items() {
    let script = MacroBuilder::new()
        .list_select("d", "f", Vec::<String>::new())
        .table_select("d", "f", [])
        .file_selection(Vec::<&str>::new())
        .to_string();
    assert_eq!(
        script,
        "akit.ListSelect(\"d\", \"f\");\nakit.TableSelect(\"d\", \"f\");\nakit.FileSelection();\n"
    );
}

#[test]
fn test_file_selection_has_no_dialog_pair() {
    let script = MacroBuilder::new()
        .file_selection(["C:\\a.dwg", "b.dwg"])
        .to_string();
    assert_eq!(script, "akit.FileSelection(\"C:\\a.dwg\", \"b.dwg\");\n");
}

#[test]
fn test_generic_commands() {
    let script = MacroBuilder::new()
        .activate("dlg", "fld")
        .check_value("chk", 1)
        .command_start("ail_create_beam", "", "View_01 window_1")
        .command_end()
        .modal_dialog(1)
        .mouse_down("View_01 window_1", "View_1_1", 120, -40, 2)
        .mouse_up("View_01 window_1", "View_1_1", 125, -38, 0)
        .tab_change("dlg", "tabs", "page2")
        .tree_select("dlg", "tree", "row 1")
        .to_string();

    let expected = concat!(
        "akit.Activate(\"dlg\", \"fld\");\n",
        "akit.CheckValue(\"chk\", 1);\n",
        "akit.CommandStart(\"ail_create_beam\", \"\", \"View_01 window_1\");\n",
        "akit.CommandEnd();\n",
        "akit.ModalDialog(1);\n",
        "akit.MouseDown(\"View_01 window_1\", \"View_1_1\", 120, -40, 2);\n",
        "akit.MouseUp(\"View_01 window_1\", \"View_1_1\", 125, -38, 0);\n",
        "akit.TabChange(\"dlg\", \"tabs\", \"page2\");\n",
        "akit.TreeSelect(\"dlg\", \"tree\", \"row 1\");\n",
    );
    assert_eq!(script, expected);
}

#[test]
fn test_callback_shorthands_match_full_form() {
    let short = MacroBuilder::new().callback("foo").unwrap().to_string();
    let with_parameter = MacroBuilder::new().callback_with("foo", "").to_string();
    let full = MacroBuilder::new()
        .callback_in("foo", "", DEFAULT_FRAME)
        .to_string();

    assert_eq!(short, full);
    assert_eq!(with_parameter, full);
    assert_eq!(full, "akit.Callback(\"foo\", \"\", \"main_frame\");\n");
}

#[test]
fn test_callback_rejects_empty_name_before_appending() {
    let builder = MacroBuilder::new().push_button("b", "fr");
    let before = builder.to_string();

    let result = builder.clone().callback("");
    assert!(matches!(result, Err(MacroError::InvalidArgument(_))));
    assert_eq!(builder.to_string(), before);
}

#[test]
fn test_empty_strings_are_not_validated() {
    let script = MacroBuilder::new()
        .callback_with("", "")
        .value_change("", "", "")
        .to_string();
    assert_eq!(
        script,
        "akit.Callback(\"\", \"\", \"main_frame\");\nakit.ValueChange(\"\", \"\", \"\");\n"
    );
}

#[test]
fn test_from_script_round_trip_and_append() {
    let seed = "akit.CommandEnd();\n";
    let builder = MacroBuilder::from_script(seed);
    assert_eq!(builder.to_string(), seed);
    assert_eq!(builder.as_str(), seed);

    let extended = builder.push_button("b", "fr");
    assert_eq!(
        extended.to_string(),
        format!("{seed}akit.PushButton(\"b\", \"fr\");\n")
    );
}

#[test]
fn test_appends_preserve_call_order() {
    let mut builder = MacroBuilder::new();
    let mut expected = String::new();
    for i in 0..10 {
        let button = format!("button_{i}");
        builder = builder.push_button(&button, "frame");
        expected.push_str(&format!("akit.PushButton(\"{button}\", \"frame\");\n"));
    }
    assert_eq!(builder.to_string(), expected);
}

#[test]
fn test_arg_rendering() {
    assert_eq!(Arg::from("x").to_string(), "\"x\"");
    assert_eq!(Arg::from(-7i64).to_string(), "-7");
    assert_eq!(Arg::from(String::new()).to_string(), "\"\"");
}

#[test]
fn test_script_buffer_zero_arg_call() {
    let mut buffer = ScriptBuffer::new();
    assert!(buffer.is_empty());
    buffer.push_call("CommandEnd", &[]);
    assert_eq!(buffer.as_str(), "akit.CommandEnd();\n");
}

#[test]
fn test_envelope_wraps_body() {
    let body = "akit.CommandEnd();\n";
    let script = wrap_in_envelope(body);
    assert_eq!(
        script,
        "namespace Tekla.Technology.Akit.UserScript {public class Script {public static void Run(Tekla.Technology.Akit.IScript akit) {akit.CommandEnd();\n}}}"
    );
}
