use crate::tasks::{self, DrawingKind};

#[test]
fn test_numbering_picks_callback_by_flag() {
    assert_eq!(
        tasks::perform_numbering(true).to_string(),
        "akit.Callback(\"acmd_partnumbers_all\", \"\", \"main_frame\");\n"
    );
    assert_eq!(
        tasks::perform_numbering(false).to_string(),
        "akit.Callback(\"acmd_partnumbers_selected\", \"\", \"main_frame\");\n"
    );
}

#[test]
fn test_single_part_drawing_properties() {
    assert_eq!(
        tasks::open_drawing_properties(DrawingKind::SinglePart, "standard").to_string(),
        concat!(
            "akit.Callback(\"acmd_display_attr_dialog\", \"wdraw_dial\", \"main_frame\");\n",
            "akit.ValueChange(\"wdraw_dial\", \"gr_wdraw_get_menu\", \"standard\");\n",
            "akit.PushButton(\"gr_wdraw_get\", \"wdraw_dial\");\n",
        )
    );
}

#[test]
fn test_cast_unit_drawing_properties_dialog() {
    let script = tasks::open_drawing_properties(DrawingKind::CastUnit, "x").to_string();
    assert!(script.contains("\"cudraw_dial\""));
    assert!(script.contains("akit.PushButton(\"gr_cudraw_get\", \"cudraw_dial\");\n"));
}

#[test]
fn test_auto_drawing_script() {
    assert_eq!(
        tasks::open_auto_drawing_script("beams").to_string(),
        concat!(
            "akit.Callback(\"acmd_create_drawings_auto\", \"\", \"main_frame\");\n",
            "akit.ListSelect(\"dia_auto_drawings\", \"auto_drawings_list\", \"beams\");\n",
            "akit.PushButton(\"Pushbutton_133\", \"dia_auto_drawings\");\n",
        )
    );
}

#[test]
fn test_ga_drawing_from_template() {
    let script = tasks::create_ga_drawing_from_template("plan").to_string();
    let lines: Vec<&str> = script.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1], "akit.PushButton(\"Pushbutton\", \"Create GA-drawing\");");
    assert_eq!(lines[4], "akit.PushButton(\"gr_gdraw_ok\", \"gdraw_dial\");");
}

#[test]
fn test_drawing_kind_parsing() {
    assert_eq!("ga".parse::<DrawingKind>().unwrap(), DrawingKind::GeneralArrangement);
    assert_eq!("cast_unit".parse::<DrawingKind>().unwrap(), DrawingKind::CastUnit);
    assert_eq!(
        DrawingKind::SinglePart.to_string().parse::<DrawingKind>().unwrap(),
        DrawingKind::SinglePart
    );
    assert!("roof".parse::<DrawingKind>().is_err());
}

#[test]
fn test_simple_dialog_tasks() {
    assert_eq!(
        tasks::open_numbering_settings().to_string(),
        "akit.Callback(\"acmd_display_partnumbers_set_options\", \"\", \"main_frame\");\n"
    );
    assert_eq!(
        tasks::open_drawing_list().to_string(),
        "akit.Callback(\"gdr_menu_select_active_draw\", \"\", \"main_frame\");\n"
    );
}
