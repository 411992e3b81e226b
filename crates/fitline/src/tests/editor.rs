use fitline_core::geom::vector;
use fitline_core::{Align, Format, LineFormat};

use crate::editor::{DragEvent, EditAttr, EditBounds, EditValue, LayoutEditor, SizingFont};

fn sample_format() -> Format {
    let line = |y: f64| LineFormat {
        x: 100.0,
        y,
        width: 300.0,
        path: None,
        align: Align::Center,
        min_font: 10.0,
        max_font: 40.0,
    };
    Format::new(vec![line(50.0), line(150.0)]).unwrap()
}

fn editor() -> LayoutEditor {
    let mut editor = LayoutEditor::new(EditBounds {
        max_width: 500.0,
        max_height: 400.0,
    });
    editor.set_format(&sample_format());
    editor
}

#[test]
fn drags_track_floats_and_snap_on_end() {
    let mut editor = editor();

    editor.drag(
        0,
        DragEvent::Move {
            delta: vector(0.7, 0.4),
        },
    );
    editor.drag(
        0,
        DragEvent::Move {
            delta: vector(0.7, 0.4),
        },
    );

    // X is replicated by default, Y never is.
    let lines = editor.active_lines();
    assert!((lines[0].x() - 101.4).abs() < 1e-9);
    assert!((lines[0].y() - 50.8).abs() < 1e-9);
    assert!((lines[1].x() - 101.4).abs() < 1e-9);
    assert_eq!(lines[1].y(), 150.0);

    editor.drag(0, DragEvent::End);

    let lines = editor.active_lines();
    assert_eq!(lines[0].x(), 101.0);
    assert_eq!(lines[0].y(), 50.0);
    assert_eq!(lines[1].x(), 101.0);
}

#[test]
fn keyboard_edits_floor_and_replicate_shared_attributes() {
    let mut editor = editor();

    let modified = editor.set_value(0, EditAttr::Width, EditValue::Number(250.5));

    assert!(modified);
    assert_eq!(editor.active_lines()[0].width(), 250.0);
    assert_eq!(editor.active_lines()[1].width(), 250.0);

    editor.set_value(1, EditAttr::Y, EditValue::Number(175.0));
    assert_eq!(editor.active_lines()[0].y(), 50.0);
    assert_eq!(editor.active_lines()[1].y(), 175.0);
}

#[test]
fn unchanged_edits_report_no_modification() {
    let mut editor = editor();

    assert!(!editor.set_value(0, EditAttr::Width, EditValue::Number(300.0)));
    assert!(!editor.set_value(0, EditAttr::Align, EditValue::Align(Align::Center)));
    assert!(editor.set_value(0, EditAttr::Align, EditValue::Align(Align::Left)));
    assert_eq!(editor.active_lines()[1].align(), Align::Left);
}

#[test]
fn min_font_cannot_pass_max_font_outside_a_drag() {
    let mut editor = editor();

    editor.set_value(0, EditAttr::MinFont, EditValue::Number(60.0));

    assert_eq!(editor.active_lines()[0].min_font(), 40.0);

    editor.set_value(0, EditAttr::MaxFont, EditValue::Number(5.0));
    assert_eq!(editor.active_lines()[0].max_font(), 40.0);
}

#[test]
fn values_are_clamped_to_the_image_bounds() {
    let mut editor = editor();

    editor.set_value(0, EditAttr::X, EditValue::Number(900.0));
    assert_eq!(editor.active_lines()[0].x(), 500.0);

    // Fonts are capped at half the image height.
    editor.set_value(0, EditAttr::MaxFont, EditValue::Number(900.0));
    assert_eq!(editor.active_lines()[0].max_font(), 200.0);
}

#[test]
fn resizing_edits_the_selected_font_bound() {
    let mut editor = editor();

    editor.drag(
        0,
        DragEvent::Resize {
            delta_left: 0.0,
            delta_width: 0.0,
            delta_height: 5.0,
        },
    );
    editor.drag(0, DragEvent::End);

    // The sizing rect is centre-anchored: 5 units of edge travel = +10 font.
    assert_eq!(editor.active_lines()[0].max_font(), 50.0);
    assert_eq!(editor.active_lines()[1].max_font(), 50.0);
    assert_eq!(editor.active_lines()[0].min_font(), 10.0);

    editor.set_sizing(SizingFont::Min);
    editor.drag(
        0,
        DragEvent::Resize {
            delta_left: 0.0,
            delta_width: 0.0,
            delta_height: 2.5,
        },
    );
    editor.drag(0, DragEvent::End);

    assert_eq!(editor.active_lines()[0].min_font(), 15.0);
    assert_eq!(editor.active_lines()[0].max_font(), 50.0);
}

#[test]
fn width_resizes_shift_x_by_the_left_edge_delta() {
    let mut editor = editor();

    editor.drag(
        1,
        DragEvent::Resize {
            delta_left: -10.0,
            delta_width: 10.0,
            delta_height: 0.0,
        },
    );
    editor.drag(1, DragEvent::End);

    let lines = editor.active_lines();
    assert_eq!(lines[1].x(), 90.0);
    assert_eq!(lines[1].width(), 310.0);
    // X and width are replicated by default.
    assert_eq!(lines[0].x(), 90.0);
    assert_eq!(lines[0].width(), 310.0);
}

#[test]
fn keep_same_toggle_pushes_the_current_value_to_all_lines() {
    let mut editor = editor();

    editor.set_keep_same(EditAttr::Width, false);
    editor.set_value(1, EditAttr::Width, EditValue::Number(220.0));
    assert_eq!(editor.active_lines()[0].width(), 300.0);

    assert!(!editor.all_same(EditAttr::Width));

    let modified = editor.set_keep_same(EditAttr::Width, true);
    assert!(modified);
    assert_eq!(editor.active_lines()[0].width(), 220.0);
    assert!(editor.all_same(EditAttr::Width));
}

#[test]
fn shrinking_the_image_reclamps_current_values() {
    let mut editor = editor();

    editor.set_max_sizes(80.0, 400.0);

    let lines = editor.active_lines();
    assert_eq!(lines[0].x(), 80.0);
    assert_eq!(lines[0].width(), 80.0);
    assert_eq!(lines[0].max_font(), 40.0);
}

#[test]
fn degenerate_image_height_floors_fonts_at_one() {
    // Half of a 1-unit image height rounds the font ceiling to 0, below the
    // fixed floor of 1; loading and editing must degrade, not panic.
    let mut editor = LayoutEditor::new(EditBounds {
        max_width: 500.0,
        max_height: 1.0,
    });
    editor.set_format(&sample_format());

    let lines = editor.active_lines();
    assert_eq!(lines[0].min_font(), 1.0);
    assert_eq!(lines[0].max_font(), 1.0);
    assert_eq!(lines[0].y(), 1.0);

    editor.set_value(0, EditAttr::MaxFont, EditValue::Number(30.0));
    assert_eq!(editor.active_lines()[0].max_font(), 1.0);
}

#[test]
fn edited_lines_round_trip_into_a_valid_format() {
    let mut editor = editor();
    editor.set_value(0, EditAttr::Width, EditValue::Number(250.0));
    editor.set_value(0, EditAttr::Align, EditValue::Align(Align::Right));

    let format = editor.to_format().unwrap();

    assert_eq!(format.line_count(), 2);
    assert_eq!(format.lines()[0].width, 250.0);
    assert_eq!(format.lines()[0].align, Align::Right);
    assert_eq!(format.lines()[0].min_font, 10.0);
}
