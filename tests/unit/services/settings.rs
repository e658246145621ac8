use super::*;
use tempfile::tempdir;

#[test]
fn default_file_is_written_once_and_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(".chemdraw").join("settings.json");

    write_default_if_missing(&path).unwrap();
    assert!(path.exists());
    assert_eq!(load_settings_from(&path).unwrap(), Settings::default());

    std::fs::write(&path, r#"{"labels": {"next": "Weiter"}}"#).unwrap();
    write_default_if_missing(&path).unwrap();
    assert_eq!(load_settings_from(&path).unwrap().labels.next, "Weiter");
}

#[test]
fn partial_file_keeps_defaults_for_missing_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{"layout": {"menu_item_width": 20}, "labels": {"submit": "Done"}}"#,
    )
    .unwrap();

    let settings = load_settings_from(&path).unwrap();
    assert_eq!(settings.layout.menu_item_width, 20);
    assert_eq!(settings.layout.menu_item_height, 3);
    assert_eq!(settings.labels.submit, "Done");
    assert_eq!(settings.labels.cancel, "Cancel");
    assert_eq!(settings.colors, ColorSettings::default());
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = load_settings_from(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, SettingsError::Io(_)));
}

#[test]
fn invalid_json_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = load_settings_from(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Parse(_)));
    assert!(err.to_string().starts_with("settings parse error"));
}

#[test]
fn colors_parse_with_fallback() {
    let colors = ColorSettings {
        menu_active: Some("cyan".to_string()),
        button_on: Some("not-a-color".to_string()),
        highlight: None,
        ..ColorSettings::default()
    };
    assert_eq!(colors.menu_colors().active, Color::Indexed(6));
    assert_eq!(colors.button_colors().on, ButtonColors::default().on);
    assert_eq!(
        colors.dialog_colors().highlight,
        DialogColors::default().highlight
    );
}

#[test]
fn layout_clamps_degenerate_metrics() {
    let layout = LayoutSettings {
        cell_width: 0,
        cell_gap: -3,
        button_height: 0,
        ..LayoutSettings::default()
    };
    let metrics = layout.grid_metrics();
    assert_eq!(metrics.cell_width, 1);
    assert_eq!(metrics.gap, 0);
    assert_eq!(layout.button_size(), (10, 1));
}
