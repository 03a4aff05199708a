use std::io::Write;

use chatui_runtime::{Dispatcher, KeyMsg};
use chatui_widgets::{ConfigError, FormField, KeyAction, WidgetConfig};

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[keys.form]
next = ["ctrl+j"]
submit = ["ctrl+s"]

[form]
max_field_width = 20
"#
    )
    .unwrap();

    let config = WidgetConfig::load(file.path()).unwrap();
    assert_eq!(config.max_field_width, 20);
    assert_eq!(
        config.form_keys.action_for(&"ctrl+j".parse().unwrap()),
        Some(KeyAction::Next)
    );

    let form = config.form(vec![FormField::new("Team")]);
    let mut d = Dispatcher::new(form);
    for c in "acme".chars() {
        d.send(KeyMsg::from_char(c));
    }
    d.send("enter".parse::<KeyMsg>().unwrap());
    d.run_until_idle();
    assert!(!d.model().is_submitted());
    assert_eq!(d.model().value(0).as_deref(), Some("acme"));

    d.send("ctrl+s".parse::<KeyMsg>().unwrap());
    d.run_until_idle();
    assert!(d.model().is_submitted());
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("widgets.toml");
    let err = WidgetConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("widgets.toml"));
}
