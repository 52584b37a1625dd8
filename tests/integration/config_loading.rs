//! Layered configuration loading

use statescope::config::{global_config_path, ConfigLoader};
use statescope::error::InspectorError;
use tempfile::TempDir;

use crate::integration::{with_xdg_env, write_fixture};

#[test]
fn test_defaults_without_any_file() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("workspace");
    std::fs::create_dir_all(&workspace).unwrap();

    let config = with_xdg_env(&test_dir, || ConfigLoader::load(&workspace)).unwrap();
    assert_eq!(config, ConfigLoader::default());
    assert_eq!(config.inspector.default_environment, "production");
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_global_file_is_read_from_xdg_config_home() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("workspace");
    std::fs::create_dir_all(&workspace).unwrap();
    write_fixture(
        &test_dir.path().join("xdg").join("statescope"),
        "config.toml",
        "[inspector]\ndefault_environment = \"staging\"\ndefault_viewport_width = 800\n",
    );

    let config = with_xdg_env(&test_dir, || {
        assert_eq!(
            global_config_path(),
            Some(test_dir.path().join("xdg").join("statescope").join("config.toml"))
        );
        ConfigLoader::load(&workspace)
    })
    .unwrap();
    assert_eq!(config.inspector.default_environment, "staging");
    assert_eq!(config.inspector.default_viewport_width, 800);
}

#[test]
fn test_workspace_profile_overrides_base_and_global() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("workspace");
    write_fixture(
        &test_dir.path().join("xdg").join("statescope"),
        "config.toml",
        "[inspector]\ndefault_environment = \"global\"\ndefault_viewport_height = 600\n",
    );
    write_fixture(
        &workspace.join("config"),
        "config.toml",
        "[inspector]\ndefault_environment = \"base\"\n\n[logging]\nlevel = \"info\"\n",
    );
    write_fixture(
        &workspace.join("config"),
        "development.toml",
        "[inspector]\ndefault_environment = \"dev\"\n",
    );

    let config = with_xdg_env(&test_dir, || ConfigLoader::load(&workspace)).unwrap();
    assert_eq!(config.inspector.default_environment, "dev");
    assert_eq!(config.inspector.default_viewport_height, 600);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_environment_variables_win() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("workspace");
    write_fixture(
        &workspace.join("config"),
        "config.toml",
        "[inspector]\ndefault_environment = \"base\"\n",
    );

    let config = with_xdg_env(&test_dir, || {
        std::env::set_var("STATESCOPE__INSPECTOR__DEFAULT_ENVIRONMENT", "preview");
        let result = ConfigLoader::load(&workspace);
        std::env::remove_var("STATESCOPE__INSPECTOR__DEFAULT_ENVIRONMENT");
        result
    })
    .unwrap();
    assert_eq!(config.inspector.default_environment, "preview");
}

#[test]
fn test_configured_widget_type_joins_catalogue() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("workspace");
    write_fixture(
        &workspace.join("config"),
        "config.toml",
        r#"
[widget_types.rating]
margin = "2px"
height_mode = "auto"

[widget_types.rating.defaults]
value = 0
"#,
    );

    let config = with_xdg_env(&test_dir, || ConfigLoader::load(&workspace)).unwrap();
    let registry = config.widget_registry();
    let rating = registry.get("rating").unwrap();
    assert_eq!(rating.margin, "2px");
    assert_eq!(rating.defaults.get("value"), Some(&serde_json::json!(0)));
    assert!(registry.contains("textInput"));
}

#[test]
fn test_camel_case_widget_types_survive_layering() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("workspace");
    write_fixture(
        &test_dir.path().join("xdg").join("statescope"),
        "config.toml",
        r##"
[widget_types.colorPicker.defaults]
selectedColor = "#000000"
"##,
    );
    write_fixture(
        &workspace.join("config"),
        "development.toml",
        r#"
[widget_types.datePicker]
heightMode = "auto"

[widget_types.datePicker.defaults]
selectedDate = "2026-01-01"
"#,
    );

    let config = with_xdg_env(&test_dir, || ConfigLoader::load(&workspace)).unwrap();
    let registry = config.widget_registry();

    let date_picker = registry.get("datePicker").unwrap();
    assert_eq!(
        date_picker.defaults.get("selectedDate"),
        Some(&serde_json::json!("2026-01-01"))
    );
    let color_picker = registry.get("colorPicker").unwrap();
    assert_eq!(
        color_picker.defaults.get("selectedColor"),
        Some(&serde_json::json!("#000000"))
    );
    assert!(registry.get("datepicker").is_none());
    assert!(registry.get("colorpicker").is_none());
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("workspace");
    write_fixture(
        &workspace.join("config"),
        "config.toml",
        "[inspector]\ndefault_environment = \"  \"\n\n[logging]\nlevel = \"loud\"\n",
    );

    let err = with_xdg_env(&test_dir, || ConfigLoader::load(&workspace)).unwrap_err();
    match err {
        InspectorError::ConfigError(msg) => {
            assert!(msg.contains("Inspector"), "message: {}", msg);
            assert!(msg.contains("Logging"), "message: {}", msg);
        }
        other => panic!("expected ConfigError, got {:?}", other),
    }
}

#[test]
fn test_explicit_file_must_exist() {
    let test_dir = TempDir::new().unwrap();
    let missing = test_dir.path().join("nope.toml");
    assert!(matches!(
        ConfigLoader::load_from_file(&missing),
        Err(InspectorError::ConfigError(_))
    ));
}
