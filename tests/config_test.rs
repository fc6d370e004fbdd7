//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Precedence (lowest to highest): defaults, global file, project-local file, env vars.
//! These tests pass explicit temp paths, so the user's real global config is never read.

use std::fs;

use tempfile::TempDir;

use rectree::application::ApplicationError;
use rectree::config::{local_config_path, Settings};

fn write_global(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("rectree.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn given_no_config_files_when_load_then_defaults() {
    let global_dir = TempDir::new().unwrap();
    let project_dir = TempDir::new().unwrap();
    let missing_global = global_dir.path().join("rectree.toml");

    let settings = Settings::load_from(Some(&missing_global), Some(project_dir.path())).unwrap();

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_global_and_local_when_load_then_local_overrides_global() {
    let global_dir = TempDir::new().unwrap();
    let project_dir = TempDir::new().unwrap();
    let global = write_global(&global_dir, "label_max_len = 60\nmax_tree_depth = 12\n");
    fs::write(local_config_path(project_dir.path()), "label_max_len = 25\n").unwrap();

    let settings = Settings::load_from(Some(&global), Some(project_dir.path())).unwrap();

    assert_eq!(settings.label_max_len, 25);
    assert_eq!(settings.max_tree_depth, 12);
    assert_eq!(settings.max_tree_nodes, Settings::default().max_tree_nodes);
}

#[test]
fn given_malformed_global_when_load_then_config_error() {
    let global_dir = TempDir::new().unwrap();
    let global = write_global(&global_dir, "label_max_len = \"forty\"\n");

    let result = Settings::load_from(Some(&global), None);

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_unknown_field_when_load_then_rejected() {
    let project_dir = TempDir::new().unwrap();
    fs::write(local_config_path(project_dir.path()), "edtior = \"vim\"\n").unwrap();

    let result = Settings::load_from(None, Some(project_dir.path()));

    match result {
        Err(ApplicationError::Config { message }) => assert!(message.contains("edtior")),
        other => panic!("expected Config error, got {:?}", other),
    }
}

#[test]
fn given_label_limit_too_small_when_load_then_validation_fails() {
    let project_dir = TempDir::new().unwrap();
    fs::write(local_config_path(project_dir.path()), "label_max_len = 2\n").unwrap();

    let result = Settings::load_from(None, Some(project_dir.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_loaded_settings_when_rendering_toml_then_reparses_to_same_values() {
    let project_dir = TempDir::new().unwrap();
    fs::write(local_config_path(project_dir.path()), "max_tree_nodes = 500\n").unwrap();
    let settings = Settings::load_from(None, Some(project_dir.path())).unwrap();

    let rendered = settings.to_toml().unwrap();
    let reparsed: Settings = toml::from_str(&rendered).unwrap();

    assert_eq!(reparsed, settings);
}

#[test]
fn given_template_when_parsed_then_is_valid_empty_config() {
    let project_dir = TempDir::new().unwrap();
    fs::write(local_config_path(project_dir.path()), Settings::template()).unwrap();

    let settings = Settings::load_from(None, Some(project_dir.path())).unwrap();

    assert_eq!(settings, Settings::default());
}
