// tests/config_test.rs
use git_bump::config::{load_config, Config, CONFIG_FILE_NAME};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_from_explicit_path() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
manifest = "pyproject.toml"
version_key = "project.version"
tag_pattern = "release-{version}"
annotated_tags = false
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let root = TempDir::new().unwrap();
    let config = load_config(root.path(), Some(temp_file.path())).unwrap();
    assert_eq!(config.manifest, PathBuf::from("pyproject.toml"));
    assert_eq!(config.version_key, "project.version");
    assert_eq!(config.tag_pattern, "release-{version}");
    assert!(!config.annotated_tags);
    assert_eq!(config.remote, "origin");
}

#[test]
fn test_load_from_project_root() {
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join(CONFIG_FILE_NAME),
        "remote = \"upstream\"\nrequire_increasing_explicit = true\n",
    )
    .unwrap();

    let config = load_config(root.path(), None).unwrap();
    assert_eq!(config.remote, "upstream");
    assert!(config.require_increasing_explicit);
}

#[test]
fn test_explicit_path_wins_over_project_file() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join(CONFIG_FILE_NAME), "remote = \"upstream\"\n").unwrap();
    let other = root.path().join("other.toml");
    fs::write(&other, "remote = \"mirror\"\n").unwrap();

    let config = load_config(root.path(), Some(&other)).unwrap();
    assert_eq!(config.remote, "mirror");
}

#[test]
fn test_missing_explicit_path_is_an_error() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("nope.toml");
    let err = load_config(root.path(), Some(&missing)).unwrap_err();
    assert_eq!(err.exit_code(), 7);
}

#[test]
fn test_invalid_toml_is_an_error() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join(CONFIG_FILE_NAME), "remote = \n").unwrap();
    assert!(load_config(root.path(), None).is_err());
}

#[test]
fn test_default_values() {
    let config = Config::default();
    assert_eq!(config.tag_pattern, "v{version}");
    assert_eq!(
        config.commit_message,
        "chore(release): bump version to {version}"
    );
    assert_eq!(config.version_key, "package.version");
}
