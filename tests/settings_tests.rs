//! Integration tests for full settings resolution.

use datalab_settings::config::{DotEnv, Layered, MapSource, Settings, settings};
use datalab_settings::error::ConfigError;
use serial_test::serial;
use tempfile::TempDir;

const PROJECT_DIRS: [&str; 8] = [
    "src", "images", "data", "input", "output", "logs", "scripts", "tests",
];

/// Create a complete project tree and a source pointing its root at it.
fn project_fixture() -> (TempDir, MapSource) {
    let temp = TempDir::new().expect("temp dir");
    for dir in PROJECT_DIRS {
        std::fs::create_dir(temp.path().join(dir)).expect("project subdir");
    }
    let source = MapSource::new().with("PATH_PROJECT_ROOT", temp.path().to_str().unwrap());
    (temp, source)
}

#[test]
fn full_resolution_populates_every_sub_configuration() {
    let (temp, source) = project_fixture();
    let resolved = Settings::resolve_with(&source).expect("settings should resolve");

    let root = temp.path().canonicalize().unwrap();
    assert_eq!(resolved.paths.project_root, root);
    assert_eq!(
        resolved.project.name,
        root.file_name().unwrap().to_str().unwrap()
    );
    assert_eq!(resolved.plot.dpi, 300);
    assert_eq!(resolved.parameters.random_seed, 19210102);

    // Logger log file derives from logs dir + project name.
    assert_eq!(
        resolved.logger.log_file,
        root.join("logs").join(format!("{}.log", resolved.project.name))
    );

    // Derived sets compose directory/basename.extension from resolved values.
    assert_eq!(resolved.images.extension(), "png");
    assert_eq!(resolved.data.extension(), "parquet");
    assert_eq!(
        resolved.data.path("DUMMY").unwrap(),
        root.join("data").join("dummy.parquet")
    );
}

#[test]
fn env_file_overrides_sit_between_environment_and_defaults() {
    let (temp, source) = project_fixture();
    let env_file = temp.path().join(".env");
    std::fs::write(&env_file, "PLOT_DPI=150\nPLOT_FORMAT=svg\nLOG_LEVEL=DEBUG\n").unwrap();

    // The environment tier overrides DPI; the file tier supplies the rest.
    let layered = Layered::new(source.with("PLOT_DPI", "72"), DotEnv::load(&env_file));
    let resolved = Settings::resolve_with(&layered).expect("settings should resolve");

    assert_eq!(resolved.plot.dpi, 72);
    assert_eq!(resolved.plot.format, "svg");
    assert_eq!(resolved.logger.level.as_str(), "DEBUG");
    assert_eq!(resolved.images.extension(), "svg");
    assert_eq!(resolved.plot.bbox, "tight");
}

#[test]
fn resolving_twice_yields_identical_settings() {
    let (_temp, source) = project_fixture();
    let first = Settings::resolve_with(&source).unwrap();
    let second = Settings::resolve_with(&source).unwrap();
    assert_eq!(first, second);
}

#[test]
fn overrides_flow_through_to_derived_values() {
    let (_temp, source) = project_fixture();
    let source = source
        .with("PLOT_FORMAT", "SVG")
        .with("DATA_EXTENSION", "csv")
        .with("PARAM_RANDOM_SEED", "7");

    let resolved = Settings::resolve_with(&source).unwrap();
    assert_eq!(resolved.plot.format, "svg");
    // Images extension tracks the *resolved* plot format, not its default.
    assert_eq!(resolved.images.extension(), "svg");
    assert_eq!(
        resolved.data.path("DUMMY").unwrap(),
        resolved.paths.data.join("dummy.csv")
    );
    assert_eq!(resolved.parameters.random_seed, 7);
}

#[test]
fn missing_directory_aborts_the_whole_resolution() {
    let (temp, source) = project_fixture();
    std::fs::remove_dir(temp.path().join("scripts")).unwrap();

    let err = Settings::resolve_with(&source).unwrap_err();
    match err {
        ConfigError::PathNotFound { field, .. } => assert_eq!(field, "PATH_SCRIPTS"),
        other => panic!("expected PathNotFound, got {other}"),
    }
}

#[test]
fn invalid_override_aborts_the_whole_resolution() {
    let (_temp, source) = project_fixture();
    let source = source.with("LOG_LEVEL", "LOUD");

    let err = Settings::resolve_with(&source).unwrap_err();
    assert!(matches!(err, ConfigError::Validation { .. }));
}

#[test]
fn to_json_exposes_the_resolved_tree() {
    let (_temp, source) = project_fixture();
    let resolved = Settings::resolve_with(&source).unwrap();
    let json = resolved.to_json();

    assert_eq!(json["plot"]["dpi"], 300);
    assert_eq!(json["plot"]["context"], "notebook");
    assert_eq!(json["logger"]["level"], "INFO");
    assert!(json["paths"]["project_root"].is_string());
}

#[test]
#[serial(process_env)]
fn process_environment_overrides_are_honored() {
    let (temp, _) = project_fixture();

    // SAFETY: guarded by #[serial(process_env)]; no other thread in this
    // test binary touches these variables concurrently.
    unsafe {
        std::env::set_var("PATH_PROJECT_ROOT", temp.path());
        std::env::set_var("PLOT_DPI", "96");
    }

    let resolved = Settings::resolve().unwrap();
    assert_eq!(resolved.plot.dpi, 96);
    assert_eq!(
        resolved.paths.project_root,
        temp.path().canonicalize().unwrap()
    );

    unsafe {
        std::env::remove_var("PLOT_DPI");
        std::env::remove_var("PATH_PROJECT_ROOT");
    }
}

#[test]
#[serial(process_env)]
fn global_settings_are_resolved_once_and_shared() {
    let (temp, _) = project_fixture();

    unsafe {
        std::env::set_var("PATH_PROJECT_ROOT", temp.path());
    }

    let first = settings().expect("global settings should resolve");
    let second = settings().unwrap();
    assert!(std::ptr::eq(first, second));
    assert_eq!(first, second);

    unsafe {
        std::env::remove_var("PATH_PROJECT_ROOT");
    }

    // The cached value survives environment changes: no reconfiguration.
    let third = settings().unwrap();
    assert!(std::ptr::eq(first, third));
}
