//! Derived file sets: directory + base name + extension composition.
//!
//! A derived schema declares exactly one DIRECTORY field and one EXTENSION
//! field; every other (string-valued) field is a base name that the
//! derivation rule replaces with `directory/basename.extension`. The rule
//! runs exactly once, after DIRECTORY and EXTENSION are resolved, and the
//! result holds only composed paths, so a second derivation pass is
//! unrepresentable.

use crate::config::paths::{PathSet, resolve_dir};
use crate::config::plot::PlotDefaults;
use crate::config::source::{Scope, Source};
use crate::config::validate;
use crate::error::{ConfigError, ConfigResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment prefix for the images file set.
pub const IMAGES_PREFIX: &str = "IMAGES_";
/// Environment prefix for the data file set.
pub const DATA_PREFIX: &str = "DATA_";

/// Base-name fields of the data file set: (field, default base name).
const DATA_FILES: &[(&str, &str)] = &[("DUMMY", "dummy")];

/// Base-name fields of the images file set.
const IMAGES_FILES: &[(&str, &str)] = &[];

/// A resolved directory, extension, and fully composed file paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedFileSet {
    schema: String,
    directory: PathBuf,
    extension: String,
    files: BTreeMap<String, PathBuf>,
}

impl DerivedFileSet {
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Composed path for a named base-name field.
    pub fn path(&self, field: &str) -> Option<&Path> {
        self.files.get(field).map(PathBuf::as_path)
    }

    /// All composed paths, in field order.
    pub fn files(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }
}

/// The path derivation rule.
///
/// Composes `directory/basename.extension` for every base-name field. The
/// DIRECTORY and EXTENSION fields themselves are exempt and must both be
/// present; a missing one is a [`ConfigError::Schema`] naming the schema.
pub fn derive_file_paths(
    schema: &str,
    directory: Option<&Path>,
    extension: Option<&str>,
    basenames: &[(String, String)],
) -> ConfigResult<DerivedFileSet> {
    let directory = directory
        .ok_or_else(|| ConfigError::schema(schema, "missing DIRECTORY field"))?
        .to_path_buf();
    let extension = extension
        .ok_or_else(|| ConfigError::schema(schema, "missing EXTENSION field"))?
        .to_string();

    let mut files = BTreeMap::new();
    for (field, basename) in basenames {
        let path = directory.join(format!("{basename}.{extension}"));
        files.insert(field.clone(), path);
    }

    Ok(DerivedFileSet {
        schema: schema.to_string(),
        directory,
        extension,
        files,
    })
}

/// Resolve a derived schema's own fields, then run the derivation rule.
fn resolve_set(
    schema: &str,
    prefix: &'static str,
    source: &dyn Source,
    default_directory: &Path,
    default_extension: &str,
    fields: &[(&str, &str)],
    base: &Path,
) -> ConfigResult<DerivedFileSet> {
    let scope = Scope::new(prefix, source);

    // DIRECTORY: override resolves against the project root and must exist;
    // the default comes from an already-validated PathSet entry.
    let directory = match scope.raw("DIRECTORY") {
        Some(raw) => resolve_dir(&format!("{prefix}DIRECTORY"), &raw, base)?,
        None => default_directory.to_path_buf(),
    };
    let extension = scope.validated("EXTENSION", default_extension, validate::lower_token)?;

    let mut basenames = Vec::with_capacity(fields.len());
    for (field, default) in fields {
        let basename = scope.validated(field, default, validate::non_empty)?;
        basenames.push((field.to_string(), basename));
    }

    derive_file_paths(schema, Some(&directory), Some(&extension), &basenames)
}

/// Figure output paths: directory from `PathSet.images`, extension from the
/// resolved plot format.
pub fn images_paths(
    source: &dyn Source,
    paths: &PathSet,
    plot: &PlotDefaults,
) -> ConfigResult<DerivedFileSet> {
    resolve_set(
        "ImagesPaths",
        IMAGES_PREFIX,
        source,
        &paths.images,
        &plot.format,
        IMAGES_FILES,
        &paths.project_root,
    )
}

/// Data file paths: directory from `PathSet.data`, parquet by default.
pub fn data_paths(source: &dyn Source, paths: &PathSet) -> ConfigResult<DerivedFileSet> {
    resolve_set(
        "DataPaths",
        DATA_PREFIX,
        source,
        &paths.data,
        "parquet",
        DATA_FILES,
        &paths.project_root,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::source::MapSource;
    use tempfile::TempDir;

    fn fixtures() -> (TempDir, PathSet) {
        let temp = TempDir::new().unwrap();
        for dir in [
            "src", "images", "data", "input", "output", "logs", "scripts", "tests",
        ] {
            std::fs::create_dir(temp.path().join(dir)).unwrap();
        }
        let source = MapSource::new().with("PATH_PROJECT_ROOT", temp.path().to_str().unwrap());
        let paths = PathSet::resolve(&source).unwrap();
        (temp, paths)
    }

    #[test]
    fn rule_composes_directory_basename_extension() {
        let set = derive_file_paths(
            "DataPaths",
            Some(Path::new("/srv/data")),
            Some("parquet"),
            &[("DUMMY".into(), "dummy".into())],
        )
        .unwrap();

        assert_eq!(set.path("DUMMY").unwrap(), Path::new("/srv/data/dummy.parquet"));
    }

    #[test]
    fn missing_directory_is_a_schema_error() {
        let err = derive_file_paths("DataPaths", None, Some("parquet"), &[]).unwrap_err();
        match err {
            ConfigError::Schema { schema, reason } => {
                assert_eq!(schema, "DataPaths");
                assert!(reason.contains("DIRECTORY"));
            }
            other => panic!("expected Schema, got {other}"),
        }
    }

    #[test]
    fn missing_extension_is_a_schema_error() {
        let err =
            derive_file_paths("ImagesPaths", Some(Path::new("/srv")), None, &[]).unwrap_err();
        assert!(matches!(err, ConfigError::Schema { .. }));
    }

    #[test]
    fn data_paths_use_resolved_directory_and_default_extension() {
        let (_temp, paths) = fixtures();
        let data = data_paths(&MapSource::new(), &paths).unwrap();

        assert_eq!(data.directory(), paths.data.as_path());
        assert_eq!(data.extension(), "parquet");
        assert_eq!(data.path("DUMMY").unwrap(), paths.data.join("dummy.parquet"));
    }

    #[test]
    fn overridden_extension_flows_into_derived_paths() {
        let (_temp, paths) = fixtures();
        let source = MapSource::new().with("DATA_EXTENSION", "csv");
        let data = data_paths(&source, &paths).unwrap();

        assert_eq!(data.path("DUMMY").unwrap(), paths.data.join("dummy.csv"));
    }

    #[test]
    fn images_extension_tracks_resolved_plot_format() {
        let (_temp, paths) = fixtures();
        let plot_source = MapSource::new().with("PLOT_FORMAT", "SVG");
        let plot = PlotDefaults::resolve(&plot_source).unwrap();

        let images = images_paths(&MapSource::new(), &paths, &plot).unwrap();
        assert_eq!(images.extension(), "svg");
        assert_eq!(images.directory(), paths.images.as_path());
    }

    #[test]
    fn directory_override_must_exist() {
        let (temp, paths) = fixtures();
        let source = MapSource::new().with("DATA_DIRECTORY", "nowhere");
        let err = data_paths(&source, &paths).unwrap_err();
        assert!(matches!(err, ConfigError::PathNotFound { .. }));
        drop(temp);
    }
}
