//! Project path set and project identity.
//!
//! Every field of [`PathSet`] is a directory that must already exist at
//! resolution time; resolution never creates directories (callers such as
//! the logger factory create what they need before writing). All resolved
//! paths are absolute and canonical.

use crate::config::source::{Scope, Source, default_source};
use crate::error::{ConfigError, ConfigResult};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Environment prefix for path variables.
pub const PATH_PREFIX: &str = "PATH_";

/// Named project directories, resolved before every other sub-configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathSet {
    pub project_root: PathBuf,
    pub package_root: PathBuf,
    pub images: PathBuf,
    pub data: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
    pub logs: PathBuf,
    pub scripts: PathBuf,
    pub tests: PathBuf,
}

impl PathSet {
    /// Resolve from the default override tiers.
    pub fn load() -> ConfigResult<Self> {
        Self::resolve(&default_source())
    }

    /// Resolve from an explicit source.
    ///
    /// The project root resolves against the current directory; every other
    /// field resolves against the resolved project root, so overriding
    /// `PATH_PROJECT_ROOT` alone relocates the whole set. Resolution stops
    /// at the first missing directory.
    pub fn resolve(source: &dyn Source) -> ConfigResult<Self> {
        let scope = Scope::new(PATH_PREFIX, source);
        let cwd = std::env::current_dir()?;
        let project_root = resolve_dir(
            &scoped_name(&scope, "PROJECT_ROOT"),
            &scope.string("PROJECT_ROOT", "."),
            &cwd,
        )?;

        let sub = |field: &str, default: &str| -> ConfigResult<PathBuf> {
            resolve_dir(
                &scoped_name(&scope, field),
                &scope.string(field, default),
                &project_root,
            )
        };

        let package_root = sub("PACKAGE_ROOT", "src")?;
        let images = sub("IMAGES", "images")?;
        let data = sub("DATA", "data")?;
        let input = sub("INPUT", "input")?;
        let output = sub("OUTPUT", "output")?;
        let logs = sub("LOGS", "logs")?;
        let scripts = sub("SCRIPTS", "scripts")?;
        let tests = sub("TESTS", "tests")?;

        Ok(Self {
            project_root,
            package_root,
            images,
            data,
            input,
            output,
            logs,
            scripts,
            tests,
        })
    }
}

fn scoped_name(scope: &Scope<'_>, field: &str) -> String {
    format!("{}{}", scope.prefix(), field)
}

/// Resolve a directory reference to an absolute, canonical path.
///
/// Relative values resolve against `base`. The directory must exist and be
/// a directory, not a file.
pub(crate) fn resolve_dir(field: &str, raw: &str, base: &Path) -> ConfigResult<PathBuf> {
    let candidate = Path::new(raw);
    let absolute = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        base.join(candidate)
    };
    if !absolute.is_dir() {
        return Err(ConfigError::path_not_found(field, absolute));
    }
    Ok(absolute.canonicalize()?)
}

/// Project name, derived once from the project root's directory name.
///
/// No environment override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectIdentity {
    pub name: String,
}

impl ProjectIdentity {
    pub fn from_paths(paths: &PathSet) -> ConfigResult<Self> {
        let name = paths
            .project_root
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ConfigError::schema("ProjectIdentity", "project root has no directory name")
            })?;
        Ok(Self {
            name: name.to_string(),
        })
    }
}
