//! Free numeric parameters for downstream analysis.

use crate::config::source::{Scope, Source, default_source};
use crate::config::validate;
use crate::error::ConfigResult;
use serde::Serialize;

/// Environment prefix for analysis parameters.
pub const PARAM_PREFIX: &str = "PARAM_";

/// Small typed values consumed by analysis code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameters {
    /// Fixed random seed for reproducible runs.
    pub random_seed: u32,
}

impl Parameters {
    pub fn load() -> ConfigResult<Self> {
        Self::resolve(&default_source())
    }

    pub fn resolve(source: &dyn Source) -> ConfigResult<Self> {
        let scope = Scope::new(PARAM_PREFIX, source);
        Ok(Self {
            random_seed: scope.validated("RANDOM_SEED", "19210102", validate::positive_int)?,
        })
    }
}
