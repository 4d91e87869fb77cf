//! CI environment captured once per invocation.
//!
//! This is the only place that reads process environment variables; the rest
//! of the crate receives a [`CiEnv`] value.

use std::env;
use std::path::PathBuf;

pub const GITHUB_ACTIONS: &str = "GITHUB_ACTIONS";
pub const GITHUB_REF: &str = "GITHUB_REF";
pub const GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiEnv {
    /// `GITHUB_ACTIONS == "true"`.
    pub in_github_actions: bool,
    /// `GITHUB_REF`, empty when unset.
    pub git_ref: String,
    /// `GITHUB_OUTPUT`; `None` discards outputs.
    pub output_path: Option<PathBuf>,
}

impl CiEnv {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            in_github_actions: lookup(GITHUB_ACTIONS).as_deref() == Some("true"),
            git_ref: lookup(GITHUB_REF).unwrap_or_default(),
            output_path: lookup(GITHUB_OUTPUT)
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        }
    }
}
