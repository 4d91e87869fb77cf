//! Test-only helpers for building inputs and reading step outputs.

use std::collections::BTreeMap;
use std::path::Path;

use crate::generate::GenerateArgs;
use crate::io::ci_env::CiEnv;

/// Parse `key=value` lines as written to `$GITHUB_OUTPUT`.
///
/// Later lines win, matching how the runner resolves repeated keys.
pub fn parse_outputs(contents: &str) -> BTreeMap<String, String> {
    contents
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

pub fn args(run_id: &str, runner: &str, all_archs: bool) -> GenerateArgs {
    GenerateArgs {
        run_id: run_id.to_string(),
        runner: runner.to_string(),
        all_archs,
    }
}

pub fn ci_env(in_github_actions: bool, git_ref: &str, output_path: Option<&Path>) -> CiEnv {
    CiEnv {
        in_github_actions,
        git_ref: git_ref.to_string(),
        output_path: output_path.map(Path::to_path_buf),
    }
}
