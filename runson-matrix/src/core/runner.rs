//! Runner label classification and per-architecture runner resolution.
//!
//! A runner is either one of a handful of statically named shared hosts, or
//! anything else, which is requested on demand through a `runs-on`
//! descriptor carrying the run id.

use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::error::{MatrixError, MatrixResult};
use super::matrix::Arch;

/// Shared runner labels. Any other label is provisioned through `runs-on`.
pub const SHARED_RUNNERS: [&str; 4] = [
    "ubuntu-latest",       // 2 cores
    "ubuntu-latest-m",     // 4 cores
    "ubuntu-latest-m-arm", // 2 cores
    "ubuntu-latest-l-arm", // 4 cores
];

/// amd64 shared runner -> arm64 shared runner of matching capacity.
pub const ARM_COUNTERPARTS: &[(&str, &str)] = &[
    ("ubuntu-latest", "ubuntu-latest-m-arm"),
    ("ubuntu-latest-m", "ubuntu-latest-l-arm"),
];

const RUNS_ON_PROVIDER: &str = "runs-on";
const ARM_RUNNER_SUFFIX: &str = "-arm";

/// Where a matrix job runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerSpec {
    /// A shared runner, addressed by its label.
    Label(String),
    /// An ephemeral runner requested from the `runs-on` provider.
    RunsOn { runner: String, run_id: String },
}

impl RunnerSpec {
    /// Descriptor tokens as the workflow's `runs-on` key expects them.
    pub fn runs_on_tokens(runner: &str, run_id: &str) -> [String; 3] {
        [
            RUNS_ON_PROVIDER.to_string(),
            format!("runner={runner}"),
            format!("run-id={run_id}"),
        ]
    }
}

impl Serialize for RunnerSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RunnerSpec::Label(label) => serializer.serialize_str(label),
            RunnerSpec::RunsOn { runner, run_id } => {
                let tokens = Self::runs_on_tokens(runner, run_id);
                let mut seq = serializer.serialize_seq(Some(tokens.len()))?;
                for token in &tokens {
                    seq.serialize_element(token)?;
                }
                seq.end()
            }
        }
    }
}

pub fn is_shared_runner(label: &str) -> bool {
    SHARED_RUNNERS.contains(&label)
}

/// Look up the arm64 shared runner paired with an amd64 shared runner.
pub fn arm_counterpart(label: &str) -> Option<&'static str> {
    ARM_COUNTERPARTS
        .iter()
        .find(|(amd, _)| *amd == label)
        .map(|(_, arm)| *arm)
}

/// Resolve the runner for one architecture.
///
/// With `use_runs_on`, both architectures get a `runs-on` descriptor (arm64
/// uses the `-arm` variant of the runner name). Otherwise amd64 runs on the
/// label as given and arm64 on its counterpart from [`ARM_COUNTERPARTS`].
pub fn resolve_runner(
    arch: Arch,
    runner: &str,
    run_id: &str,
    use_runs_on: bool,
) -> MatrixResult<RunnerSpec> {
    match (arch, use_runs_on) {
        (Arch::Amd64, true) => Ok(RunnerSpec::RunsOn {
            runner: runner.to_string(),
            run_id: run_id.to_string(),
        }),
        (Arch::Arm64, true) => Ok(RunnerSpec::RunsOn {
            runner: format!("{runner}{ARM_RUNNER_SUFFIX}"),
            run_id: run_id.to_string(),
        }),
        (Arch::Amd64, false) => Ok(RunnerSpec::Label(runner.to_string())),
        (Arch::Arm64, false) => arm_counterpart(runner)
            .map(|arm| RunnerSpec::Label(arm.to_string()))
            .ok_or_else(|| MatrixError::UnknownRunner {
                runner: runner.to_string(),
                known: ARM_COUNTERPARTS
                    .iter()
                    .map(|(amd, _)| *amd)
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
    }
}
