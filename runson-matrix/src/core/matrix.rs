//! Build matrix types and the plan that derives all matrix variants.
//!
//! Field order of the serialized types is the key order of the emitted JSON.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::error::MatrixResult;
use super::runner::{RunnerSpec, is_shared_runner, resolve_runner};

/// Ref prefix of release tags; releases build every architecture.
pub const RELEASE_TAG_PREFIX: &str = "refs/tags/v";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    Linux,
}

impl TargetOs {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetOs::Linux => "linux",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    Amd64,
    Arm64,
}

impl Arch {
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::Arm64 => "arm64",
        }
    }

    fn job_name(self) -> &'static str {
        match self {
            Arch::Amd64 => "Linux AMD 64",
            Arch::Arm64 => "Linux ARM 64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SidecarFlavor {
    AllComponents,
    StableComponents,
}

pub const SIDECAR_FLAVORS: [SidecarFlavor; 2] =
    [SidecarFlavor::AllComponents, SidecarFlavor::StableComponents];

/// One `include` row of the matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchitectureEntry {
    pub target_os: TargetOs,
    pub target_arch: Arch,
    pub runs_on: RunnerSpec,
    pub job_name: String,
}

impl ArchitectureEntry {
    fn linux(arch: Arch, runs_on: RunnerSpec) -> Self {
        Self {
            target_os: TargetOs::Linux,
            target_arch: arch,
            runs_on,
            job_name: arch.job_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Matrix {
    pub target_os: Vec<TargetOs>,
    pub target_arch: Vec<Arch>,
    pub include: Vec<ArchitectureEntry>,
}

impl Matrix {
    fn single(entry: ArchitectureEntry) -> Self {
        Self {
            target_os: vec![entry.target_os],
            target_arch: vec![entry.target_arch],
            include: vec![entry],
        }
    }

    fn with_entry(&self, entry: ArchitectureEntry) -> Self {
        let mut matrix = self.clone();
        matrix.target_arch.push(entry.target_arch);
        matrix.include.push(entry);
        matrix
    }

    /// `linux-<arch>` tokens for every architecture in the matrix, in order.
    pub fn os_arch_tokens(&self) -> Vec<String> {
        self.target_arch
            .iter()
            .map(|arch| format!("{}-{}", TargetOs::Linux.as_str(), arch))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixWithFlavors {
    #[serde(flatten)]
    pub matrix: Matrix,
    pub sidecar_flavor: Vec<SidecarFlavor>,
}

/// Inputs of one matrix computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRequest {
    pub run_id: String,
    pub runner: String,
    /// Request ephemeral `runs-on` runners instead of shared ones.
    pub use_runs_on: bool,
    pub all_archs: bool,
    /// Git ref of the triggering event; empty outside a ref-triggered run.
    pub git_ref: String,
}

impl MatrixRequest {
    /// Build a request, deriving `use_runs_on` from the runner label.
    pub fn new(
        run_id: impl Into<String>,
        runner: impl Into<String>,
        all_archs: bool,
        git_ref: impl Into<String>,
    ) -> Self {
        let runner = runner.into();
        Self {
            run_id: run_id.into(),
            use_runs_on: !is_shared_runner(&runner),
            runner,
            all_archs,
            git_ref: git_ref.into(),
        }
    }

    pub fn is_release_tag(&self) -> bool {
        self.git_ref.starts_with(RELEASE_TAG_PREFIX)
    }

    fn builds_all_archs(&self) -> bool {
        self.is_release_tag() || self.all_archs
    }
}

/// Every matrix variant emitted for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixPlan {
    matrix: Matrix,
    matrix_simple: Matrix,
    matrix_flavors: MatrixWithFlavors,
}

impl MatrixPlan {
    /// Compute the plan.
    ///
    /// Both runners are resolved up front, so a shared label without an arm64
    /// counterpart fails even when arm64 is not built.
    pub fn build(request: &MatrixRequest) -> MatrixResult<Self> {
        let amd64_runner = resolve_runner(
            Arch::Amd64,
            &request.runner,
            &request.run_id,
            request.use_runs_on,
        )?;
        let arm64_runner = resolve_runner(
            Arch::Arm64,
            &request.runner,
            &request.run_id,
            request.use_runs_on,
        )?;
        debug!(
            runner = %request.runner,
            use_runs_on = request.use_runs_on,
            "runners resolved"
        );

        let matrix_simple = Matrix::single(ArchitectureEntry::linux(Arch::Amd64, amd64_runner));
        let matrix = if request.builds_all_archs() {
            debug!(
                release_tag = request.is_release_tag(),
                all_archs = request.all_archs,
                "including arm64"
            );
            matrix_simple.with_entry(ArchitectureEntry::linux(Arch::Arm64, arm64_runner))
        } else {
            matrix_simple.clone()
        };
        let matrix_flavors = MatrixWithFlavors {
            matrix: matrix.clone(),
            sidecar_flavor: SIDECAR_FLAVORS.to_vec(),
        };

        Ok(Self {
            matrix,
            matrix_simple,
            matrix_flavors,
        })
    }

    /// Full matrix: amd64, plus arm64 for release tags or when requested.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// amd64-only matrix.
    pub fn matrix_simple(&self) -> &Matrix {
        &self.matrix_simple
    }

    pub fn matrix_flavors(&self) -> &MatrixWithFlavors {
        &self.matrix_flavors
    }

    /// Space-joined `linux-<arch>` tokens of the full matrix.
    pub fn archs_executed(&self) -> String {
        self.matrix.os_arch_tokens().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::core::error::MatrixError;

    fn plan(runner: &str, all_archs: bool, git_ref: &str) -> MatrixPlan {
        MatrixPlan::build(&MatrixRequest::new("123", runner, all_archs, git_ref)).expect("plan")
    }

    fn archs(matrix: &Matrix) -> Vec<Arch> {
        matrix.include.iter().map(|entry| entry.target_arch).collect()
    }

    #[test]
    fn request_derives_runs_on_from_label() {
        assert!(!MatrixRequest::new("1", "ubuntu-latest", false, "").use_runs_on);
        assert!(!MatrixRequest::new("1", "ubuntu-latest-l-arm", false, "").use_runs_on);
        assert!(MatrixRequest::new("1", "regular", false, "").use_runs_on);
    }

    #[test]
    fn shared_runner_simple_matrix_is_amd64_only() {
        for runner in ["ubuntu-latest", "ubuntu-latest-m"] {
            for (all_archs, git_ref) in [(false, ""), (true, ""), (false, "refs/tags/v1.2.3")] {
                let plan = plan(runner, all_archs, git_ref);
                assert_eq!(archs(plan.matrix_simple()), vec![Arch::Amd64]);
                assert_eq!(plan.matrix_simple().target_arch, vec![Arch::Amd64]);
            }
        }
    }

    #[test]
    fn branch_build_is_amd64_only() {
        let plan = plan("ubuntu-latest", false, "refs/heads/main");
        assert_eq!(archs(plan.matrix()), vec![Arch::Amd64]);
        assert_eq!(plan.matrix(), plan.matrix_simple());
        assert_eq!(plan.archs_executed(), "linux-amd64");
    }

    #[test]
    fn release_tag_adds_arm64() {
        let plan = plan("ubuntu-latest", false, "refs/tags/v0.9.0");
        assert_eq!(archs(plan.matrix()), vec![Arch::Amd64, Arch::Arm64]);
        assert_eq!(plan.matrix().target_arch, vec![Arch::Amd64, Arch::Arm64]);
        assert_eq!(
            plan.matrix().include[1].runs_on,
            RunnerSpec::Label("ubuntu-latest-m-arm".to_string())
        );
        assert_eq!(plan.matrix().include[1].job_name, "Linux ARM 64");
        assert_eq!(plan.archs_executed(), "linux-amd64 linux-arm64");
    }

    #[test]
    fn non_version_tag_does_not_add_arm64() {
        let plan = plan("ubuntu-latest", false, "refs/tags/nightly");
        assert_eq!(archs(plan.matrix()), vec![Arch::Amd64]);
    }

    #[test]
    fn all_archs_flag_adds_arm64() {
        let plan = plan("regular", true, "");
        assert_eq!(archs(plan.matrix()), vec![Arch::Amd64, Arch::Arm64]);
        assert_eq!(
            plan.matrix().include[1].runs_on,
            RunnerSpec::RunsOn {
                runner: "regular-arm".to_string(),
                run_id: "123".to_string(),
            }
        );
        assert_eq!(archs(plan.matrix_simple()), vec![Arch::Amd64]);
    }

    #[test]
    fn flavors_extend_full_matrix() {
        for all_archs in [false, true] {
            let plan = plan("ubuntu-latest-m", all_archs, "");
            assert_eq!(&plan.matrix_flavors().matrix, plan.matrix());
            assert_eq!(
                plan.matrix_flavors().sidecar_flavor,
                vec![SidecarFlavor::AllComponents, SidecarFlavor::StableComponents]
            );
        }
    }

    #[test]
    fn flavors_serialize_flat_with_sidecar_last() {
        let plan = plan("ubuntu-latest", false, "");
        let encoded = serde_json::to_string(plan.matrix_flavors()).expect("encode");
        assert!(encoded.starts_with(r#"{"target_os":["linux"],"target_arch":["amd64"],"include":"#));
        assert!(encoded.ends_with(r#""sidecar_flavor":["allcomponents","stablecomponents"]}"#));
    }

    #[test]
    fn simple_shared_runner_matrix_json() {
        let plan = plan("ubuntu-latest", false, "");
        let value = serde_json::to_value(plan.matrix()).expect("encode");
        assert_eq!(
            value,
            json!({
                "target_os": ["linux"],
                "target_arch": ["amd64"],
                "include": [{
                    "target_os": "linux",
                    "target_arch": "amd64",
                    "runs_on": "ubuntu-latest",
                    "job_name": "Linux AMD 64",
                }],
            })
        );
    }

    #[test]
    fn shared_label_without_counterpart_fails_even_for_simple_builds() {
        let request = MatrixRequest::new("1", "ubuntu-latest-m-arm", false, "");
        let err = MatrixPlan::build(&request).expect_err("unknown runner");
        assert!(matches!(err, MatrixError::UnknownRunner { .. }));
    }
}
