//! End-to-end matrix generation for the CLI.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::matrix::{MatrixPlan, MatrixRequest};
use crate::io::ci_env::CiEnv;
use crate::io::outputs::{StepOutputs, mirror_outputs, write_outputs};

/// Run id recorded in `runs-on` descriptors when none was given.
pub const MISSING_RUN_ID: &str = "None";

/// Command-line inputs of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateArgs {
    pub run_id: String,
    pub runner: String,
    pub all_archs: bool,
}

/// Compute the plan, append it to the configured output file and, outside
/// GitHub Actions, echo it to `stdout`.
pub fn generate<W: Write>(args: &GenerateArgs, env: &CiEnv, stdout: &mut W) -> Result<MatrixPlan> {
    let request = MatrixRequest::new(
        args.run_id.clone(),
        args.runner.clone(),
        args.all_archs,
        env.git_ref.clone(),
    );
    debug!(?request, "matrix request");
    let plan = MatrixPlan::build(&request)
        .with_context(|| format!("build matrix for runner {}", request.runner))?;
    let outputs = StepOutputs::render(&plan)?;

    write_outputs(env.output_path.as_deref(), &outputs)?;
    if !env.in_github_actions {
        mirror_outputs(stdout, &outputs)?;
    }
    info!(archs = %plan.archs_executed(), "matrix generated");
    Ok(plan)
}
