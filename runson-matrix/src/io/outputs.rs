//! Step outputs: `key=value` lines appended to `$GITHUB_OUTPUT`.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::matrix::MatrixPlan;

pub const MATRIX: &str = "matrix";
pub const MATRIX_SIMPLE: &str = "matrix_simple";
pub const MATRIX_FLAVORS: &str = "matrix_flavors";
pub const TARGET_ARCH_EXECUTED: &str = "target_arch_executed";

/// Encoded output values for one plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutputs {
    pub matrix: String,
    pub matrix_simple: String,
    pub matrix_flavors: String,
    /// `linux-<arch>` tokens, in matrix order.
    pub target_arch_executed: Vec<String>,
}

impl StepOutputs {
    pub fn render(plan: &MatrixPlan) -> Result<Self> {
        Ok(Self {
            matrix: serde_json::to_string(plan.matrix()).context("serialize matrix")?,
            matrix_simple: serde_json::to_string(plan.matrix_simple())
                .context("serialize matrix_simple")?,
            matrix_flavors: serde_json::to_string(plan.matrix_flavors())
                .context("serialize matrix_flavors")?,
            target_arch_executed: plan.matrix().os_arch_tokens(),
        })
    }

    /// `(key, value)` pairs in emission order.
    pub fn lines(&self) -> [(&'static str, String); 4] {
        [
            (MATRIX, self.matrix.clone()),
            (MATRIX_SIMPLE, self.matrix_simple.clone()),
            (MATRIX_FLAVORS, self.matrix_flavors.clone()),
            (TARGET_ARCH_EXECUTED, self.target_arch_executed.join(" ")),
        ]
    }
}

/// Write every output line to `w` and flush.
pub fn append_outputs<W: Write>(w: &mut W, outputs: &StepOutputs) -> Result<()> {
    for (key, value) in outputs.lines() {
        writeln!(w, "{key}={value}").with_context(|| format!("write output {key}"))?;
    }
    w.flush().context("flush outputs")
}

/// Append outputs to `path`, creating it if needed. Without a path the
/// outputs are discarded.
pub fn write_outputs(path: Option<&Path>, outputs: &StepOutputs) -> Result<()> {
    let Some(path) = path else {
        debug!("no output file configured; discarding outputs");
        return append_outputs(&mut io::sink(), outputs);
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    append_outputs(&mut writer, outputs)
        .with_context(|| format!("append outputs to {}", path.display()))?;
    info!(path = %path.display(), "outputs written");
    Ok(())
}

/// Echo outputs in a human-readable form for local runs.
///
/// The arch list is shown as a JSON array (`["linux-amd64"]`) rather than
/// a single-quoted list (`['linux-amd64']`).
pub fn mirror_outputs<W: Write>(w: &mut W, outputs: &StepOutputs) -> Result<()> {
    let archs =
        serde_json::to_string(&outputs.target_arch_executed).context("serialize arch list")?;
    writeln!(w, "{MATRIX}: {}\n", outputs.matrix).context("mirror matrix")?;
    writeln!(w, "{MATRIX_SIMPLE}: {}\n", outputs.matrix_simple).context("mirror matrix_simple")?;
    writeln!(w, "{MATRIX_FLAVORS}: {}\n", outputs.matrix_flavors)
        .context("mirror matrix_flavors")?;
    writeln!(w, "{TARGET_ARCH_EXECUTED}: {archs}\n").context("mirror target_arch_executed")?;
    Ok(())
}
