//! Generate the CI build matrix as step outputs.

use anyhow::Result;
use clap::Parser;
use runson_matrix::exit_codes;
use runson_matrix::generate::{GenerateArgs, MISSING_RUN_ID, generate};
use runson_matrix::io::ci_env::CiEnv;
use runson_matrix::logging;

#[derive(Parser, Debug)]
#[command(
    name = "runson-matrix",
    version,
    about = "Generate the build matrix for GitHub Actions"
)]
struct Cli {
    /// GitHub run id, passed to ephemeral runners. Unused by shared runners.
    #[arg(long = "run_id")]
    run_id: Option<String>,

    /// Runner label; labels other than the shared ubuntu runners request a runs-on runner.
    #[arg(long, default_value = "regular")]
    runner: String,

    /// Build every architecture, not only amd64.
    #[arg(long = "all_archs")]
    all_archs: bool,
}

impl From<Cli> for GenerateArgs {
    fn from(cli: Cli) -> Self {
        Self {
            run_id: cli.run_id.unwrap_or_else(|| MISSING_RUN_ID.to_string()),
            runner: cli.runner,
            all_archs: cli.all_archs,
        }
    }
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::INVALID);
    }
}

fn run() -> Result<()> {
    let args = GenerateArgs::from(Cli::parse());
    let env = CiEnv::from_env();
    generate(&args, &env, &mut std::io::stdout().lock())?;
    Ok(())
}
